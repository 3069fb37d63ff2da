use crate::error::{Error, Result};
use crate::types::{Container, PackingReport, Segment};

/// First-fit-descending: widest segment first, each into the earliest
/// container with room, opening a new container only when none has room.
pub fn pack(mut segments: Vec<Segment>, capacity: f64) -> Result<PackingReport> {
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(Error::InvalidCapacity(capacity));
    }
    if let Some(bad) = segments
        .iter()
        .find(|s| !(s.width > 0.0 && s.width <= capacity))
    {
        return Err(Error::InvalidSegment {
            width: bad.width,
            capacity,
        });
    }

    segments.sort_by(|a, b| b.width.total_cmp(&a.width));

    let mut containers: Vec<Container> = Vec::new();
    for segment in segments {
        match containers.iter_mut().find(|c| c.fits(segment.width)) {
            Some(container) => container.place(segment),
            None => containers.push(Container::open(capacity, segment)),
        }
    }

    let total_waste = containers.iter().map(|c| c.remaining).sum();
    Ok(PackingReport {
        capacity,
        containers,
        total_waste,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(width: f64, source: usize) -> Segment {
        Segment {
            width,
            source,
            piece: 0,
            pieces: 1,
        }
    }

    fn segs(widths: &[f64]) -> Vec<Segment> {
        widths.iter().enumerate().map(|(i, &w)| seg(w, i)).collect()
    }

    /// Validates a report:
    /// 1. Every container's used width plus remaining equals capacity
    /// 2. No container is overfilled
    /// 3. Every input segment lands in exactly one container
    fn assert_report_valid(report: &PackingReport, input: &[Segment]) {
        for (ci, c) in report.containers.iter().enumerate() {
            assert!(
                (c.used() + c.remaining - report.capacity).abs() < 1e-9,
                "container {ci}: used {} + remaining {} != capacity {}",
                c.used(),
                c.remaining,
                report.capacity
            );
            assert!(c.remaining >= 0.0, "container {ci} overfilled: {}", c.remaining);
            assert!(!c.segments.is_empty(), "container {ci} is empty");
        }

        let mut placed: Vec<usize> = report
            .containers
            .iter()
            .flat_map(|c| &c.segments)
            .map(|s| s.source)
            .collect();
        placed.sort_unstable();
        let mut expected: Vec<usize> = input.iter().map(|s| s.source).collect();
        expected.sort_unstable();
        assert_eq!(placed, expected, "segments lost or duplicated");

        let waste: f64 = report.containers.iter().map(|c| c.remaining).sum();
        assert!((waste - report.total_waste).abs() < 1e-9);
    }

    #[test]
    fn test_first_fit_reuses_earliest_container() {
        let input = segs(&[300.0, 300.0, 60.0]);
        let report = pack(input.clone(), 360.0).unwrap();
        assert_report_valid(&report, &input);
        assert_eq!(report.container_count(), 2);
        assert_eq!(report.total_waste, 60.0);
        assert_eq!(report.containers[0].remaining, 0.0);
        assert_eq!(report.containers[0].segments.len(), 2);
        assert_eq!(report.containers[1].remaining, 60.0);
    }

    #[test]
    fn test_sorted_descending_before_placing() {
        let input = segs(&[60.0, 300.0, 300.0]);
        let report = pack(input.clone(), 360.0).unwrap();
        assert_report_valid(&report, &input);
        assert_eq!(report.containers[0].segments[0].width, 300.0);
        assert_eq!(report.containers[0].segments[1].width, 60.0);
        assert_eq!(report.container_count(), 2);
    }

    #[test]
    fn test_exact_fill() {
        let input = segs(&[180.0, 90.0, 90.0, 360.0]);
        let report = pack(input.clone(), 360.0).unwrap();
        assert_report_valid(&report, &input);
        assert_eq!(report.container_count(), 2);
        assert_eq!(report.total_waste, 0.0);
        assert_eq!(report.waste_percent(), 0.0);
    }

    #[test]
    fn test_no_segments() {
        let report = pack(vec![], 360.0).unwrap();
        assert_report_valid(&report, &[]);
        assert_eq!(report.container_count(), 0);
        assert_eq!(report.total_waste, 0.0);
    }

    #[test]
    fn test_first_fit_not_best_fit() {
        // 40 fits both containers (110 and 45 left) and goes to the first one.
        let input = segs(&[250.0, 200.0, 115.0, 40.0]);
        let report = pack(input.clone(), 360.0).unwrap();
        assert_report_valid(&report, &input);
        assert_eq!(report.container_count(), 2);
        let first: Vec<f64> = report.containers[0].segments.iter().map(|s| s.width).collect();
        assert_eq!(first, vec![250.0, 40.0]);
        let second: Vec<f64> = report.containers[1].segments.iter().map(|s| s.width).collect();
        assert_eq!(second, vec![200.0, 115.0]);
        assert_eq!(report.total_waste, 115.0);
    }

    #[test]
    fn test_many_mixed_widths() {
        let widths: Vec<f64> = (1..=40).map(|i| (i * 37 % 350 + 5) as f64).collect();
        let input = segs(&widths);
        let report = pack(input.clone(), 360.0).unwrap();
        assert_report_valid(&report, &input);

        let total: f64 = widths.iter().sum();
        let lower_bound = (total / 360.0).ceil() as usize;
        assert!(report.container_count() >= lower_bound);
        assert!(report.waste_percent() >= 0.0 && report.waste_percent() < 100.0);
    }

    #[test]
    fn test_rejects_oversized_segment() {
        let err = pack(segs(&[100.0, 361.0]), 360.0).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSegment {
                width: 361.0,
                capacity: 360.0
            }
        );
    }

    #[test]
    fn test_rejects_empty_segment() {
        assert!(matches!(
            pack(segs(&[0.0]), 360.0),
            Err(Error::InvalidSegment { .. })
        ));
    }
}
