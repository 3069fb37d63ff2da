use crate::error::{Error, Result};
use crate::types::Segment;

/// Most pieces one width may be cut into when no bed budget sets the limit.
pub const MAX_PIECES: usize = 256;

/// Splits each width into pieces no wider than `capacity`.
///
/// A width over capacity becomes `floor(w / capacity)` full pieces followed by
/// the remainder, if any is left. Pieces of one width stay contiguous and the
/// input order is kept.
pub fn segment(widths: &[f64], capacity: f64) -> Result<Vec<Segment>> {
    segment_with_limit(widths, capacity, MAX_PIECES)
}

/// Like [`segment`], failing with `TooManyPieces` before cutting any width
/// into more than `max_pieces` pieces.
pub fn segment_with_limit(
    widths: &[f64],
    capacity: f64,
    max_pieces: usize,
) -> Result<Vec<Segment>> {
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(Error::InvalidCapacity(capacity));
    }
    let limit = max_pieces.max(1);

    let mut segments = Vec::with_capacity(widths.len());
    for (source, &width) in widths.iter().enumerate() {
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidSegment { width, capacity });
        }

        if width <= capacity {
            segments.push(Segment {
                width,
                source,
                piece: 0,
                pieces: 1,
            });
            continue;
        }

        let parts = (width / capacity).floor();
        let remainder = width - parts * capacity;
        let needed = if remainder > 0.0 { parts + 1.0 } else { parts };
        if needed > limit as f64 {
            return Err(Error::TooManyPieces {
                width,
                pieces: needed as usize,
                limit,
            });
        }
        let parts = parts as usize;
        let pieces = needed as usize;

        for piece in 0..parts {
            segments.push(Segment {
                width: capacity,
                source,
                piece,
                pieces,
            });
        }
        if remainder > 0.0 {
            segments.push(Segment {
                width: remainder,
                source,
                piece: parts,
                pieces,
            });
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(segments: &[Segment]) -> Vec<f64> {
        segments.iter().map(|s| s.width).collect()
    }

    #[test]
    fn test_split_with_remainder() {
        let segs = segment(&[750.0], 360.0).unwrap();
        assert_eq!(widths(&segs), vec![360.0, 360.0, 30.0]);
        assert!(segs.iter().all(|s| s.source == 0 && s.pieces == 3));
        assert_eq!(segs[2].piece, 2);
    }

    #[test]
    fn test_exact_capacity_not_split() {
        let segs = segment(&[360.0], 360.0).unwrap();
        assert_eq!(widths(&segs), vec![360.0]);
        assert!(!segs[0].is_split());
    }

    #[test]
    fn test_exact_multiple_has_no_remainder() {
        let segs = segment(&[720.0], 360.0).unwrap();
        assert_eq!(widths(&segs), vec![360.0, 360.0]);
        assert!(segs.iter().all(|s| s.pieces == 2));
    }

    #[test]
    fn test_order_preserved() {
        let segs = segment(&[100.0, 400.0, 50.0], 360.0).unwrap();
        assert_eq!(widths(&segs), vec![100.0, 360.0, 40.0, 50.0]);
        let sources: Vec<usize> = segs.iter().map(|s| s.source).collect();
        assert_eq!(sources, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_total_width_conserved() {
        let input = [12.0, 43.176_914_536_239_79, 750.0, 1080.0, 359.999, 1234.5678];
        for &w in &input {
            let segs = segment(&[w], 360.0).unwrap();
            let total: f64 = segs.iter().map(|s| s.width).sum();
            assert!((total - w).abs() < 1e-9, "width {w} split into {total}");
            assert!(segs.iter().all(|s| s.width > 0.0 && s.width <= 360.0));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(segment(&[], 360.0).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(segment(&[10.0], 0.0), Err(Error::InvalidCapacity(0.0)));
        assert!(matches!(
            segment(&[10.0, -1.0], 360.0),
            Err(Error::InvalidSegment { .. })
        ));
        assert!(matches!(
            segment(&[f64::NAN], 360.0),
            Err(Error::InvalidSegment { .. })
        ));
    }

    #[test]
    fn test_piece_limit() {
        assert_eq!(
            segment_with_limit(&[750.0], 360.0, 2),
            Err(Error::TooManyPieces {
                width: 750.0,
                pieces: 3,
                limit: 2
            })
        );
        assert_eq!(segment_with_limit(&[750.0], 360.0, 3).unwrap().len(), 3);
        // Exact multiples need no remainder piece.
        assert_eq!(segment_with_limit(&[720.0], 360.0, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_tiny_capacity_rejected_before_cutting() {
        assert!(matches!(
            segment(&[12.0], 1e-5),
            Err(Error::TooManyPieces { limit: MAX_PIECES, .. })
        ));
        assert!(matches!(
            segment(&[12.0], 1e-300),
            Err(Error::TooManyPieces { .. })
        ));
    }
}
