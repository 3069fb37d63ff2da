use serde::{Deserialize, Deserializer, Serialize};

/// One crop to plant: circles of `radius` that must appear `count` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub name: String,
    pub radius: f64,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub count: u32,
    /// Grown up a trellis in a single row instead of spread across the strip.
    #[serde(default)]
    pub trellised: bool,
}

impl Requirement {
    pub fn new(name: impl Into<String>, radius: f64, count: u32) -> Self {
        Self {
            name: name.into(),
            radius,
            count,
            trellised: false,
        }
    }

    pub fn on_trellis(mut self) -> Self {
        self.trellised = true;
        self
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            write!(f, "r={:.2} x{}", self.radius, self.count)?;
        } else {
            write!(f, "{} (r={:.2} x{})", self.name, self.radius, self.count)?;
        }
        if self.trellised {
            f.write_str(" trellised")?;
        }
        Ok(())
    }
}

/// Accepts JSON numbers such as `25` or `25.0` for integer fields.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {value}"
        )));
    }
    Ok(value as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    SquareGrid,
    FlatTopped,
    PointyTopped,
    /// One row along a trellis, one diameter per plant.
    Trellis,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::SquareGrid => "regular",
            Strategy::FlatTopped => "flat-topped",
            Strategy::PointyTopped => "pointy-topped",
            Strategy::Trellis => "trellis",
        };
        f.write_str(name)
    }
}

/// Width each free-standing layout needs. `None` means the layout cannot fit
/// a single row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidates {
    pub square_grid: f64,
    pub flat_topped: Option<f64>,
    pub pointy_topped: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackingEstimate {
    pub width: f64,
    pub strategy: Strategy,
    pub candidates: Candidates,
}

/// A piece of strip no wider than one container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub width: f64,
    /// Index of the width this piece was cut from.
    pub source: usize,
    /// 0-based position among the pieces of `source`.
    pub piece: usize,
    pub pieces: usize,
}

impl Segment {
    pub fn is_split(&self) -> bool {
        self.pieces > 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub remaining: f64,
    pub segments: Vec<Segment>,
}

impl Container {
    /// Opens a container holding just `segment`.
    pub fn open(capacity: f64, segment: Segment) -> Self {
        Self {
            remaining: capacity - segment.width,
            segments: vec![segment],
        }
    }

    pub fn place(&mut self, segment: Segment) {
        self.remaining -= segment.width;
        self.segments.push(segment);
    }

    pub fn used(&self) -> f64 {
        self.segments.iter().map(|s| s.width).sum()
    }

    pub fn fits(&self, width: f64) -> bool {
        self.remaining >= width
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingReport {
    pub capacity: f64,
    pub containers: Vec<Container>,
    pub total_waste: f64,
}

impl PackingReport {
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn segment_count(&self) -> usize {
        self.containers.iter().map(|c| c.segments.len()).sum()
    }

    pub fn waste_percent(&self) -> f64 {
        let total_capacity = self.capacity * self.containers.len() as f64;
        if total_capacity == 0.0 {
            return 0.0;
        }
        self.total_waste / total_capacity * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_accepts_float_integers() {
        let req: Requirement =
            serde_json::from_str(r#"{"name": "kale", "radius": 6, "count": 40.0}"#).unwrap();
        assert_eq!(req, Requirement::new("kale", 6.0, 40));
    }

    #[test]
    fn test_count_rejects_fractions() {
        let req = serde_json::from_str::<Requirement>(r#"{"radius": 6, "count": 2.5}"#);
        assert!(req.is_err());
    }

    #[test]
    fn test_name_defaults_to_empty() {
        let req: Requirement = serde_json::from_str(r#"{"radius": 3, "count": 10}"#).unwrap();
        assert!(req.name.is_empty());
        assert_eq!(req.to_string(), "r=3.00 x10");
    }

    #[test]
    fn test_trellised_defaults_to_false() {
        let req: Requirement = serde_json::from_str(r#"{"radius": 6, "count": 4}"#).unwrap();
        assert!(!req.trellised);

        let json = r#"{"name": "tomatoes", "radius": 6, "count": 12, "trellised": true}"#;
        let req: Requirement = serde_json::from_str(json).unwrap();
        assert_eq!(req, Requirement::new("tomatoes", 6.0, 12).on_trellis());
        assert_eq!(req.to_string(), "tomatoes (r=6.00 x12) trellised");
    }

    #[test]
    fn test_waste_percent() {
        let report = PackingReport {
            capacity: 360.0,
            containers: vec![
                Container {
                    remaining: 0.0,
                    segments: vec![],
                },
                Container {
                    remaining: 180.0,
                    segments: vec![],
                },
            ],
            total_waste: 180.0,
        };
        assert!((report.waste_percent() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_waste_percent_empty() {
        let report = PackingReport {
            capacity: 360.0,
            containers: vec![],
            total_waste: 0.0,
        };
        assert_eq!(report.waste_percent(), 0.0);
    }
}
