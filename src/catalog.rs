use crate::types::Requirement;

/// Per-household planting list: (crop, radius in inches, plants, trellised).
const CROPS: [(&str, f64, u32, bool); 22] = [
    ("asparagus", 4.5, 25, false),
    ("broccoli", 9.0, 15, false),
    ("bush green beans", 3.0, 50, false),
    ("cabbage", 6.0, 10, false),
    ("carrots", 1.5, 120, false),
    ("celery", 3.0, 10, false),
    ("sweet corn", 6.0, 100, false),
    ("cucumbers", 6.0, 4, true),
    ("dried beans", 3.0, 50, true),
    ("garlic", 2.0, 50, false),
    ("green onions", 1.5, 15, false),
    ("kale", 6.0, 40, false),
    ("lettuce", 6.0, 40, false),
    ("onion bulbs", 2.5, 50, false),
    ("peppers", 6.0, 7, false),
    ("potatoes", 6.0, 50, false),
    ("shelling peas", 1.5, 100, true),
    ("snap peas", 2.5, 40, true),
    ("summer squash", 6.0, 2, false),
    ("sweet potatoes", 6.0, 8, false),
    ("tomatoes", 6.0, 12, true),
    ("winter squash", 6.0, 4, false),
];

pub fn default_crops() -> Vec<Requirement> {
    CROPS
        .iter()
        .map(|&(name, radius, count, trellised)| {
            let crop = Requirement::new(name, radius, count);
            if trellised { crop.on_trellis() } else { crop }
        })
        .collect()
}
