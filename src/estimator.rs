//! Minimum strip width for a number of equal circles.
//!
//! Three layouts are tried for every free-standing requirement. The square
//! grid is a closed form; both hexagonal layouts search upward because their
//! row capacities round down independently of each other.

use crate::error::{Error, Result};
use crate::types::{Candidates, PackingEstimate, Requirement, Strategy};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Slack for floor divisions of widths built from repeated multiples.
const EPSILON: f64 = 1e-9;

pub fn estimate(radius: f64, height: f64, count: u32) -> Result<PackingEstimate> {
    validate(radius, height, count)?;

    let square_grid = square_grid_width(radius, height, count);
    let flat_topped = flat_topped_width(radius, height, count);
    let pointy_topped = pointy_topped_width(radius, height, count);

    let flat = flat_topped.unwrap_or(f64::INFINITY);
    let pointy = pointy_topped.unwrap_or(f64::INFINITY);

    // Only a strict winner displaces the square grid, so every tie lands on it.
    let strategy = if flat < pointy && flat < square_grid {
        Strategy::FlatTopped
    } else if pointy < flat && pointy < square_grid {
        Strategy::PointyTopped
    } else {
        Strategy::SquareGrid
    };

    Ok(PackingEstimate {
        width: square_grid.min(flat).min(pointy),
        strategy,
        candidates: Candidates {
            square_grid,
            flat_topped,
            pointy_topped,
        },
    })
}

/// Estimates one requirement. Trellised crops take a single row of
/// `count` diameters; the free-standing widths are still reported.
pub fn estimate_requirement(req: &Requirement, height: f64) -> Result<PackingEstimate> {
    let free = estimate(req.radius, height, req.count)?;
    if !req.trellised {
        return Ok(free);
    }
    Ok(PackingEstimate {
        width: trellis_width(req.radius, req.count),
        strategy: Strategy::Trellis,
        candidates: free.candidates,
    })
}

fn validate(radius: f64, height: f64, count: u32) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::InvalidGeometry(format!(
            "radius must be positive, got {radius}"
        )));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidGeometry(format!(
            "strip height must be positive, got {height}"
        )));
    }
    if radius >= height {
        return Err(Error::InvalidGeometry(format!(
            "radius {radius} does not fit in strip height {height}"
        )));
    }
    if count == 0 {
        return Err(Error::InvalidGeometry("count must be at least 1".to_string()));
    }
    Ok(())
}

fn floor_div(a: f64, b: f64) -> u64 {
    ((a / b) + EPSILON).floor().max(0.0) as u64
}

fn flat_rows(radius: f64, height: f64) -> u64 {
    floor_div(height, 2.0 * radius)
}

fn square_rows(radius: f64, height: f64) -> u64 {
    flat_rows(radius, height).max(1)
}

fn pointy_rows(radius: f64, height: f64) -> u64 {
    floor_div(height, radius * SQRT_3)
}

fn pointy_column_capacity(column: u64, rows: u64) -> u64 {
    if column % 2 == 0 {
        rows
    } else {
        rows.saturating_sub(1)
    }
}

pub fn square_grid_width(radius: f64, height: f64, count: u32) -> f64 {
    let rows = square_rows(radius, height);
    let columns = u64::from(count).div_ceil(rows);
    2.0 * radius * columns as f64
}

/// Grows the width one diameter at a time until the rows hold `count`.
///
/// Flat rows never hold more than square-grid rows of the same width, so the
/// search starts at the square grid's column count. Row 0 gains a circle per
/// step, which bounds the search to a couple of steps past that start.
pub fn flat_topped_width(radius: f64, height: f64, count: u32) -> Option<f64> {
    let rows = flat_rows(radius, height);
    if rows == 0 {
        return None;
    }
    let diameter = 2.0 * radius;
    let target = u64::from(count);
    let first = target.div_ceil(rows).max(1);
    (first..)
        .map(|steps| steps as f64 * diameter)
        .find(|&width| flat_capacity(width, radius, height) >= target)
}

pub fn pointy_topped_width(radius: f64, height: f64, count: u32) -> Option<f64> {
    let rows = pointy_rows(radius, height);
    if rows == 0 {
        return None;
    }

    // Skip whole column pairs that cannot reach the target yet.
    let target = u64::from(count);
    let pair = rows.saturating_mul(2) - 1;
    let pairs = target.saturating_sub(1) / pair;
    let mut columns = 2 * pairs;
    let mut total = pairs * pair;

    // Every even column adds `rows >= 1`, so this stops within two columns.
    while total < target {
        total = total.saturating_add(pointy_column_capacity(columns, rows));
        columns += 1;
    }

    Some(pointy_width(radius, columns))
}

fn pointy_width(radius: f64, columns: u64) -> f64 {
    if columns <= 1 {
        2.0 * radius
    } else {
        2.0 * radius + (columns - 1) as f64 * radius * SQRT_3
    }
}

pub fn trellis_width(radius: f64, count: u32) -> f64 {
    2.0 * radius * f64::from(count)
}

pub fn square_capacity(width: f64, radius: f64, height: f64) -> u64 {
    square_rows(radius, height).saturating_mul(floor_div(width, 2.0 * radius))
}

pub fn flat_capacity(width: f64, radius: f64, height: f64) -> u64 {
    let diameter = 2.0 * radius;
    let rows = flat_rows(radius, height);
    let even = rows.div_ceil(2).saturating_mul(floor_div(width, diameter));
    let odd = (rows / 2).saturating_mul(floor_div(width - radius, diameter));
    even.saturating_add(odd)
}

pub fn pointy_capacity(width: f64, radius: f64, height: f64) -> u64 {
    let diameter = 2.0 * radius;
    if width + EPSILON < diameter {
        return 0;
    }
    let rows = pointy_rows(radius, height);
    let columns = 1 + floor_div(width - diameter, radius * SQRT_3);
    let even = columns.div_ceil(2).saturating_mul(rows);
    let odd = (columns / 2).saturating_mul(rows.saturating_sub(1));
    even.saturating_add(odd)
}

pub fn trellis_capacity(width: f64, radius: f64) -> u64 {
    floor_div(width, 2.0 * radius)
}

/// Number of circles `width` holds under `strategy`'s layout.
pub fn capacity(strategy: Strategy, width: f64, radius: f64, height: f64) -> u64 {
    match strategy {
        Strategy::SquareGrid => square_capacity(width, radius, height),
        Strategy::FlatTopped => flat_capacity(width, radius, height),
        Strategy::PointyTopped => pointy_capacity(width, radius, height),
        Strategy::Trellis => trellis_capacity(width, radius),
    }
}
