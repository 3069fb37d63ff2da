use crate::solver::Plan;
use crate::types::Container;

const MAX_WIDTH: f64 = 80.0;
const BAR_HEIGHT: usize = 2;

/// Draws one bed row as a bar, each segment boxed and labelled in place.
pub fn render_container(plan: &Plan, container: &Container) -> String {
    let capacity = plan.report.capacity;
    if capacity <= 0.0 {
        return String::new();
    }
    let scale = MAX_WIDTH / capacity;
    let grid_w = (capacity * scale).round() as usize;

    let mut grid = vec![vec![' '; grid_w + 1]; BAR_HEIGHT + 1];

    // Bed border first
    draw_box(&mut grid, 0, grid_w);

    let mut offset = 0.0;
    for segment in &container.segments {
        let sx = (offset * scale).round() as usize;
        let ex = ((offset + segment.width) * scale).round() as usize;
        offset += segment.width;

        if ex <= sx {
            continue;
        }
        draw_box(&mut grid, sx, ex - sx);

        let label = format!("{} {:.0}", plan.segment_label(segment), segment.width);
        write_label(&mut grid[BAR_HEIGHT / 2], sx, ex, &label);
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

/// Centers `label` strictly inside the `(sx, ex)` span, cut to fit.
fn write_label(row: &mut [char], sx: usize, ex: usize, label: &str) {
    let inner = ex.saturating_sub(sx + 1);
    if inner == 0 {
        return;
    }
    let chars: Vec<char> = label.chars().take(inner).collect();
    let start = sx + 1 + (inner - chars.len()) / 2;
    for (i, &ch) in chars.iter().enumerate() {
        if let Some(cell) = row.get_mut(start + i) {
            *cell = ch;
        }
    }
}

#[allow(clippy::needless_range_loop)]
fn draw_box(grid: &mut [Vec<char>], x: usize, w: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };
    let bottom = rows - 1;

    // Horizontal edges
    for i in x..=x + w {
        if i < cols {
            for y in [0, bottom] {
                grid[y][i] = if grid[y][i] == '|' || grid[y][i] == '+' {
                    '+'
                } else {
                    '-'
                };
            }
        }
    }

    // Vertical edges
    for j in 0..rows {
        for cx in [x, x + w] {
            if cx < cols {
                grid[j][cx] = if grid[j][cx] == '-' || grid[j][cx] == '+' {
                    '+'
                } else {
                    '|'
                };
            }
        }
    }

    // Corners
    for cx in [x, x + w] {
        if cx < cols {
            grid[0][cx] = '+';
            grid[bottom][cx] = '+';
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::solver::Planner;
    use crate::types::Requirement;

    fn plan_for(crops: Vec<Requirement>) -> Plan {
        Planner::new(PlanConfig::default(), crops).solve().unwrap()
    }

    #[test]
    fn test_render_single_segment() {
        let plan = plan_for(vec![Requirement::new("cabbage", 6.0, 60)]);
        let output = render_container(&plan, &plan.report.containers[0]);
        assert!(output.contains('+'));
        assert!(output.contains('-'));
        assert!(output.contains('|'));
        assert!(output.contains("cabbage"));
        assert_eq!(output.lines().count(), BAR_HEIGHT + 1);
    }

    #[test]
    fn test_render_split_labels() {
        let plan = plan_for(vec![Requirement::new("corn", 6.0, 100)]);
        let first = render_container(&plan, &plan.report.containers[0]);
        assert!(first.contains("corn#1 360"));
    }

    #[test]
    fn test_render_lines_fit_width() {
        let plan = plan_for(vec![
            Requirement::new("kale", 6.0, 40),
            Requirement::new("garlic", 2.0, 50),
            Requirement::new("carrots", 1.5, 120),
        ]);
        for container in &plan.report.containers {
            let output = render_container(&plan, container);
            for line in output.lines() {
                assert!(line.chars().count() <= MAX_WIDTH as usize + 1);
            }
        }
    }

    #[test]
    fn test_render_empty_container() {
        let plan = plan_for(vec![]);
        let empty = Container {
            remaining: 360.0,
            segments: vec![],
        };
        let output = render_container(&plan, &empty);
        // Should still draw the bed border
        assert!(output.starts_with('+'));
    }
}
