//! ui::render
//!
//! Plain-text rendering of a [`GraphLayout`].
//!
//! # Format
//!
//! One row per node. Lane `n` occupies column `2n`; the column between two
//! lanes carries connectors. A node is drawn as `*`, an edge passing a row
//! as `|` in its child's lane, and a branch or merge edge bends into its
//! parent with `/` or `\` on the parent's row.
//!
//! ```text
//! *     3f2a9c1 (main) Merge topic
//! |\*   8d01b7e (topic) Add topic
//! * |   c41f0aa Fix main
//!  \*   0b5e2d4 Initial
//! ```

use std::collections::HashMap;

use crate::core::graph::GraphLayout;
use crate::core::types::{Color, Commit};

/// Number of sha characters shown per row.
pub const SHORT_SHA_LEN: usize = 7;

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit 24-bit ANSI colors for edges
    pub color: bool,
}

#[derive(Debug, Clone, Copy)]
struct Cell<'c> {
    ch: char,
    color: Option<&'c Color>,
}

impl Cell<'static> {
    const BLANK: Self = Cell {
        ch: ' ',
        color: None,
    };
}

impl Cell<'_> {
    fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

/// Render `layout` as text lines.
///
/// `commits` supplies summaries; nodes without a matching commit render
/// with the sha alone.
pub fn render(layout: &GraphLayout<'_>, commits: &[Commit], options: RenderOptions) -> Vec<String> {
    let summaries: HashMap<&str, &str> = commits
        .iter()
        .map(|c| (c.sha.as_str(), c.summary.as_str()))
        .collect();

    let grid = grid(layout);
    let width = grid.iter().map(|row| visible_width(row)).max().unwrap_or(0);

    layout
        .nodes
        .iter()
        .zip(grid.iter())
        .map(|(node, row)| {
            let mut line = paint(row, options.color);
            line.push_str(&" ".repeat(width - visible_width(row) + 2));

            let short: String = node.sha.chars().take(SHORT_SHA_LEN).collect();
            line.push_str(&short);

            if !node.labels.is_empty() {
                line.push_str(&format!(" ({})", node.labels.join(", ")));
            }

            match summaries.get(node.sha) {
                Some(summary) if !summary.is_empty() => {
                    line.push(' ');
                    line.push_str(summary);
                }
                _ => {}
            }

            line
        })
        .collect()
}

/// Lay nodes and edges into a character grid, one row per node.
fn grid<'c>(layout: &'c GraphLayout<'_>) -> Vec<Vec<Cell<'c>>> {
    let columns = (layout.lane_count() * 2).max(1);
    let mut grid = vec![vec![Cell::BLANK; columns]; layout.nodes.len()];

    let positions: HashMap<&str, (usize, usize)> = layout
        .nodes
        .iter()
        .enumerate()
        .map(|(row, node)| (node.sha, (row, node.lane)))
        .collect();

    for (row, node) in layout.nodes.iter().enumerate() {
        grid[row][node.lane * 2] = Cell {
            ch: '*',
            color: None,
        };
    }

    for edge in &layout.edges {
        let (Some(&(child_row, child_lane)), Some(&(parent_row, parent_lane))) =
            (positions.get(edge.from_sha), positions.get(edge.to_sha))
        else {
            continue;
        };
        let color = Some(&edge.color);

        for row in grid.iter_mut().take(parent_row).skip(child_row + 1) {
            put(row, child_lane * 2, '|', color);
        }

        let row = &mut grid[parent_row];
        if child_lane > parent_lane {
            put(row, parent_lane * 2 + 1, '/', color);
            for column in parent_lane * 2 + 2..child_lane * 2 {
                put(row, column, '-', color);
            }
        } else if child_lane < parent_lane {
            put(row, parent_lane * 2 - 1, '\\', color);
            for column in child_lane * 2 + 1..parent_lane * 2 - 1 {
                put(row, column, '-', color);
            }
        }
    }

    grid
}

fn put<'c>(row: &mut [Cell<'c>], column: usize, ch: char, color: Option<&'c Color>) {
    if let Some(cell) = row.get_mut(column) {
        if cell.is_blank() {
            *cell = Cell { ch, color };
        }
    }
}

fn visible_width(row: &[Cell<'_>]) -> usize {
    row.iter().rposition(|c| !c.is_blank()).map_or(0, |i| i + 1)
}

fn paint(row: &[Cell<'_>], color: bool) -> String {
    let mut out = String::new();
    for cell in &row[..visible_width(row)] {
        match cell.color {
            Some(c) if color => {
                let (r, g, b) = c.rgb();
                out.push_str(&format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, cell.ch));
            }
            _ => out.push(cell.ch),
        }
    }
    out
}
