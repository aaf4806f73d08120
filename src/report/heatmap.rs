//! Terminal heatmap rendering for the aggregation grid

use console::{style, Term};
use std::io;

use crate::report::grid::{HeatGrid, NOTE_WRAP_WIDTH};

/// Width of one heatmap cell (annotation width plus padding)
const CELL_WIDTH: usize = NOTE_WRAP_WIDTH + 2;

/// Width of the row-label column ("Impact")
const LABEL_WIDTH: usize = 6;

/// Render the heatmap as a string.
///
/// Color intensity encodes the per-cell count relative to the maximum;
/// each cell is overlaid with its wrapped description lines. Assumes a
/// non-empty grid (generation refuses an empty register upstream).
pub fn render(organization: &str, grid: &HeatGrid) -> String {
    let mut output = String::new();
    let grid_width = grid.likelihoods().len() * CELL_WIDTH;
    let max_count = grid.max_count();

    // Title
    output.push_str(&format!(
        "{}\n\n",
        style(format!("{} Risk Heatmap", organization)).bold().cyan()
    ));

    // Column axis label, centered over the grid area
    output.push_str(&format!(
        "{:label$}{:^grid$}\n",
        "",
        "Likelihood",
        label = LABEL_WIDTH,
        grid = grid_width
    ));

    // Column headers
    output.push_str(&format!("{:<label$}", "Impact", label = LABEL_WIDTH));
    for likelihood in grid.likelihoods() {
        output.push_str(&format!("{:^cell$}", likelihood, cell = CELL_WIDTH));
    }
    output.push('\n');
    output.push_str(&separator(grid_width));

    // Rows: first line carries the impact label and counts, the following
    // lines carry the wrapped annotations
    for (row, impact) in grid.impacts().iter().enumerate() {
        let height = (0..grid.likelihoods().len())
            .map(|col| grid.note_lines(row, col).len())
            .max()
            .unwrap_or(0);

        output.push_str(&format!("{:>label$}", impact, label = LABEL_WIDTH));
        for col in 0..grid.likelihoods().len() {
            output.push_str(&centered_count(grid.count(row, col), max_count));
        }
        output.push('\n');

        for line in 0..height {
            output.push_str(&format!("{:label$}", "", label = LABEL_WIDTH));
            for col in 0..grid.likelihoods().len() {
                let text = grid
                    .note_lines(row, col)
                    .get(line)
                    .map(String::as_str)
                    .unwrap_or("");
                output.push_str(&format!(" {:<cell$}", text, cell = CELL_WIDTH - 1));
            }
            output.push('\n');
        }

        output.push_str(&separator(grid_width));
    }

    output
}

/// Print the heatmap and block until the user dismisses it
pub fn show(organization: &str, grid: &HeatGrid) -> io::Result<()> {
    println!("{}", render(organization, grid));
    println!("{}", style("Press Enter to close the heatmap.").dim());
    Term::stdout().read_line()?;
    Ok(())
}

fn separator(grid_width: usize) -> String {
    format!(
        "{}\n",
        style(format!(
            "{:-<label$}{:-<grid$}",
            "",
            "",
            label = LABEL_WIDTH,
            grid = grid_width
        ))
        .dim()
    )
}

/// Center a count in a cell, colored by intensity relative to the maximum.
/// Padding is computed on the raw digits so styling never skews alignment.
fn centered_count(count: usize, max_count: usize) -> String {
    let raw = count.to_string();
    let pad = CELL_WIDTH.saturating_sub(raw.len());
    let left = pad / 2;
    let right = pad - left;
    format!(
        "{}{}{}",
        " ".repeat(left),
        styled_count(count, max_count),
        " ".repeat(right)
    )
}

fn styled_count(count: usize, max_count: usize) -> String {
    let text = count.to_string();
    if count == 0 || max_count == 0 {
        return style(text).dim().to_string();
    }

    let ratio = count as f64 / max_count as f64;
    if ratio <= 1.0 / 3.0 {
        style(text).green().to_string()
    } else if ratio <= 2.0 / 3.0 {
        style(text).yellow().to_string()
    } else {
        style(text).red().bold().to_string()
    }
}
