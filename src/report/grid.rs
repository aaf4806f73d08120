//! Aggregation grid: per-(impact, likelihood) counts and annotations

use std::collections::{BTreeSet, HashMap};

use crate::register::risk::{Rating, Risk};

/// Column width the cell annotations are word-wrapped to
pub const NOTE_WRAP_WIDTH: usize = 20;

/// The impact x likelihood aggregation of a register.
///
/// Axes list only the rating values observed in the data, ascending, the
/// same shape a pivot over the records would produce. Each cell carries the
/// record count and the wrapped descriptions of the records in it, in
/// collection order.
#[derive(Debug)]
pub struct HeatGrid {
    impacts: Vec<Rating>,
    likelihoods: Vec<Rating>,
    counts: Vec<Vec<usize>>,
    notes: Vec<Vec<Vec<String>>>,
}

impl HeatGrid {
    /// Aggregate records into the grid
    pub fn build(risks: &[Risk]) -> Self {
        let impacts: Vec<Rating> = risks
            .iter()
            .map(|r| r.impact)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let likelihoods: Vec<Rating> = risks
            .iter()
            .map(|r| r.likelihood)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut impact_index = HashMap::new();
        for (row, impact) in impacts.iter().enumerate() {
            impact_index.insert(*impact, row);
        }
        let mut likelihood_index = HashMap::new();
        for (col, likelihood) in likelihoods.iter().enumerate() {
            likelihood_index.insert(*likelihood, col);
        }

        let mut counts = vec![vec![0usize; likelihoods.len()]; impacts.len()];
        let mut notes: Vec<Vec<Vec<String>>> =
            vec![vec![Vec::new(); likelihoods.len()]; impacts.len()];

        for risk in risks {
            if let (Some(&row), Some(&col)) = (
                impact_index.get(&risk.impact),
                likelihood_index.get(&risk.likelihood),
            ) {
                counts[row][col] += 1;
                notes[row][col].extend(wrap_text(&risk.description, NOTE_WRAP_WIDTH));
            }
        }

        Self {
            impacts,
            likelihoods,
            counts,
            notes,
        }
    }

    /// Impact values present, ascending (row axis)
    pub fn impacts(&self) -> &[Rating] {
        &self.impacts
    }

    /// Likelihood values present, ascending (column axis)
    pub fn likelihoods(&self) -> &[Rating] {
        &self.likelihoods
    }

    /// Count at a (row, col) grid position
    pub fn count(&self, row: usize, col: usize) -> usize {
        self.counts[row][col]
    }

    /// Count for a rating pair; None when either axis value was never observed
    pub fn count_for(&self, impact: Rating, likelihood: Rating) -> Option<usize> {
        let row = self.impacts.iter().position(|i| *i == impact)?;
        let col = self.likelihoods.iter().position(|l| *l == likelihood)?;
        Some(self.counts[row][col])
    }

    /// Wrapped annotation lines at a (row, col) grid position
    pub fn note_lines(&self, row: usize, col: usize) -> &[String] {
        &self.notes[row][col]
    }

    /// Newline-joined annotation at a (row, col) grid position
    pub fn note(&self, row: usize, col: usize) -> String {
        self.notes[row][col].join("\n")
    }

    /// Largest cell count (0 for an empty grid)
    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }
}

/// Wrap text to fit within a maximum width, breaking at word boundaries
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    // Don't wrap if text already fits or width is too small to be useful
    if text.len() <= max_width || max_width < 5 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            // First word on line
            if word.len() > max_width {
                // Word is longer than max width, force break
                let mut remaining = word;
                while remaining.len() > max_width {
                    lines.push(remaining[..max_width].to_string());
                    remaining = &remaining[max_width..];
                }
                current_line = remaining.to_string();
            } else {
                current_line = word.to_string();
            }
        } else if current_line.len() + 1 + word.len() <= max_width {
            // Word fits on current line
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            // Start new line
            lines.push(current_line);
            if word.len() > max_width {
                let mut remaining = word;
                while remaining.len() > max_width {
                    lines.push(remaining[..max_width].to_string());
                    remaining = &remaining[max_width..];
                }
                current_line = remaining.to_string();
            } else {
                current_line = word.to_string();
            }
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
