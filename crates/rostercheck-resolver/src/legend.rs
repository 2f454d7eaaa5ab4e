//! Legend table reading and cell classification.

use rostercheck_core::{Assignment, Cell, Grid, LegendEntry};
use tracing::warn;

/// Build the ordered legend from label/appearance blocks.
///
/// Blocks are concatenated in order; within a block, each row contributes
/// one entry from its first (label) and second (appearance) cells. Rows
/// without a label are skipped. A white, blank "Not assigned" entry closes
/// the list.
pub fn legend_from_grids(grids: &[Grid]) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = grids
        .iter()
        .flat_map(|grid| {
            (0..grid.rows.len()).filter_map(move |row| {
                let label = grid.cell(row, 0)?.text();
                if label.trim().is_empty() {
                    return None;
                }
                let appearance = grid
                    .cell(row, 1)
                    .map(|cell| cell.to_cell())
                    .unwrap_or_default();
                Some(LegendEntry::new(label, appearance))
            })
        })
        .collect();
    entries.push(LegendEntry::not_assigned());
    entries
}

/// Classify one roster cell.
///
/// Unfilled cells are holidays whatever their text. Otherwise the first
/// legend entry with the same text and color wins; with no match the raw
/// cell is returned under a "Key not found" label.
pub fn classify(cell: &Cell, legend: &[LegendEntry]) -> Assignment {
    if cell.is_unfilled() {
        return Assignment::holiday(cell);
    }
    match legend.iter().find(|entry| entry.matches(cell)) {
        Some(entry) => Assignment::matched(entry),
        None => {
            warn!(text = %cell.text, color = ?cell.background, "cell matches no legend entry");
            Assignment::key_not_found(cell)
        }
    }
}
