use std::collections::BTreeMap;

use crate::puzzle::DataContractError;

/// Fill color applied to every freshly changed cell.
pub const HIGHLIGHT_COLOR: &str = "#ffd96e";

/// How long a highlight batch survives before the whole map is cleared.
pub const HIGHLIGHT_DECAY_MS: u32 = 4_000;

/// Transient highlights keyed by cell index. Populated in one batch per
/// reconciliation and cleared in bulk after the decay window, never expired
/// per cell.
pub type HighlightMap = BTreeMap<usize, &'static str>;

/// Compares two answer snapshots and returns the cells to highlight.
///
/// A cell counts as changed when the incoming value is non-empty and the
/// previous value was empty or different. Only forward progress lights up:
/// clearing a cell or re-entering the identical value is not a change.
///
/// Both snapshots must have the puzzle's cell count; a length mismatch is an
/// upstream inconsistency and fails without a partial result.
pub fn reconcile(
    previous: &[String],
    incoming: &[String],
) -> Result<HighlightMap, DataContractError> {
    if previous.len() != incoming.len() {
        return Err(DataContractError::SnapshotLength {
            expected: previous.len(),
            found: incoming.len(),
        });
    }
    let mut changed = HighlightMap::new();
    for (index, cell) in incoming.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        if previous[index].is_empty() || previous[index] != *cell {
            changed.insert(index, HIGHLIGHT_COLOR);
        }
    }
    Ok(changed)
}
