use crate::error::SearchError;
use crate::grid::Position;
use rustc_hash::FxHashMap;

/// Walks `parent` back from `terminal` to `start` and returns the route in
/// start-to-terminal order.
///
/// Fails when the chain dead-ends or loops before reaching `start`.
pub fn reconstruct_path(
    parent: &FxHashMap<Position, Position>,
    start: Position,
    terminal: Position,
) -> Result<Vec<Position>, SearchError> {
    let broken = || SearchError::BrokenParentChain { start, terminal };

    let mut path = vec![terminal];
    let mut node = terminal;
    while node != start {
        // A chain longer than the map has entries must revisit a node.
        if path.len() > parent.len() + 1 {
            return Err(broken());
        }
        node = *parent.get(&node).ok_or_else(broken)?;
        path.push(node);
    }
    path.reverse();
    Ok(path)
}
