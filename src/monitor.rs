use crate::grid::{Cell, Grid, Position};

/// True when any node of `path` has since become a dynamic wall.
///
/// Pure query; deciding what to do about a blocked route is up to the caller.
pub fn path_blocked(grid: &Grid, path: &[Position]) -> bool {
    blocked_positions(grid, path).next().is_some()
}

/// The nodes of `path` currently occupied by dynamic walls, in path order.
pub fn blocked_positions<'a>(
    grid: &'a Grid,
    path: &'a [Position],
) -> impl Iterator<Item = Position> + 'a {
    path.iter()
        .copied()
        .filter(move |&pos| grid.cell(pos) == Some(Cell::DynamicWall))
}
