//! Turning a pointer drag into a straight run of cells, and matching that run
//! against a word search's placements.

use crate::{grid::Cell, placement::Placement};

/// Cells covered by a drag, in drag order.
pub type CellPath = Vec<Cell>;

/// The straight line from `start` to `end`, both included.
///
/// Returns `None` unless the drag is horizontal, vertical or an exact
/// diagonal. A drag that never left `start` is a one-cell path.
pub fn resolve_path(start: Cell, end: Cell) -> Option<CellPath> {
    let drow = end.row as isize - start.row as isize;
    let dcol = end.col as isize - start.col as isize;
    let steps = drow.abs().max(dcol.abs());
    if steps == 0 {
        return Some(vec![start]);
    }
    if drow % steps != 0 || dcol % steps != 0 {
        return None;
    }

    let (step_row, step_col) = (drow / steps, dcol / steps);
    (0..=steps)
        .map(|i| {
            Some(Cell::new(
                start.row.checked_add_signed(step_row * i)?,
                start.col.checked_add_signed(step_col * i)?,
            ))
        })
        .collect()
}

/// The first placement in `placements` not yet found whose cells equal `path`,
/// read forwards or backwards.
pub fn match_placement<'p>(
    path: &[Cell],
    placements: &'p [Placement],
    is_found: impl Fn(&Placement) -> bool,
) -> Option<&'p Placement> {
    placements
        .iter()
        .filter(|placement| !is_found(placement))
        .find(|placement| {
            placement.cells.as_slice() == path || placement.cells.iter().rev().eq(path.iter())
        })
}
