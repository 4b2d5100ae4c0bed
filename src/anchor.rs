// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, cross_set};

// Cells a new word may be hung on, in row-major order.
//
// Ordinarily these are the cells cross_sets flags as next to a tile, or the
// start cells of an empty board. Under the independent-start rule only free start cells
// count, regardless of what is already on the board.
pub fn find_anchors(
    board: &board::Board,
    cross_sets: &cross_set::CrossSets,
    independent_start: bool,
) -> Vec<(i8, i8)> {
    let dim = board.dim();
    if independent_start || board.is_empty_board() {
        let mut anchors = board
            .start_cells()
            .filter(|cell| cell.tile.is_none())
            .map(|cell| (cell.row, cell.col))
            .collect::<Vec<_>>();
        if anchors.is_empty() && !board.has_start_cell() {
            let (row, col) = dim.center();
            if !board.is_occupied(row, col) {
                anchors.push((row, col));
            }
        }
        return anchors;
    }
    let mut anchors = Vec::new();
    for row in 0..dim.rows {
        for col in 0..dim.cols {
            if cross_sets.is_anchor(row, col) {
                anchors.push((row, col));
            }
        }
    }
    anchors
}
