// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, candidates, cross_set, matrix};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementReject {
    OutOfBounds,
    Mismatch,
    CrossCheck,
    RackShort,
    NoTilesPlaced,
}

impl std::fmt::Display for PlacementReject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PlacementReject::OutOfBounds => "word runs off the board",
            PlacementReject::Mismatch => "board tile does not match the word",
            PlacementReject::CrossCheck => "letter fails the perpendicular word",
            PlacementReject::RackShort => "rack cannot supply the letter",
            PlacementReject::NoTilesPlaced => "no tile would be placed",
        })
    }
}

#[derive(Clone, Debug)]
pub struct Candidate {
    pub word: String,
    pub axis: matrix::Axis,
    pub placement: Vec<board::PlacedTile>,
}

// Lays word along axis so that its offset-th letter lands on anchor.
// Rack slots are claimed in a local bitmask; the rack itself is untouched.
pub fn try_place(
    board: &board::Board,
    word: &str,
    rack: &[board::Tile],
    anchor: (i8, i8),
    axis: matrix::Axis,
    offset: i8,
    cross_sets: &cross_set::CrossSets,
) -> Result<Vec<board::PlacedTile>, PlacementReject> {
    let word = word.as_bytes();
    if word.is_empty() {
        return Err(PlacementReject::NoTilesPlaced);
    }
    let dim = board.dim();
    let (dr, dc) = axis.delta();
    let (dr, dc) = (dr as i16, dc as i16);
    let last = word.len() as i16 - 1;
    let start_row = anchor.0 as i16 - dr * offset as i16;
    let start_col = anchor.1 as i16 - dc * offset as i16;
    let in_bounds = |r: i16, c: i16| r >= 0 && c >= 0 && r < dim.rows as i16 && c < dim.cols as i16;
    if !in_bounds(start_row, start_col) || !in_bounds(start_row + dr * last, start_col + dc * last) {
        return Err(PlacementReject::OutOfBounds);
    }

    let mut used = 0u32;
    let mut placed = Vec::with_capacity(word.len());
    for (k, &letter) in (0i16..).zip(word) {
        let row = (start_row + dr * k) as i8;
        let col = (start_col + dc * k) as i8;
        if let Some(existing) = board.letter_at(row, col) {
            if existing != letter {
                return Err(PlacementReject::Mismatch);
            }
            continue;
        }
        if !cross_sets.allows(axis, row, col, letter) {
            return Err(PlacementReject::CrossCheck);
        }
        let slot = find_slot(rack, used, |tile| !tile.is_wildcard() && tile.letter == letter)
            .or_else(|| find_slot(rack, used, |tile| tile.is_wildcard()))
            .ok_or(PlacementReject::RackShort)?;
        used |= 1 << slot;
        let tile = &rack[slot];
        placed.push(board::PlacedTile {
            row,
            col,
            tile: if tile.is_wildcard() {
                tile.bound_to(letter)
            } else {
                *tile
            },
        });
    }
    if placed.is_empty() {
        return Err(PlacementReject::NoTilesPlaced);
    }
    Ok(placed)
}

#[inline(always)]
fn find_slot<F: Fn(&board::Tile) -> bool>(rack: &[board::Tile], used: u32, f: F) -> Option<usize> {
    rack.iter()
        .take(candidates::MAX_SLOTS)
        .enumerate()
        .position(|(i, tile)| used & (1 << i) == 0 && f(tile))
}

// One-tile plays on an empty anchor. Every distinct rack letter, and every
// letter a wildcard could stand for, that satisfies both perpendicular
// constraints there. A wildcard is only used for letters the rack lacks.
pub fn single_tile_hooks(
    board: &board::Board,
    rack: &[board::Tile],
    anchor: (i8, i8),
    cross_sets: &cross_set::CrossSets,
) -> Vec<Candidate> {
    let (row, col) = anchor;
    if !board.dim().contains(row, col) || board.is_occupied(row, col) {
        return Vec::new();
    }
    let allowed = cross_sets.for_placement(matrix::Axis::Across, row, col)
        & cross_sets.for_placement(matrix::Axis::Down, row, col);
    let mut seen = 0u32;
    let mut hooks = Vec::new();
    let push = |tile: board::Tile, hooks: &mut Vec<Candidate>| {
        hooks.push(Candidate {
            word: (tile.letter as char).to_string(),
            axis: matrix::Axis::Across,
            placement: vec![board::PlacedTile { row, col, tile }],
        });
    };
    for tile in rack.iter().filter(|tile| !tile.is_wildcard()) {
        let bit = cross_set::letter_bit(tile.letter);
        if allowed & bit != 0 && seen & bit == 0 {
            seen |= bit;
            push(*tile, &mut hooks);
        }
    }
    if let Some(wildcard) = rack.iter().find(|tile| tile.is_wildcard()) {
        for letter in cross_set::letters_of(allowed & !seen) {
            push(wildcard.bound_to(letter), &mut hooks);
        }
    }
    hooks
}

pub type PlacementKey = Vec<(i8, i8, u8, bool)>;

// identical for any two placements that put the same tiles in the same cells.
pub fn placement_key(placement: &[board::PlacedTile]) -> PlacementKey {
    let mut key = placement
        .iter()
        .map(|p| (p.row, p.col, p.tile.letter, p.tile.is_blank))
        .collect::<Vec<_>>();
    key.sort_unstable();
    key
}
