// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, matrix, trie};

// bit i set means letter b'A' + i is allowed.
pub const ALL_LETTERS: u32 = (1 << alphabet::NUM_LETTERS) - 1;

#[inline(always)]
pub fn letter_bit(letter: u8) -> u32 {
    match alphabet::Alphabet::index_of(letter) {
        Some(idx) => 1 << idx,
        None => 0,
    }
}

// Derived from one board snapshot; never patched in place.
pub struct CrossSets {
    dim: matrix::Dim,
    for_across_plays: Box<[u32]>, // constrained by the vertical neighbors
    for_down_plays: Box<[u32]>,   // constrained by the horizontal neighbors
    anchors: Box<[bool]>,         // empty and next to a tile
}

// letters L such that (tiles before) + L + (tiles after) along perpendicular_axis
// is a word. ALL_LETTERS if there is nothing on either side.
fn gen_cross_set(
    board: &board::Board,
    trie: &trie::Trie,
    row: i8,
    col: i8,
    perpendicular_axis: matrix::Axis,
    word_buffer: &mut Vec<u8>,
) -> u32 {
    let (r, c) = perpendicular_axis.step(row, col, -1);
    let has_before = board.is_occupied(r, c);
    let (r, c) = perpendicular_axis.step(row, col, 1);
    let has_after = board.is_occupied(r, c);
    if !has_before && !has_after {
        return ALL_LETTERS;
    }

    let mut n = 1;
    loop {
        let (r, c) = perpendicular_axis.step(row, col, -n);
        if !board.is_occupied(r, c) {
            break;
        }
        n += 1;
    }
    word_buffer.clear();
    for k in (1..n).rev() {
        let (r, c) = perpendicular_axis.step(row, col, -k);
        if let Some(letter) = board.letter_at(r, c) {
            word_buffer.push(letter);
        }
    }
    let Some(p) = trie.walk(trie.root(), word_buffer.iter().copied()) else {
        return 0;
    };

    word_buffer.clear();
    for k in 1.. {
        let (r, c) = perpendicular_axis.step(row, col, k);
        match board.letter_at(r, c) {
            Some(letter) => word_buffer.push(letter),
            None => break,
        }
    }

    let mut bits = 0;
    for (letter, q) in trie.children(p) {
        if trie
            .walk(q, word_buffer.iter().copied())
            .is_some_and(|q| trie.accepts(q))
        {
            bits |= letter_bit(letter);
        }
    }
    bits
}

impl CrossSets {
    pub fn compute(board: &board::Board, trie: &trie::Trie) -> Self {
        let dim = board.dim();
        let mut for_across_plays = vec![0u32; dim.len()].into_boxed_slice();
        let mut for_down_plays = vec![0u32; dim.len()].into_boxed_slice();
        let mut anchors = vec![false; dim.len()].into_boxed_slice();
        let mut word_buffer = Vec::with_capacity(std::cmp::max(dim.rows, dim.cols) as usize);
        for row in 0..dim.rows {
            for col in 0..dim.cols {
                if board.is_occupied(row, col) {
                    continue;
                }
                let idx = dim.at_row_col(row, col);
                for_across_plays[idx] =
                    gen_cross_set(board, trie, row, col, matrix::Axis::Down, &mut word_buffer);
                for_down_plays[idx] =
                    gen_cross_set(board, trie, row, col, matrix::Axis::Across, &mut word_buffer);
                anchors[idx] = board.touches_tile(row, col);
            }
        }
        Self {
            dim,
            for_across_plays,
            for_down_plays,
            anchors,
        }
    }

    // the set a tile placed at (row, col) by a play along axis must satisfy.
    // zero for occupied or out-of-bounds cells.
    #[inline(always)]
    pub fn for_placement(&self, axis: matrix::Axis, row: i8, col: i8) -> u32 {
        if !self.dim.contains(row, col) {
            return 0;
        }
        let idx = self.dim.at_row_col(row, col);
        match axis {
            matrix::Axis::Across => self.for_across_plays[idx],
            matrix::Axis::Down => self.for_down_plays[idx],
        }
    }

    #[inline(always)]
    pub fn allows(&self, axis: matrix::Axis, row: i8, col: i8, letter: u8) -> bool {
        self.for_placement(axis, row, col) & letter_bit(letter) != 0
    }

    #[inline(always)]
    pub fn is_anchor(&self, row: i8, col: i8) -> bool {
        self.dim.contains(row, col) && self.anchors[self.dim.at_row_col(row, col)]
    }
}

pub fn letters_of(bits: u32) -> impl Iterator<Item = u8> {
    (0..alphabet::NUM_LETTERS)
        .filter(move |&idx| bits & (1 << idx) != 0)
        .map(alphabet::Alphabet::letter_at)
}
