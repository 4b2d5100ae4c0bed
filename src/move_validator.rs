// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, matrix};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnRules {
    pub first_move: bool,
    pub player_move_count: u32,
    pub independent_start: bool,
}

impl TurnRules {
    #[inline(always)]
    pub fn independent_start_active(&self) -> bool {
        self.independent_start && self.player_move_count == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    BadCoordinates,
    UnboundTile,
    NonLinear,
    Gap,
    IndependentStartMissesStart,
    IndependentStartTouches,
    MustCoverStart,
    NeedsTwoTiles,
    Disconnected,
    NoWordFormed,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Rejection::Empty => "no tiles placed",
            Rejection::BadCoordinates => "tile off the board, doubled up, or on an occupied cell",
            Rejection::UnboundTile => "wildcard not bound to a letter",
            Rejection::NonLinear => "tiles not in one row or column",
            Rejection::Gap => "gap in the word",
            Rejection::IndependentStartMissesStart => "first move must cover a free start cell",
            Rejection::IndependentStartTouches => "first move must stand apart from other tiles",
            Rejection::MustCoverStart => "first move must cover the start cell",
            Rejection::NeedsTwoTiles => "first move needs at least two tiles",
            Rejection::Disconnected => "move does not connect to the board",
            Rejection::NoWordFormed => "no word formed",
        })
    }
}

#[derive(Clone, Debug)]
pub struct ValidatedMove {
    pub axis: matrix::Axis,
    pub formed_words: Vec<String>, // main word first
    pub placement: Vec<board::PlacedTile>,
}

// The board as it would look with the placement on it.
pub struct Overlay<'a> {
    board: &'a board::Board,
    placed: &'a [board::PlacedTile],
}

impl<'a> Overlay<'a> {
    pub fn new(board: &'a board::Board, placed: &'a [board::PlacedTile]) -> Self {
        Self { board, placed }
    }

    #[inline(always)]
    pub fn board(&self) -> &'a board::Board {
        self.board
    }

    #[inline(always)]
    pub fn placed_at(&self, row: i8, col: i8) -> Option<&'a board::PlacedTile> {
        self.placed.iter().find(|p| p.row == row && p.col == col)
    }

    #[inline(always)]
    pub fn tile_at(&self, row: i8, col: i8) -> Option<&'a board::Tile> {
        match self.placed_at(row, col) {
            Some(p) => Some(&p.tile),
            None => self.board.tile_at(row, col),
        }
    }

    // the maximal run of tiles through (row, col) along axis, in reading order.
    pub fn run(&self, row: i8, col: i8, axis: matrix::Axis) -> Vec<(i8, i8)> {
        let mut lo = 0;
        while self.tile_at_step(row, col, axis, lo - 1).is_some() {
            lo -= 1;
        }
        let mut hi = 0;
        while self.tile_at_step(row, col, axis, hi + 1).is_some() {
            hi += 1;
        }
        (lo..=hi).map(|n| axis.step(row, col, n)).collect()
    }

    #[inline(always)]
    fn tile_at_step(&self, row: i8, col: i8, axis: matrix::Axis, n: i8) -> Option<&'a board::Tile> {
        let (r, c) = axis.step(row, col, n);
        if self.board.dim().contains(r, c) {
            self.tile_at(r, c)
        } else {
            None
        }
    }

    pub fn word(&self, cells: &[(i8, i8)]) -> String {
        cells
            .iter()
            .filter_map(|&(r, c)| self.tile_at(r, c))
            .map(|tile| tile.letter as char)
            .collect()
    }
}

// A lone tile goes across if it has horizontal neighbors or no neighbors at
// all, otherwise down. None if the tiles share neither a row nor a column.
pub fn placement_axis(board: &board::Board, placed: &[board::PlacedTile]) -> Option<matrix::Axis> {
    let first = placed.first()?;
    if placed.len() == 1 {
        let horizontal =
            board.is_occupied(first.row, first.col - 1) || board.is_occupied(first.row, first.col + 1);
        let vertical =
            board.is_occupied(first.row - 1, first.col) || board.is_occupied(first.row + 1, first.col);
        return Some(if horizontal || !vertical {
            matrix::Axis::Across
        } else {
            matrix::Axis::Down
        });
    }
    if placed.iter().all(|p| p.row == first.row) {
        Some(matrix::Axis::Across)
    } else if placed.iter().all(|p| p.col == first.col) {
        Some(matrix::Axis::Down)
    } else {
        None
    }
}

pub fn validate_move(
    board: &board::Board,
    placed: &[board::PlacedTile],
    rules: &TurnRules,
) -> Result<ValidatedMove, Rejection> {
    if placed.is_empty() {
        return Err(Rejection::Empty);
    }
    let dim = board.dim();
    for (i, p) in placed.iter().enumerate() {
        if !dim.contains(p.row, p.col)
            || board.is_occupied(p.row, p.col)
            || placed[..i].iter().any(|q| q.row == p.row && q.col == p.col)
        {
            return Err(Rejection::BadCoordinates);
        }
        if !p.tile.letter.is_ascii_uppercase() {
            return Err(Rejection::UnboundTile);
        }
    }
    let axis = placement_axis(board, placed).ok_or(Rejection::NonLinear)?;

    let first = &placed[0];
    let (lo, hi) = placed.iter().fold((i8::MAX, i8::MIN), |(lo, hi), p| {
        let n = axis.along(p.row, p.col);
        (lo.min(n), hi.max(n))
    });
    let overlay = Overlay::new(board, placed);
    let mut connected = false;
    for n in lo..=hi {
        let (r, c) = match axis {
            matrix::Axis::Across => (first.row, n),
            matrix::Axis::Down => (n, first.col),
        };
        if overlay.placed_at(r, c).is_some() {
            continue;
        }
        if !board.is_occupied(r, c) {
            return Err(Rejection::Gap);
        }
        connected = true;
    }
    let touches = connected || placed.iter().any(|p| board.touches_tile(p.row, p.col));

    if rules.independent_start_active() {
        if !placed.iter().any(|p| board.is_start(p.row, p.col)) {
            return Err(Rejection::IndependentStartMissesStart);
        }
        if touches {
            return Err(Rejection::IndependentStartTouches);
        }
    } else if rules.first_move || board.is_empty_board() {
        if !placed.iter().any(|p| board.is_start(p.row, p.col)) {
            return Err(Rejection::MustCoverStart);
        }
        if placed.len() < 2 {
            return Err(Rejection::NeedsTwoTiles);
        }
    } else if !touches {
        return Err(Rejection::Disconnected);
    }

    let mut formed_words = Vec::new();
    let main_run = overlay.run(first.row, first.col, axis);
    if main_run.len() > 1 {
        formed_words.push(overlay.word(&main_run));
    }
    for p in placed {
        let cross_run = overlay.run(p.row, p.col, axis.perpendicular());
        if cross_run.len() > 1 {
            formed_words.push(overlay.word(&cross_run));
        }
    }
    if formed_words.is_empty() {
        return Err(Rejection::NoWordFormed);
    }
    Ok(ValidatedMove {
        axis,
        formed_words,
        placement: placed.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alphabet::ENGLISH_ALPHABET,
        board_layout::{BoardLayout, make_standard_board_layout},
    };

    fn at(row: i8, col: i8, letter: u8) -> board::PlacedTile {
        board::PlacedTile {
            row,
            col,
            tile: board::Tile::new(100 + (row as u32) * 15 + col as u32, letter, 1, 0),
        }
    }

    fn cat_board() -> board::Board {
        let mut rows = vec!["...............".to_string(); 15];
        rows[7] = ".......CAT.....".to_string();
        board::Board::from_strings(&make_standard_board_layout(), &ENGLISH_ALPHABET, &rows).unwrap()
    }

    const FIRST: TurnRules = TurnRules {
        first_move: true,
        player_move_count: 0,
        independent_start: false,
    };

    const LATER: TurnRules = TurnRules {
        first_move: false,
        player_move_count: 1,
        independent_start: false,
    };

    #[test]
    fn first_move_rules() {
        let board = board::Board::new(&make_standard_board_layout());
        assert_eq!(
            validate_move(&board, &[at(7, 7, b'A')], &FIRST).unwrap_err(),
            Rejection::NeedsTwoTiles
        );
        assert_eq!(
            validate_move(&board, &[at(0, 0, b'A'), at(0, 1, b'T')], &FIRST).unwrap_err(),
            Rejection::MustCoverStart
        );
        let mv = validate_move(
            &board,
            &[at(7, 7, b'C'), at(7, 8, b'A'), at(7, 9, b'T')],
            &FIRST,
        )
        .unwrap();
        assert_eq!(mv.axis, matrix::Axis::Across);
        assert_eq!(mv.formed_words, vec!["CAT".to_string()]);
    }

    #[test]
    fn shape_rejections() {
        let board = cat_board();
        assert_eq!(validate_move(&board, &[], &LATER).unwrap_err(), Rejection::Empty);
        assert_eq!(
            validate_move(&board, &[at(7, 8, b'S')], &LATER).unwrap_err(),
            Rejection::BadCoordinates
        );
        assert_eq!(
            validate_move(&board, &[at(8, 8, b'S'), at(8, 8, b'T')], &LATER).unwrap_err(),
            Rejection::BadCoordinates
        );
        assert_eq!(
            validate_move(&board, &[at(15, 0, b'S')], &LATER).unwrap_err(),
            Rejection::BadCoordinates
        );
        assert_eq!(
            validate_move(&board, &[at(8, 8, b'S'), at(9, 9, b'T')], &LATER).unwrap_err(),
            Rejection::NonLinear
        );
        assert_eq!(
            validate_move(&board, &[at(8, 7, b'S'), at(8, 9, b'T')], &LATER).unwrap_err(),
            Rejection::Gap
        );
        assert_eq!(
            validate_move(&board, &[at(0, 0, b'A'), at(0, 1, b'T')], &LATER).unwrap_err(),
            Rejection::Disconnected
        );
        let wildcard = board::PlacedTile {
            row: 7,
            col: 10,
            tile: board::Tile::wildcard(1, 0),
        };
        assert_eq!(
            validate_move(&board, &[wildcard], &LATER).unwrap_err(),
            Rejection::UnboundTile
        );
    }

    #[test]
    fn extension_forms_the_whole_word() {
        let board = cat_board();
        let mv = validate_move(&board, &[at(7, 10, b'S')], &LATER).unwrap();
        assert_eq!(mv.axis, matrix::Axis::Across);
        assert_eq!(mv.formed_words, vec!["CATS".to_string()]);
        // through the A, down.
        let mv = validate_move(&board, &[at(6, 8, b'B'), at(8, 8, b'D')], &LATER).unwrap();
        assert_eq!(mv.axis, matrix::Axis::Down);
        assert_eq!(mv.formed_words, vec!["BAD".to_string()]);
        // below the T, the lone tile reads down.
        let mv = validate_move(&board, &[at(8, 9, b'O')], &LATER).unwrap();
        assert_eq!(mv.axis, matrix::Axis::Down);
        assert_eq!(mv.formed_words, vec!["TO".to_string()]);
    }

    #[test]
    fn parallel_play_forms_cross_words() {
        let board = cat_board();
        let mv = validate_move(&board, &[at(8, 8, b'T'), at(8, 9, b'O')], &LATER).unwrap();
        assert_eq!(
            mv.formed_words,
            vec!["TO".to_string(), "AT".to_string(), "TO".to_string()]
        );
    }

    #[test]
    fn independent_start() {
        let layout = BoardLayout::from_rows(&["*    ", "     ", "     ", "     ", "    *"]).unwrap();
        let board = board::Board::from_strings(
            &layout,
            &ENGLISH_ALPHABET,
            &["HI...", ".....", ".....", ".....", "....."],
        )
        .unwrap();
        let rules = TurnRules {
            first_move: false,
            player_move_count: 0,
            independent_start: true,
        };
        assert_eq!(
            validate_move(&board, &[at(2, 2, b'A'), at(2, 3, b'T')], &rules).unwrap_err(),
            Rejection::IndependentStartMissesStart
        );
        assert_eq!(
            validate_move(&board, &[at(4, 3, b'A'), at(4, 4, b'T')], &rules)
                .unwrap()
                .formed_words,
            vec!["AT".to_string()]
        );
        // one tile alone on the start forms nothing.
        assert_eq!(
            validate_move(&board, &[at(4, 4, b'A')], &rules).unwrap_err(),
            Rejection::NoWordFormed
        );
        let layout = BoardLayout::from_rows(&["*    ", "     ", "     ", "     ", "   **"]).unwrap();
        let board = board::Board::from_strings(
            &layout,
            &ENGLISH_ALPHABET,
            &[".....", ".....", ".....", "...H.", "....."],
        )
        .unwrap();
        assert_eq!(
            validate_move(&board, &[at(4, 3, b'I'), at(4, 4, b'T')], &rules).unwrap_err(),
            Rejection::IndependentStartTouches
        );
        // the rule lapses after the player's first move.
        let rules = TurnRules {
            player_move_count: 1,
            ..rules
        };
        assert_eq!(
            validate_move(&board, &[at(4, 3, b'I'), at(4, 4, b'T')], &rules)
                .unwrap()
                .formed_words,
            vec!["IT".to_string(), "HI".to_string()]
        );
    }
}
