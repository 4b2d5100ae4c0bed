// Copyright (C) 2020-2026 Andy Kurnia.

use super::board;

// lowercase for a blank.
#[inline(always)]
pub fn tile_label(tile: &board::Tile) -> char {
    if tile.is_blank {
        (tile.letter as char).to_ascii_lowercase()
    } else {
        tile.letter as char
    }
}

// the bonus symbol if the cell is empty.
#[inline(always)]
pub fn board_label(board: &board::Board, row: i8, col: i8) -> char {
    match board.tile_at(row, col) {
        Some(tile) => tile_label(tile),
        None => board.bonus_at(row, col).symbol(),
    }
}

// '?' for an unplayed blank.
pub fn fmt_rack(rack: &[board::Tile]) -> String {
    rack.iter().map(|tile| tile.letter as char).collect()
}

fn column_header(cols: i8) -> String {
    let mut s = String::from("  ");
    for c in 0..cols {
        s.push(' ');
        s.push(((c as u8 % 26) + b'a') as char);
    }
    s
}

fn border(cols: i8) -> String {
    let mut s = String::from("  +");
    for _ in 1..cols {
        s.push_str("--");
    }
    s.push_str("-+");
    s
}

pub fn format_board(board: &board::Board) -> String {
    let dim = board.dim();
    let mut lines = vec![column_header(dim.cols), border(dim.cols)];
    for r in 0..dim.rows {
        let mut line = format!("{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                line.push(' ');
            }
            line.push(board_label(board, r, c));
        }
        line.push_str(&format!("|{}", r + 1));
        lines.push(line);
    }
    lines.push(border(dim.cols));
    lines.push(column_header(dim.cols));
    lines.join("\n")
}

pub fn print_board(board: &board::Board) {
    println!("{}", format_board(board));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet::ENGLISH_ALPHABET, board_layout::BoardLayout};

    #[test]
    fn small_board() {
        let layout = BoardLayout::from_rows(&["=  ", " * ", "  '"]).unwrap();
        let board = board::Board::from_strings(&layout, &ENGLISH_ALPHABET, &["...", ".Ab", "..."]).unwrap();
        assert_eq!(
            format_board(&board),
            [
                "   a b c",
                "  +-----+",
                " 1|=    |1",
                " 2|  A b|2",
                " 3|    '|3",
                "  +-----+",
                "   a b c",
            ]
            .join("\n")
        );
        let rack = crate::board::rack_from_str(&ENGLISH_ALPHABET, "qa?", 0, 0).unwrap();
        assert_eq!(fmt_rack(&rack), "QA?");
    }
}
