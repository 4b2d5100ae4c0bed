// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error, matrix};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: u32,
    pub letter: u8, // b'A'..=b'Z', or alphabet::WILDCARD while unbound
    pub value: i8,
    pub is_blank: bool,
    pub owner: u8,
}

impl Tile {
    pub fn new(id: u32, letter: u8, value: i8, owner: u8) -> Self {
        Self {
            id,
            letter,
            value,
            is_blank: false,
            owner,
        }
    }

    pub fn wildcard(id: u32, owner: u8) -> Self {
        Self {
            id,
            letter: alphabet::WILDCARD,
            value: 0,
            is_blank: true,
            owner,
        }
    }

    #[inline(always)]
    pub fn is_wildcard(&self) -> bool {
        self.letter == alphabet::WILDCARD
    }

    // keeps the value the caller gave the blank, normally zero.
    #[inline(always)]
    pub fn bound_to(&self, letter: u8) -> Self {
        Self { letter, ..*self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedTile {
    pub row: i8,
    pub col: i8,
    pub tile: Tile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: i8,
    pub col: i8,
    pub bonus: board_layout::Bonus,
    pub tile: Option<Tile>,
}

// Tiles numbered from first_id in order. "?" is a wildcard.
pub fn rack_from_str(
    alphabet: &alphabet::Alphabet,
    letters: &str,
    owner: u8,
    first_id: u32,
) -> error::Returns<Vec<Tile>> {
    let mut rack = Vec::with_capacity(letters.len());
    for (id, ch) in (first_id..).zip(letters.chars()) {
        let letter = ch.to_ascii_uppercase() as u8;
        if ch == alphabet::WILDCARD as char {
            rack.push(Tile::wildcard(id, owner));
        } else if ch.is_ascii_alphabetic() {
            rack.push(Tile::new(id, letter, alphabet.score(letter), owner));
        } else {
            return_error!(format!("rack has invalid tile {:?}", ch));
        }
    }
    Ok(rack)
}

#[derive(Clone)]
pub struct Board {
    dim: matrix::Dim,
    cells: Box<[Cell]>,
}

impl Board {
    pub fn new(layout: &board_layout::BoardLayout) -> Self {
        let dim = layout.dim();
        let mut cells = Vec::with_capacity(dim.len());
        for row in 0..dim.rows {
            for col in 0..dim.cols {
                cells.push(Cell {
                    row,
                    col,
                    bonus: layout.bonus_at(row, col),
                    tile: None,
                });
            }
        }
        Self {
            dim,
            cells: cells.into_boxed_slice(),
        }
    }

    // The caller's grid, row-major. Must be rectangular, each cell must carry
    // its own coordinates, and board tiles must be bound letters.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> error::Returns<Self> {
        if rows.is_empty() || rows[0].is_empty() {
            return_error!("board is empty".into());
        }
        let num_cols = rows[0].len();
        if rows.len() > i8::MAX as usize || num_cols > i8::MAX as usize {
            return_error!(format!(
                "board size {}x{} is not supported",
                rows.len(),
                num_cols
            ));
        }
        let dim = matrix::Dim {
            rows: rows.len() as i8,
            cols: num_cols as i8,
        };
        let mut cells = Vec::with_capacity(dim.len());
        for (row_num, row) in (0i8..).zip(rows) {
            if row.len() != num_cols {
                return_error!(format!(
                    "board row {} (0-based): need {} cols, found {} cols",
                    row_num,
                    num_cols,
                    row.len()
                ));
            }
            for (col_num, cell) in (0i8..).zip(row) {
                if cell.row != row_num || cell.col != col_num {
                    return_error!(format!(
                        "board row {} col {} (0-based): cell claims to be at row {} col {}",
                        row_num, col_num, cell.row, cell.col
                    ));
                }
                if let Some(tile) = &cell.tile {
                    if !tile.letter.is_ascii_uppercase() {
                        return_error!(format!(
                            "board row {} col {} (0-based): invalid tile {:?}",
                            row_num, col_num, tile.letter as char
                        ));
                    }
                }
                cells.push(cell);
            }
        }
        Ok(Self {
            dim,
            cells: cells.into_boxed_slice(),
        })
    }

    // One string per row: '.' or ' ' for empty, A-Z for a tile, a-z for a
    // blank standing in for that letter.
    pub fn from_strings<S: AsRef<str>>(
        layout: &board_layout::BoardLayout,
        alphabet: &alphabet::Alphabet,
        rows: &[S],
    ) -> error::Returns<Self> {
        let dim = layout.dim();
        if rows.len() != dim.rows as usize {
            return_error!(format!(
                "board: need {} rows, found {} rows",
                dim.rows,
                rows.len()
            ));
        }
        let mut board = Self::new(layout);
        let mut next_id = 0u32;
        for (row_num, row) in (0i8..).zip(rows) {
            let row = row.as_ref();
            if row.chars().count() != dim.cols as usize {
                return_error!(format!(
                    "board row {} (0-based): need {} cols, found {} cols",
                    row_num,
                    dim.cols,
                    row.chars().count()
                ));
            }
            for (col_num, ch) in (0i8..).zip(row.chars()) {
                let tile = match ch {
                    '.' | ' ' => continue,
                    'A'..='Z' => Tile::new(next_id, ch as u8, alphabet.score(ch as u8), 0),
                    'a'..='z' => Tile::wildcard(next_id, 0).bound_to(ch.to_ascii_uppercase() as u8),
                    _ => {
                        return_error!(format!(
                            "board row {} col {} (0-based): invalid tile {:?}",
                            row_num, col_num, ch
                        ));
                    }
                };
                next_id += 1;
                let idx = dim.at_row_col(row_num, col_num);
                board.cells[idx].tile = Some(tile);
            }
        }
        Ok(board)
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // panics when out of bounds, check dim().contains first.
    #[inline(always)]
    pub fn cell(&self, row: i8, col: i8) -> &Cell {
        &self.cells[self.dim.at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn tile_at(&self, row: i8, col: i8) -> Option<&Tile> {
        if self.dim.contains(row, col) {
            self.cell(row, col).tile.as_ref()
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn letter_at(&self, row: i8, col: i8) -> Option<u8> {
        self.tile_at(row, col).map(|tile| tile.letter)
    }

    #[inline(always)]
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        self.tile_at(row, col).is_some()
    }

    #[inline(always)]
    pub fn bonus_at(&self, row: i8, col: i8) -> board_layout::Bonus {
        self.cell(row, col).bonus
    }

    pub fn num_tiles(&self) -> usize {
        self.cells.iter().filter(|cell| cell.tile.is_some()).count()
    }

    #[inline(always)]
    pub fn is_empty_board(&self) -> bool {
        self.cells.iter().all(|cell| cell.tile.is_none())
    }

    pub fn start_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.bonus == board_layout::Bonus::Start)
    }

    pub fn has_start_cell(&self) -> bool {
        self.start_cells().next().is_some()
    }

    // true if (row, col) is a start cell, or the center when there is none.
    pub fn is_start(&self, row: i8, col: i8) -> bool {
        if self.has_start_cell() {
            self.bonus_at(row, col) == board_layout::Bonus::Start
        } else {
            (row, col) == self.dim.center()
        }
    }

    pub fn touches_tile(&self, row: i8, col: i8) -> bool {
        self.dim
            .neighbors(row, col)
            .any(|(r, c)| self.is_occupied(r, c))
    }

    // sorted, distinct.
    pub fn distinct_letters(&self) -> Vec<u8> {
        let mut seen = [false; alphabet::NUM_LETTERS];
        for tile in self.cells.iter().filter_map(|cell| cell.tile.as_ref()) {
            if let Some(idx) = alphabet::Alphabet::index_of(tile.letter) {
                seen[idx] = true;
            }
        }
        (0..alphabet::NUM_LETTERS)
            .filter(|&idx| seen[idx])
            .map(alphabet::Alphabet::letter_at)
            .collect()
    }

    // For the orchestrator. The engine never calls this.
    pub fn place(&mut self, placed: &[PlacedTile]) -> error::Returns<()> {
        for p in placed {
            if !self.dim.contains(p.row, p.col) {
                return_error!(format!("cannot place at row {} col {}", p.row, p.col));
            }
            if self.is_occupied(p.row, p.col) {
                return_error!(format!("row {} col {} is occupied", p.row, p.col));
            }
            if !p.tile.letter.is_ascii_uppercase() {
                return_error!(format!("unbound tile at row {} col {}", p.row, p.col));
            }
        }
        for p in placed {
            let idx = self.dim.at_row_col(p.row, p.col);
            self.cells[idx].tile = Some(p.tile);
        }
        Ok(())
    }
}
