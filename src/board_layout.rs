// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, matrix};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Bonus {
    #[default]
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    Start,
    Hazard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub letter_multiplier: i8,
}

impl Bonus {
    // the start cell doubles the word, hazards multiply nothing.
    #[inline(always)]
    pub fn premium(self) -> Premium {
        match self {
            Bonus::DoubleLetter => Premium {
                word_multiplier: 1,
                letter_multiplier: 2,
            },
            Bonus::TripleLetter => Premium {
                word_multiplier: 1,
                letter_multiplier: 3,
            },
            Bonus::DoubleWord | Bonus::Start => Premium {
                word_multiplier: 2,
                letter_multiplier: 1,
            },
            Bonus::TripleWord => Premium {
                word_multiplier: 3,
                letter_multiplier: 1,
            },
            Bonus::None | Bonus::Hazard => Premium {
                word_multiplier: 1,
                letter_multiplier: 1,
            },
        }
    }

    #[inline(always)]
    pub fn is_word_bonus(self) -> bool {
        matches!(self, Bonus::DoubleWord | Bonus::TripleWord | Bonus::Start)
    }

    pub fn from_symbol(symbol: char) -> Option<Bonus> {
        Some(match symbol {
            ' ' | '.' => Bonus::None,
            '\'' => Bonus::DoubleLetter,
            '"' => Bonus::TripleLetter,
            '-' => Bonus::DoubleWord,
            '=' => Bonus::TripleWord,
            '*' => Bonus::Start,
            '!' => Bonus::Hazard,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Bonus::None => ' ',
            Bonus::DoubleLetter => '\'',
            Bonus::TripleLetter => '"',
            Bonus::DoubleWord => '-',
            Bonus::TripleWord => '=',
            Bonus::Start => '*',
            Bonus::Hazard => '!',
        }
    }
}

#[derive(Clone)]
pub struct BoardLayout {
    dim: matrix::Dim,
    bonuses: Box<[Bonus]>,
}

impl BoardLayout {
    // one string per row, one symbol per cell (see Bonus::from_symbol).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> error::Returns<BoardLayout> {
        if rows.is_empty() {
            return_error!("layout has no rows".into());
        }
        let num_cols = rows[0].as_ref().chars().count();
        if num_cols == 0 || rows.len() > i8::MAX as usize || num_cols > i8::MAX as usize {
            return_error!(format!(
                "layout size {}x{} is not supported",
                rows.len(),
                num_cols
            ));
        }
        let mut bonuses = Vec::with_capacity(rows.len() * num_cols);
        for (row_num, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != num_cols {
                return_error!(format!(
                    "layout row {} (0-based): need {} cols, found {} cols",
                    row_num,
                    num_cols,
                    row.chars().count()
                ));
            }
            for (col_num, symbol) in row.chars().enumerate() {
                match Bonus::from_symbol(symbol) {
                    Some(bonus) => bonuses.push(bonus),
                    None => {
                        return_error!(format!(
                            "layout row {} col {} (0-based): invalid symbol {:?}",
                            row_num, col_num, symbol
                        ));
                    }
                }
            }
        }
        Ok(BoardLayout {
            dim: matrix::Dim {
                rows: rows.len() as i8,
                cols: num_cols as i8,
            },
            bonuses: bonuses.into_boxed_slice(),
        })
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn bonus_at(&self, row: i8, col: i8) -> Bonus {
        self.bonuses[self.dim.at_row_col(row, col)]
    }
}

static STANDARD_ROWS: [&str; 15] = [
    "=  '   =   '  =",
    " -   \"   \"   - ",
    "  -   ' '   -  ",
    "'  -   '   -  '",
    "    -     -    ",
    " \"   \"   \"   \" ",
    "  '   ' '   '  ",
    "=  '   *   '  =",
    "  '   ' '   '  ",
    " \"   \"   \"   \" ",
    "    -     -    ",
    "'  -   '   -  '",
    "  -   ' '   -  ",
    " -   \"   \"   - ",
    "=  '   =   '  =",
];

pub fn make_standard_board_layout() -> BoardLayout {
    match BoardLayout::from_rows(&STANDARD_ROWS) {
        Ok(layout) => layout,
        Err(err) => unreachable!("standard layout: {}", err),
    }
}
