// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    #[serde(rename = "across")]
    Across,
    #[serde(rename = "down")]
    Down,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Across, Axis::Down];

    #[inline(always)]
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Across => Axis::Down,
            Axis::Down => Axis::Across,
        }
    }

    // (row delta, col delta) of one step forward.
    #[inline(always)]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Axis::Across => (0, 1),
            Axis::Down => (1, 0),
        }
    }

    // moves (row, col) by n steps, n may be negative.
    #[inline(always)]
    pub fn step(self, row: i8, col: i8, n: i8) -> (i8, i8) {
        let (dr, dc) = self.delta();
        (row + dr * n, col + dc * n)
    }

    // the coordinate that varies along this axis.
    #[inline(always)]
    pub fn along(self, row: i8, col: i8) -> i8 {
        match self {
            Axis::Across => col,
            Axis::Down => row,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn contains(&self, row: i8, col: i8) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn center(&self) -> (i8, i8) {
        (self.rows / 2, self.cols / 2)
    }

    // in-bounds 4-neighbors, in up/left/right/down order.
    pub fn neighbors(&self, row: i8, col: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        [(-1, 0), (0, -1), (0, 1), (1, 0)]
            .into_iter()
            .map(move |(dr, dc)| (row + dr, col + dc))
            .filter(move |&(r, c)| self.contains(r, c))
    }
}
