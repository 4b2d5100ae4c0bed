// Copyright (C) 2020-2026 Andy Kurnia.

// Letters are plain ASCII bytes: b'A'..=b'Z', with b'?' marking an unbound
// wildcard on a rack.

pub const WILDCARD: u8 = b'?';
pub const NUM_LETTERS: usize = 26;

pub struct LetterInfo {
    label: u8,
    freq: u8,
    score: i8,
    is_vowel: bool,
}

const fn info(label: u8, freq: u8, score: i8, is_vowel: bool) -> LetterInfo {
    LetterInfo {
        label,
        freq,
        score,
        is_vowel,
    }
}

pub struct Alphabet<'a> {
    letters: &'a [LetterInfo], // A-Z
    wildcard_freq: u8,
}

impl Alphabet<'_> {
    // 0 for A. None for anything outside A-Z.
    #[inline(always)]
    pub fn index_of(letter: u8) -> Option<usize> {
        if letter.is_ascii_uppercase() {
            Some((letter - b'A') as usize)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn letter_at(idx: usize) -> u8 {
        b'A' + idx as u8
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    // face value; wildcards are worth nothing.
    #[inline(always)]
    pub fn score(&self, letter: u8) -> i8 {
        match Self::index_of(letter) {
            Some(idx) => self.letters[idx].score,
            None => 0,
        }
    }

    #[inline(always)]
    pub fn is_vowel(&self, letter: u8) -> bool {
        Self::index_of(letter).is_some_and(|idx| self.letters[idx].is_vowel)
    }

    #[inline(always)]
    pub fn freq(&self, letter: u8) -> u8 {
        if letter == WILDCARD {
            return self.wildcard_freq;
        }
        Self::index_of(letter).map_or(0, |idx| self.letters[idx].freq)
    }

    pub fn labels(&self) -> impl Iterator<Item = u8> + '_ {
        self.letters.iter().map(|x| x.label)
    }

    pub fn num_tiles(&self) -> u16 {
        self.letters.iter().map(|x| x.freq as u16).sum::<u16>() + self.wildcard_freq as u16
    }
}

static ENGLISH_LETTERS: [LetterInfo; NUM_LETTERS] = [
    info(b'A', 9, 1, true),
    info(b'B', 2, 3, false),
    info(b'C', 2, 3, false),
    info(b'D', 4, 2, false),
    info(b'E', 12, 1, true),
    info(b'F', 2, 4, false),
    info(b'G', 3, 2, false),
    info(b'H', 2, 4, false),
    info(b'I', 9, 1, true),
    info(b'J', 1, 8, false),
    info(b'K', 1, 5, false),
    info(b'L', 4, 1, false),
    info(b'M', 2, 3, false),
    info(b'N', 6, 1, false),
    info(b'O', 8, 1, true),
    info(b'P', 2, 3, false),
    info(b'Q', 1, 10, false),
    info(b'R', 6, 1, false),
    info(b'S', 4, 1, false),
    info(b'T', 6, 1, false),
    info(b'U', 4, 1, true),
    info(b'V', 2, 4, false),
    info(b'W', 2, 4, false),
    info(b'X', 1, 8, false),
    info(b'Y', 2, 4, false),
    info(b'Z', 1, 10, false),
];

pub static ENGLISH_ALPHABET: Alphabet = Alphabet {
    letters: &ENGLISH_LETTERS,
    wildcard_freq: 2,
};
