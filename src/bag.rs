// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board};
use rand::prelude::*;

#[derive(Clone)]
pub struct Bag(pub Vec<board::Tile>);

impl Bag {
    // one tile per unit of frequency, numbered from 0, wildcards last.
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        let mut next_id = 0u32;
        for letter in alphabet.labels() {
            for _ in 0..alphabet.freq(letter) {
                bag.push(board::Tile::new(next_id, letter, alphabet.score(letter), 0));
                next_id += 1;
            }
        }
        for _ in 0..alphabet.freq(alphabet::WILDCARD) {
            bag.push(board::Tile::wildcard(next_id, 0));
            next_id += 1;
        }
        Bag(bag)
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.0.shuffle(rng);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pop(&mut self) -> Option<board::Tile> {
        self.0.pop()
    }

    // tops up the rack, handing the drawn tiles to owner.
    pub fn replenish(&mut self, rack: &mut Vec<board::Tile>, rack_size: usize, owner: u8) {
        while rack.len() < rack_size {
            let Some(tile) = self.pop() else {
                break;
            };
            rack.push(board::Tile { owner, ..tile });
        }
    }
}
