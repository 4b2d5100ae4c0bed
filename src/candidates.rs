// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, cross_set, trie};
use std::collections::BTreeSet;

// slots are tracked in a u32 bitmask.
pub const MAX_SLOTS: usize = 32;

struct Env<'a> {
    trie: &'a trie::Trie,
    slots: &'a [u8],            // rack letters, then the board letter if any
    board_slot: Option<usize>, // must be used for a word to count
    max_len: usize,
    word_buffer: Vec<u8>,
    found: BTreeSet<String>,
}

fn record(env: &mut Env, used: u32) {
    let board_letter_used = match env.board_slot {
        Some(slot) => used & (1 << slot) != 0,
        None => true,
    };
    if board_letter_used {
        env.found
            .insert(env.word_buffer.iter().map(|&b| b as char).collect());
    }
}

fn extend(env: &mut Env, p: trie::NodeIndex, used: u32) {
    if env.word_buffer.len() > 1 && env.trie.accepts(p) {
        record(env, used);
    }
    if env.word_buffer.len() >= env.max_len {
        return;
    }
    // identical rack tiles are interchangeable, try each letter once per depth.
    let mut tried_letters = 0u32;
    let mut tried_wildcard = false;
    for (i, &letter) in env.slots.iter().enumerate() {
        if used & (1 << i) != 0 {
            continue;
        }
        let is_board_slot = env.board_slot == Some(i);
        if letter == alphabet::WILDCARD {
            if tried_wildcard {
                continue;
            }
            tried_wildcard = true;
            for (child_letter, q) in env.trie.children(p) {
                env.word_buffer.push(child_letter);
                extend(env, q, used | (1 << i));
                env.word_buffer.pop();
            }
        } else {
            let bit = cross_set::letter_bit(letter);
            if !is_board_slot {
                if tried_letters & bit != 0 {
                    continue;
                }
                tried_letters |= bit;
            }
            if let Some(q) = env.trie.seek(p, letter) {
                env.word_buffer.push(letter);
                extend(env, q, used | (1 << i));
                env.word_buffer.pop();
            }
        }
    }
}

fn generate(
    trie: &trie::Trie,
    slots: &[u8],
    board_slot: Option<usize>,
    max_len: usize,
) -> BTreeSet<String> {
    let slots = &slots[..slots.len().min(MAX_SLOTS)];
    let mut env = Env {
        trie,
        slots,
        board_slot: board_slot.filter(|&slot| slot < slots.len()),
        max_len: max_len.min(slots.len()),
        word_buffer: Vec::with_capacity(slots.len()),
        found: BTreeSet::new(),
    };
    if board_slot.is_some() && env.board_slot.is_none() {
        return env.found;
    }
    extend(&mut env, trie.root(), 0);
    env.found
}

// Every word of length 2..=max_len the rack alone can spell.
pub fn generate_words(trie: &trie::Trie, rack: &[board::Tile], max_len: usize) -> BTreeSet<String> {
    let slots = rack.iter().map(|tile| tile.letter).collect::<Vec<_>>();
    generate(trie, &slots, None, max_len)
}

// Words spelled by the rack plus exactly one use of board_letter, which may
// sit anywhere in the word.
pub fn generate_words_with_board_letter(
    trie: &trie::Trie,
    rack: &[board::Tile],
    board_letter: u8,
    max_len: usize,
) -> BTreeSet<String> {
    let mut slots = rack
        .iter()
        .take(MAX_SLOTS - 1)
        .map(|tile| tile.letter)
        .collect::<Vec<_>>();
    let board_slot = slots.len();
    slots.push(board_letter);
    generate(trie, &slots, Some(board_slot), max_len)
}
