// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod anchor;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod candidates;
pub mod cross_set;
pub mod display;
pub mod engine;
pub mod game_config;
pub mod game_state;
pub mod heuristic;
pub mod kibitzer;
pub mod lexicon;
pub mod matrix;
pub mod move_picker;
pub mod move_validator;
pub mod placement;
pub mod play_scorer;
pub mod trie;
