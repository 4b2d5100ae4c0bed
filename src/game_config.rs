// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error, move_picker};

// Knobs for one engine. Every field has a default, so a JSON file only needs
// the ones it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rack_size: usize,
    pub full_rack_bonus: i32,
    pub hazard_penalty: i32,
    pub max_word_len: usize,
    pub difficulty: move_picker::Difficulty,
    pub use_heuristics: bool,
    pub leave_weight: f32,
    pub control_weight: f32,
    pub independent_start: bool,
    pub max_attempts: Option<u64>,
    pub time_budget_ms: Option<u64>,
    pub approval_timeout_ms: u64,
    pub num_threads: Option<usize>,
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rack_size: 7,
            full_rack_bonus: 50,
            hazard_penalty: 5,
            max_word_len: 15,
            difficulty: move_picker::Difficulty::Hard,
            use_heuristics: true,
            leave_weight: 0.3,
            control_weight: 0.1,
            independent_start: false,
            max_attempts: None,
            time_budget_ms: None,
            approval_timeout_ms: 2000,
            num_threads: None,
            verbose: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> error::Returns<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> error::Returns<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                return_error!(format!("cannot read config {:?}: {}", path, err));
            }
        };
        Self::from_json_str(&text)
    }

    #[inline(always)]
    pub fn worker_count(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

pub fn make_standard_engine_config() -> EngineConfig {
    EngineConfig::default()
}

// What the self-play orchestrator needs beyond the engine.
pub struct GameConfig<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_players: u8,
    num_passes_to_end: u8,
}

impl<'a> GameConfig<'a> {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet<'a> {
        self.alphabet
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        &self.board_layout
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        self.rack_size
    }

    #[inline(always)]
    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    // consecutive scoreless turns, across all players, that end the game.
    #[inline(always)]
    pub fn num_passes_to_end(&self) -> u8 {
        self.num_passes_to_end
    }
}

pub fn make_english_game_config() -> GameConfig<'static> {
    GameConfig {
        alphabet: &alphabet::ENGLISH_ALPHABET,
        board_layout: board_layout::make_standard_board_layout(),
        rack_size: 7,
        num_players: 2,
        num_passes_to_end: 2,
    }
}
