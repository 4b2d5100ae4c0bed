// Copyright (C) 2020-2026 Andy Kurnia.

use super::{bag, board, engine, error, game_config, move_validator};
use rand::prelude::*;

fn use_tiles(rack: &mut Vec<board::Tile>, placed: &[board::PlacedTile]) -> error::Returns<()> {
    for p in placed {
        let pos = rack
            .iter()
            .position(|tile| tile.id == p.tile.id)
            .ok_or("bad tile")?;
        rack.swap_remove(pos);
    }
    Ok(())
}

#[derive(Clone)]
pub struct GamePlayer {
    pub score: i32,
    pub rack: Vec<board::Tile>,
    pub num_moves: u32,
}

// The orchestrator side of a game: the engine only ever reads from this.
#[derive(Clone)]
pub struct GameState<'a> {
    pub game_config: &'a game_config::GameConfig<'a>,
    pub players: Box<[GamePlayer]>,
    pub board: board::Board,
    pub bag: bag::Bag,
    pub turn: u8,
    pub num_scoreless_turns: u8,
}

impl<'a> GameState<'a> {
    pub fn new(game_config: &'a game_config::GameConfig) -> Self {
        let rack_size = game_config.rack_size() as usize;
        Self {
            game_config,
            players: (0..game_config.num_players())
                .map(|_| GamePlayer {
                    score: 0,
                    rack: Vec::with_capacity(rack_size),
                    num_moves: 0,
                })
                .collect(),
            board: board::Board::new(game_config.board_layout()),
            bag: bag::Bag::new(game_config.alphabet()),
            turn: 0,
            num_scoreless_turns: 0,
        }
    }

    pub fn deal(&mut self, rng: &mut dyn RngCore) {
        self.bag.shuffle(rng);
        let rack_size = self.game_config.rack_size() as usize;
        for (owner, player) in (0u8..).zip(self.players.iter_mut()) {
            self.bag.replenish(&mut player.rack, rack_size, owner);
        }
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    pub fn turn_rules(&self) -> move_validator::TurnRules {
        move_validator::TurnRules {
            first_move: self.board.is_empty_board(),
            player_move_count: self.current_player().num_moves,
            independent_start: false,
        }
    }

    pub fn play(&mut self, scored: &engine::ScoredMove) -> error::Returns<()> {
        let rack_size = self.game_config.rack_size() as usize;
        let turn = self.turn;
        let current_player = &mut self.players[turn as usize];
        let mut rack = current_player.rack.clone();
        use_tiles(&mut rack, &scored.placement)?;
        self.board.place(&scored.placement)?;
        current_player.rack = rack;
        current_player.score += scored.score;
        current_player.num_moves += 1;
        self.bag.replenish(&mut current_player.rack, rack_size, turn);
        self.num_scoreless_turns = if scored.score == 0 {
            self.num_scoreless_turns + 1
        } else {
            0
        };
        Ok(())
    }

    pub fn pass(&mut self) {
        self.num_scoreless_turns += 1;
    }

    pub fn is_over(&self) -> bool {
        (self.bag.is_empty() && self.players.iter().any(|player| player.rack.is_empty()))
            || self.num_scoreless_turns >= self.game_config.num_passes_to_end()
    }

    pub fn next_turn(&mut self) {
        self.turn = (self.turn + 1) % self.players.len() as u8;
    }
}
