// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use std::sync::Arc;
use tilewise::{board, display, engine, error, game_config, game_state, lexicon, move_picker};

const DEFAULT_LEXICON: &str = "words.txt";

fn rack_value(rack: &[board::Tile]) -> i32 {
    rack.iter().map(|tile| tile.value as i32).sum()
}

// usage: auto [WORDLIST [SEED]]
#[tokio::main]
async fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    let lexicon = lexicon::load_lexicon(args.get(1).map_or(DEFAULT_LEXICON, |s| s.as_str()))?;
    let mut rng = match args.get(2) {
        Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed.parse()?),
        None => rand_chacha::ChaCha20Rng::from_rng(&mut rand::rng()),
    };

    let game_config = game_config::make_english_game_config();
    let engines = [move_picker::Difficulty::Easy, move_picker::Difficulty::Hard].map(|difficulty| {
        engine::Engine::new(
            game_config.alphabet(),
            Arc::clone(&lexicon),
            game_config::EngineConfig {
                difficulty,
                ..game_config::make_standard_engine_config()
            },
        )
    });
    let judge = Arc::new(engine::TrieJudge::new(Arc::clone(&lexicon)));

    let mut game_state = game_state::GameState::new(&game_config);
    game_state.deal(&mut rng);
    println!("\nplaying self");

    loop {
        display::print_board(&game_state.board);
        for (i, player) in (1..).zip(game_state.players.iter()) {
            print!("player {}: {}, ", i, player.score);
        }
        println!("turn: player {}", game_state.turn + 1);
        println!("pool {:2}", game_state.bag.len());
        for (i, player) in (1..).zip(game_state.players.iter()) {
            println!("p{} rack: {}", i, display::fmt_rack(&player.rack));
        }

        let engine = &engines[game_state.turn as usize % engines.len()];
        let (found, stats) = engine
            .find_move_with_stats(
                &game_state.board,
                &game_state.current_player().rack,
                &game_state.turn_rules(),
                &judge,
                &mut rng,
            )
            .await?;
        println!("{}", stats);
        match found {
            Some(scored) => {
                println!(
                    "{} plays {:?} ({}) for {}",
                    engine.config().difficulty,
                    scored.formed_words,
                    scored
                        .placement
                        .iter()
                        .map(|p| format!("{}@{},{}", display::tile_label(&p.tile), p.row, p.col))
                        .collect::<Vec<_>>()
                        .join(" "),
                    scored.score
                );
                game_state.play(&scored)?;
            }
            None => {
                println!("{} passes", engine.config().difficulty);
                game_state.pass();
            }
        }

        if game_state.is_over() {
            break;
        }
        game_state.next_turn();
    }

    display::print_board(&game_state.board);
    let went_out = game_state
        .players
        .iter()
        .position(|player| player.rack.is_empty() && game_state.bag.is_empty());
    let leftover = game_state
        .players
        .iter()
        .map(|player| rack_value(&player.rack))
        .collect::<Vec<_>>();
    for (i, player) in game_state.players.iter_mut().enumerate() {
        if Some(i) == went_out {
            player.score += leftover.iter().sum::<i32>();
        } else {
            player.score -= leftover[i];
        }
    }
    for (i, player) in (1..).zip(game_state.players.iter()) {
        println!(
            "player {}: {} ({} moves, rack {})",
            i,
            player.score,
            player.num_moves,
            display::fmt_rack(&player.rack)
        );
    }

    Ok(())
}
