// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use std::io::Read;
use std::sync::Arc;
use tilewise::{alphabet, display, engine, error, game_config, kibitzer, lexicon};

const DEFAULT_LEXICON: &str = "words.txt";

// usage: json [QUESTION.json [CONFIG.json]]
// the question is read from stdin when no file is given.
//
// {
//   "board": [ "...............", ..., ".......CAT.....", ... ],
//   "rack": "SEED?",
//   "difficulty": "hard",
//   "move_count": 1,
//   "lexicon": "words.txt"
// }
#[tokio::main]
async fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    let data = match args.get(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut data = String::new();
            std::io::stdin().read_to_string(&mut data)?;
            data
        }
    };
    let question = serde_json::from_str::<kibitzer::Question>(&data)?;
    let mut engine_config = match args.get(2) {
        Some(path) => game_config::EngineConfig::from_json_file(path)?,
        None => game_config::make_standard_engine_config(),
    };
    if let Some(difficulty) = question.difficulty {
        engine_config.difficulty = difficulty;
    }

    let lexicon = lexicon::load_lexicon(question.lexicon.as_deref().unwrap_or(DEFAULT_LEXICON))?;
    let alphabet = &alphabet::ENGLISH_ALPHABET;
    let mut kibitzer = kibitzer::Kibitzer::new();
    kibitzer.prepare(alphabet, &question)?;
    let board = kibitzer.board.as_ref().ok_or("no board")?;
    let rules = kibitzer.turn_rules(&question);

    display::print_board(board);
    println!("rack: {}", display::fmt_rack(&kibitzer.rack));

    let engine = engine::Engine::new(alphabet, Arc::clone(&lexicon), engine_config);
    let judge = Arc::new(engine::TrieJudge::new(lexicon));
    let mut rng = rand_chacha::ChaCha20Rng::from_rng(&mut rand::rng());
    let found = engine
        .find_move(board, &kibitzer.rack, &rules, &judge, &mut rng)
        .await?;

    let answer = kibitzer::JsonAnswer::from(found.as_ref());
    println!("{}", serde_json::to_string(&answer)?);

    Ok(())
}
