// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use std::sync::Arc;
use tilewise::return_error;
use tilewise::{
    alphabet, board, board_layout, display, engine, error, game_config, lexicon, matrix,
    move_picker, move_validator, trie,
};

const DEFAULT_LEXICON: &str = "words.txt";

const HELP: &str = "\
help                      this
exit                      leave
source FILE               run commands from FILE
lexicon FILE              load a word list
place ROW COL DIR WORD    put WORD on the board (0-based, DIR is across or down,
                          lowercase for a blank)
rack LETTERS              set the rack, ? for a blank
show                      print the board and rack
gen [N]                   list the best N moves (default 10)
pick DIFFICULTY           let easy, medium or hard choose a move
clear                     empty the board";

struct Shell {
    layout: board_layout::BoardLayout,
    board: board::Board,
    rack: Vec<board::Tile>,
    lexicon: Arc<trie::Trie>,
    engine_config: game_config::EngineConfig,
    rng: rand_chacha::ChaCha20Rng,
    next_id: u32,
}

fn parse_axis(s: &str) -> error::Returns<matrix::Axis> {
    match s.to_ascii_lowercase().as_str() {
        "across" | "a" | "h" => Ok(matrix::Axis::Across),
        "down" | "d" | "v" => Ok(matrix::Axis::Down),
        _ => Err(error::new(format!("invalid direction {:?}", s)).into()),
    }
}

fn arg(strings: &[String], i: usize) -> error::Returns<&str> {
    match strings.get(i) {
        Some(s) => Ok(s.as_str()),
        None => Err(error::new("need another arg".into()).into()),
    }
}

impl Shell {
    fn engine(&self) -> engine::Engine<'static> {
        engine::Engine::new(
            &alphabet::ENGLISH_ALPHABET,
            Arc::clone(&self.lexicon),
            self.engine_config.clone(),
        )
    }

    fn rules(&self) -> move_validator::TurnRules {
        move_validator::TurnRules {
            first_move: self.board.is_empty_board(),
            player_move_count: 1,
            independent_start: false,
        }
    }

    fn show(&self) {
        display::print_board(&self.board);
        println!("rack: {}", display::fmt_rack(&self.rack));
    }

    fn place(&mut self, row: i8, col: i8, axis: matrix::Axis, word: &str) -> error::Returns<()> {
        let alphabet = &alphabet::ENGLISH_ALPHABET;
        let mut placed = Vec::new();
        for (n, ch) in (0i8..).zip(word.chars()) {
            let (r, c) = axis.step(row, col, n);
            if !self.board.dim().contains(r, c) {
                return_error!(format!("{} runs off the board", word));
            }
            let letter = ch.to_ascii_uppercase() as u8;
            if !letter.is_ascii_uppercase() {
                return_error!(format!("invalid letter {:?}", ch));
            }
            if let Some(existing) = self.board.letter_at(r, c) {
                if existing != letter {
                    return_error!(format!(
                        "row {} col {} already has {}",
                        r, c, existing as char
                    ));
                }
                continue;
            }
            let tile = if ch.is_ascii_lowercase() {
                board::Tile::wildcard(self.next_id, 0).bound_to(letter)
            } else {
                board::Tile::new(self.next_id, letter, alphabet.score(letter), 0)
            };
            self.next_id += 1;
            placed.push(board::PlacedTile { row: r, col: c, tile });
        }
        self.board.place(&placed)
    }

    fn generate(&mut self, count: usize) -> error::Returns<()> {
        let engine = self.engine();
        let mut outcome = engine.search_moves(&self.board, &self.rack, &self.rules())?;
        move_picker::rank_moves(
            &mut outcome.candidates,
            self.engine_config.use_heuristics,
            &mut self.rng,
        );
        println!("{}", outcome.stats);
        for (i, scored) in (1..).zip(outcome.candidates.iter().take(count)) {
            let tiles = scored
                .placement
                .iter()
                .map(|p| format!("{}@{},{}", display::tile_label(&p.tile), p.row, p.col))
                .collect::<Vec<_>>();
            println!(
                "{:3}: {:4} {:7.2} {:?} {}",
                i,
                scored.score,
                scored.selection_score,
                scored.formed_words,
                tiles.join(" ")
            );
        }
        Ok(())
    }

    async fn pick(&mut self, difficulty: move_picker::Difficulty) -> error::Returns<()> {
        self.engine_config.difficulty = difficulty;
        let engine = self.engine();
        let judge = Arc::new(engine::TrieJudge::new(Arc::clone(&self.lexicon)));
        let rules = self.rules();
        let found = engine
            .find_move(&self.board, &self.rack, &rules, &judge, &mut self.rng)
            .await?;
        match found {
            Some(scored) => println!(
                "{} plays {:?} for {}",
                difficulty, scored.formed_words, scored.score
            ),
            None => println!("{} passes", difficulty),
        }
        Ok(())
    }

    async fn run(&mut self, strings: &[String]) -> error::Returns<()> {
        let arg = |i: usize| arg(strings, i);
        match strings[0].as_str() {
            "help" => println!("{}", HELP),
            "lexicon" => self.lexicon = lexicon::load_lexicon(arg(1)?)?,
            "place" => {
                let row = arg(1)?.parse::<i8>()?;
                let col = arg(2)?.parse::<i8>()?;
                let axis = parse_axis(arg(3)?)?;
                self.place(row, col, axis, arg(4)?)?;
            }
            "rack" => {
                self.rack =
                    board::rack_from_str(&alphabet::ENGLISH_ALPHABET, arg(1)?, 0, 1_000_000)?
            }
            "show" => self.show(),
            "gen" => {
                let count = match strings.get(1) {
                    Some(s) => s.parse::<usize>()?,
                    None => 10,
                };
                self.generate(count)?;
            }
            "pick" => self.pick(arg(1)?.parse()?).await?,
            "clear" => self.board = board::Board::new(&self.layout),
            _ => println!("invalid input, help for help"),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> error::Returns<()> {
    let layout = board_layout::make_standard_board_layout();
    let mut shell = Shell {
        board: board::Board::new(&layout),
        layout,
        rack: Vec::new(),
        lexicon: lexicon::load_lexicon(DEFAULT_LEXICON)?,
        engine_config: game_config::make_standard_engine_config(),
        rng: rand_chacha::ChaCha20Rng::from_rng(&mut rand::rng()),
        next_id: 0,
    };
    let mut rl = rustyline::DefaultEditor::new()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if strings.is_empty() {
                        continue;
                    }
                    match strings[0].as_str() {
                        "exit" => {
                            break;
                        }
                        "source" => {
                            if strings.len() > 1 {
                                match std::fs::read_to_string(&strings[1]) {
                                    Ok(whole_file) => {
                                        let v = cmd_stack.len();
                                        for (line_num, line) in whole_file.lines().enumerate() {
                                            cmd_stack.push((
                                                line.to_string(),
                                                Some((strings[1].clone(), line_num + 1)),
                                            ));
                                        }
                                        cmd_stack[v..].reverse();
                                    }
                                    Err(err) => {
                                        println!("cannot open file: {:?}", err);
                                    }
                                }
                            } else {
                                println!("need another arg");
                            }
                        }
                        _ => {
                            if let Err(err) = shell.run(&strings).await {
                                println!("{}", err);
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
