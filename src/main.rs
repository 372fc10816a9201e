#[macro_use] extern crate log;
extern crate simplelog;
extern crate serde_json;
extern crate dropoff_bot;

use serde_json::Value;
use simplelog::*;
use std::io::{BufRead, BufReader, stdin};
use std::fs::File;

use dropoff_bot::{BotConfig, Game, Logic};

fn main() {
	let stdin = stdin();
	let reader = BufReader::new(stdin);
	let mut lines_iter = reader.lines().map(|l| l.unwrap());

    let constants: Value = serde_json::from_str(&lines_iter.next().unwrap()).unwrap();

    let player_info = dropoff_bot::parse_line_of_nums(&mut lines_iter);
    let num_players = player_info[0];
    let my_pid = player_info[1];

    let mut game = Game::init(&mut lines_iter, constants, num_players, my_pid);
    let _ = CombinedLogger::init(
    	vec![
		    WriteLogger::new(
		    	LevelFilter::Info,
		    	Config {time: None, level: None, target: None, location: None, time_format: None},
		    	File::create(format!("dropoff-bot-{}.log", my_pid)).unwrap()),
    	]
    ).unwrap();

    let config = BotConfig::load("bot_config.json");
    info!("bot config: {:?}", config);

    let mut logic = Logic::new();

	game.ready("dropoff_bot");

	loop {
		game.update_frame(&mut lines_iter);
		Game::end_turn(logic.make_moves(&game, &config));
	}
}
