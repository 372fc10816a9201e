#[macro_use] extern crate log;
extern crate simplelog;
extern crate rand;
extern crate serde_json;
extern crate pathfinding;

mod game;
mod data;
mod config;
mod moves;
mod mining;
mod dropoffs;
mod nav;
mod bot_logic;

pub use bot_logic::Logic;
pub use config::BotConfig;
pub use game::{Game, parse_line_of_nums};
pub use data::{Factory, Dropoff, Ship, Direction, Point};
pub use dropoffs::DropoffPlan;
pub use moves::MoveRegister;
