use game::Game;
use config::BotConfig;
use data::{Direction, Point};
use dropoffs::{self, DropoffPlan};
use mining;
use moves::MoveRegister;
use nav;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::BinaryHeap;
use std::cmp::Ordering;

pub struct Logic {
	ship_goal_types: HashMap<usize, GoalType>,
	plan: Option<DropoffPlan>,
	endgame: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GoalType {
    TowardsMine, Mine, Deposit,
}

// best square to send a miner to, by halite over the round trip
fn pick_target(game: &Game, ship_pos: Point, taken: &HashSet<Point>) -> Point {
	let mut best_pos = ship_pos;
	let mut best_score = -1.0f32;
	for x in 0..game.width {
		for y in 0..game.height {
			let pos = Point { x: x as isize, y: y as isize };
			if taken.contains(&pos) || game.my_drop_pts.contains(&pos) {
				continue;
			}
			let score = game.halite_at(pos) as f32
				/ (1.0 + game.dist(ship_pos, pos) as f32
					+ *game.nearest_drop_pt_dist.get(pos) as f32);
			if score > best_score {
				best_score = score;
				best_pos = pos;
			}
		}
	}
	best_pos
}

impl Logic {
	pub fn new() -> Logic {
		Logic {
			ship_goal_types: HashMap::new(),
			plan: None,
			endgame: false,
		}
	}

	pub fn current_plan(&self) -> Option<&DropoffPlan> {
		self.plan.as_ref()
	}

	pub fn make_moves(&mut self, game: &Game, config: &BotConfig) -> (bool, MoveRegister) {
		let me = game.my_pid;
		let mut my_halite = game.energy[me];
		let my_ships_ids = &game.ship_id_by_player[me];
		let my_factory = &game.factories[me];
		let turns_left = game.constants.max_turns - game.turn_number;
		let endgame_margin = if game.num_players == 4 { 5 } else { 3 };
		let stop_spawn_margin = if game.num_players == 4 { 225 } else { 200 };

		let mut register = MoveRegister::new(my_ships_ids.to_vec());
		self.ship_goal_types.retain(|&id, _| my_ships_ids.contains(&id));

		// ships that can't pay the move cost hold still whatever their goal;
		// they get no command, the engine keeps them in place
		let mut immovable_pos: HashSet<Point> = HashSet::new();
		let mut my_movable: Vec<usize> = Vec::new();
		for &id in my_ships_ids {
			if !self.ship_goal_types.contains_key(&id) {
				self.ship_goal_types.insert(id, GoalType::Mine);
			}
			let ship = game.ships.get(&id).unwrap();
			if game.halite_at(ship.pos) as isize / 10 > ship.halite {
				immovable_pos.insert(ship.pos);
			} else {
				my_movable.push(id);
			}
		}

		// a funded ship standing on the planned site builds it
		let plan_target = match self.plan {
			Some(ref p) if p.underway && !p.complete => Some(p.destination),
			_ => None,
		};
		if let Some(dest) = plan_target {
			if let Some(&id) = game.ship_map.get(&dest) {
				let ship = game.ships.get(&id).unwrap();
				if ship.player == me && !register.has_command(id) {
					let covered = ship.halite as usize + game.halite_at(dest);
					if my_halite + covered >= game.constants.dropoff_cost {
						info!("building planned dropoff at ({},{})", dest.x, dest.y);
						register.register_dropoff(id);
						my_halite = my_halite
							.saturating_sub(game.constants.dropoff_cost.saturating_sub(covered));
						if let Some(ref mut p) = self.plan {
							p.complete = true;
						}
						my_movable.retain(|&mid| mid != id);
					}
				}
			}
		}

		// goal bookkeeping, including the endgame cash-out
		for &id in &my_movable {
			let ship = game.ships.get(&id).unwrap();
			let dist_to_drop = *game.nearest_drop_pt_dist.get(ship.pos);
			let endgame_collect = dist_to_drop + endgame_margin >= turns_left;
			if endgame_collect && !self.endgame {
				self.endgame = true;
				info!("endgame: cashing out all ships");
			}
			let goal = *self.ship_goal_types.get(&id).unwrap();
			let next = match goal {
				GoalType::Deposit => {
					if game.my_drop_pts.contains(&ship.pos) && !self.endgame {
						GoalType::TowardsMine
					} else {
						GoalType::Deposit
					}
				},
				GoalType::TowardsMine => {
					if ship.halite >= 950 || endgame_collect {
						GoalType::Deposit
					} else if game.halite_at(ship.pos) > game.constants.max_halite / 10 {
						GoalType::Mine
					} else {
						GoalType::TowardsMine
					}
				},
				GoalType::Mine => {
					if ship.halite >= 950 || endgame_collect {
						GoalType::Deposit
					} else if game.halite_at(ship.pos) <= game.constants.max_halite / 10 {
						GoalType::TowardsMine
					} else {
						GoalType::Mine
					}
				},
			};
			self.ship_goal_types.insert(id, next);
		}

		// pick targets; returners head for the planned site once it is underway
		let mut targets: HashMap<usize, Point> = HashMap::new();
		let mut taken_goals: HashSet<Point> = HashSet::new();
		let mut move_order = BinaryHeap::new();
		for &id in &my_movable {
			if register.has_command(id) {
				continue;
			}
			let ship = game.ships.get(&id).unwrap();
			let goal = *self.ship_goal_types.get(&id).unwrap();
			let target = match goal {
				GoalType::Deposit => {
					let home = game.nearest_drop_pos(ship.pos);
					match plan_target {
						Some(dest) if game.dist(ship.pos, dest) < game.dist(ship.pos, home) => dest,
						_ => home,
					}
				},
				GoalType::Mine => ship.pos,
				GoalType::TowardsMine => {
					let t = pick_target(game, ship.pos, &taken_goals);
					taken_goals.insert(t);
					t
				},
			};
			targets.insert(id, target);

			let mut priority = 3*game.dist(ship.pos, game.nearest_drop_pos(ship.pos)) as isize;
			match goal {
				GoalType::Deposit => {
					priority -= 300 + ship.halite/10;
				},
				GoalType::Mine => {
					priority -= 150 + game.halite_at(ship.pos) as isize/20;
				},
				GoalType::TowardsMine => {
					priority += game.dist(ship.pos, target) as isize;
				},
			}
			move_order.push(ShipPriority { id, w: priority });
		}

		let mut forbidden: HashSet<Point> = immovable_pos.iter().cloned().collect();
		if self.endgame {
			// crashing on a drop point at the end is free banking
			forbidden.retain(|p| !game.my_drop_pts.contains(p));
		}

		while let Some(ShipPriority { id, w: _ }) = move_order.pop() {
			let ship = game.ships.get(&id).unwrap();
			let target = *targets.get(&id).unwrap();
			let (next_pos, dir) = nav::route_step(game, ship.pos, target, &forbidden);
			if !game.my_drop_pts.contains(&next_pos) || !self.endgame {
				forbidden.insert(next_pos);
			}
			if dir != Direction::Still {
				register.register_move(id, dir);
			}
		}

		// ships left without a command are fair game for opportunistic builds
		let exceptional_reserve = dropoffs::exceptional_dropoffs(game, config, &mut register);

		// refresh the plan with this turn's projected income
		let returning: Vec<usize> = my_ships_ids.iter().cloned()
			.filter(|id| self.ship_goal_types.get(id) == Some(&GoalType::Deposit))
			.collect();
		let expected = mining::expected_halite_times(game, &returning, self.plan.as_ref());
		let ship_turn_value = mining::ship_turn_value(game);
		self.plan = dropoffs::update_plan(game, config, self.plan.take(),
			&expected, exceptional_reserve, ship_turn_value);

		// spawn only with the dropoff money fenced off
		let mut reserved = exceptional_reserve;
		if let Some(ref p) = self.plan {
			if p.underway && !p.complete && p.halite_needed > 0 {
				reserved += p.halite_needed as usize;
			}
		}
		let spawn = !forbidden.contains(&my_factory.pos)
			&& game.turn_number <= game.constants.max_turns - stop_spawn_margin
			&& my_halite >= game.constants.ship_cost + reserved;
		(spawn, register)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipPriority {
    pub id: usize,
    pub w: isize,
}

impl Ord for ShipPriority {
    fn cmp(&self, other: &ShipPriority) -> Ordering {
        other.w.cmp(&self.w) // so that smaller numbers go first
    }
}

impl PartialOrd for ShipPriority {
    fn partial_cmp(&self, other: &ShipPriority) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
