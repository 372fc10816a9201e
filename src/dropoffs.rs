use std::collections::HashMap;
use config::BotConfig;
use data::Point;
use game::Game;
use moves::MoveRegister;

// Intent to build a dropoff at destination. There is never more than one of
// these alive; the turn logic owns it and hands it back every turn.
#[derive(Debug, Clone)]
pub struct DropoffPlan {
    pub destination: Point,
    // returners should already be heading there
    pub underway: bool,
    // set once the build command actually went out
    pub complete: bool,
    // bank halite still missing, refreshed every turn the plan is alive
    pub halite_needed: isize,
}

impl DropoffPlan {
    pub fn new(destination: Point) -> DropoffPlan {
        DropoffPlan {
            destination,
            underway: false,
            complete: false,
            halite_needed: 0,
        }
    }
}

// One decision per turn: keep, replace, or drop the plan, and refresh whether
// it is underway given the projected income of returning ships.
pub fn update_plan(game: &Game, config: &BotConfig, current: Option<DropoffPlan>,
        expected_halite_times: &HashMap<usize, Vec<f64>>, exceptional_reserve: usize,
        ship_turn_value: f64) -> Option<DropoffPlan> {
    // too late in the game for a new dropoff to pay for itself
    if game.turn_number as f64 > game.constants.max_turns as f64 * config.dropoff_turns {
        return None;
    }
    if game.ship_id_by_player[game.my_pid].len() < ships_needed_for_next_dropoff(game, config) {
        return None;
    }

    let mut plan = match current {
        Some(p) => if p.complete { None } else { Some(p) },
        None => None,
    };

    // Replan the site unless the plan is underway; once returners are being
    // routed there we stop second-guessing the location.
    if plan.as_ref().map_or(true, |p| !p.underway) {
        // A dropoff saves ship turns in proportion to the halite around it,
        // while the same bank buys a ship worth so many turns outright. The
        // site has to clear whichever bar is higher.
        let threshold = config.dropoff_halite
            .max(config.dropoff_halite_ship_turn / ship_turn_value);
        info!("need {:.0} nearby halite for a dropoff ({:.0} absolute, {:.0}/{:.2} ship-value)",
            threshold, config.dropoff_halite, config.dropoff_halite_ship_turn, ship_turn_value);
        if let Some(pos) = best_site(game, config, threshold) {
            info!("new dropoff plan at ({},{})", pos.x, pos.y);
            plan = Some(DropoffPlan::new(pos));
        }
    }

    let mut plan = match plan {
        Some(p) => p,
        None => return None,
    };
    let dest = plan.destination;

    // An underway plan skipped the scan above, so the site conditions have to
    // be re-checked every turn; a plan can be aborted even after committing.
    if game.has_structure(dest) {
        return None;
    }
    for nbr in game.tiles_within_dist(dest, 1) {
        if game.has_enemy_ship(nbr) {
            info!("dropping dropoff plan at ({},{}): enemy next to the site", dest.x, dest.y);
            return None;
        }
    }

    // whoever ends up building it arrives with a partly full hold
    let assumed_ship_halite =
        (config.assumed_returning_proportion * game.constants.max_halite as f64) as isize;
    plan.halite_needed = game.constants.dropoff_cost as isize
        - game.halite_at(dest) as isize
        - assumed_ship_halite;

    let bank = game.energy[game.my_pid] as f64 - exceptional_reserve as f64;
    let funded = funding_turn(bank, expected_halite_times, plan.halite_needed);
    let arrival = game.nearest_friendly_ship_turns(dest);

    // Underway only if the halite is projected to be there no later than the
    // nearest ship could be.
    plan.underway = match (funded, arrival) {
        (Some(f), Some(a)) => {
            if f > a {
                info!("dropoff at ({},{}): ship {} turns out but halite needs {} turns",
                    dest.x, dest.y, a, f);
                false
            } else {
                info!("dropoff plan at ({},{}) underway", dest.x, dest.y);
                true
            }
        },
        _ => {
            info!("no funding in sight for dropoff at ({},{}) - saving up {}",
                dest.x, dest.y, plan.halite_needed);
            false
        },
    };

    Some(plan)
}

fn ships_needed_for_next_dropoff(game: &Game, config: &BotConfig) -> usize {
    // first entry of my_drop_pts is the shipyard
    let built = game.my_drop_pts.len() - 1;
    if built == 0 {
        config.first_dropoff_ships
    } else {
        config.first_dropoff_ships + config.second_dropoff_ships
            + (built - 1) * config.ships_per_dropoff
    }
}

// Scan the whole grid for the best site clearing the threshold.
fn best_site(game: &Game, config: &BotConfig, threshold: f64) -> Option<Point> {
    let mut best_value = threshold;
    let mut best_pos: Option<Point> = None;
    for x in 0..game.width {
        for y in 0..game.height {
            let pos = Point { x: x as isize, y: y as isize };
            if game.has_structure(pos) {
                continue;
            }
            // an adjacent enemy will mine out or contest the square
            let mut enemy_nearby = false;
            for nbr in game.tiles_within_dist(pos, 1) {
                if game.has_enemy_ship(nbr) {
                    enemy_nearby = true;
                }
            }
            if enemy_nearby {
                continue;
            }
            let distance = game.nearest_dropoff_distance(pos, None);
            if distance < config.min_dropoff_distance {
                continue;
            }
            if game.my_ships_within(pos, config.dropoff_ship_max_distance).is_empty() {
                continue;
            }

            let value = site_score(game, config, pos, distance);
            if value > best_value {
                let nearby_ships = game.my_ships_within(pos, config.dropoff_radius).len();
                if nearby_ships > config.dropoff_min_nearby_ships {
                    best_value = value;
                    best_pos = Some(pos);
                }
            }
        }
    }
    best_pos
}

// Nearby halite, discounted for contested territory and boosted for distance
// from the drop points we already have. Shared with the exceptional pass.
fn region_value(game: &Game, config: &BotConfig, pos: Point, dropoff_distance: usize) -> f64 {
    let mut value = game.halite_nearby(pos, config.dropoff_radius, config.nearby_halite_decay);
    value *= control(game, pos, config.dropoff_radius, config.dropoff_territory_ships);
    value * (1.0 + (dropoff_distance as f64 - config.min_dropoff_distance as f64)
        * config.dropoff_extra_dist_bonus)
}

fn site_score(game: &Game, config: &BotConfig, pos: Point, dropoff_distance: usize) -> f64 {
    let value = region_value(game, config, pos, dropoff_distance);
    // a square already piled with halite covers part of its own cost
    let mut cost_norm = (game.constants.dropoff_cost as f64 - game.halite_at(pos) as f64)
        / game.constants.dropoff_cost as f64;
    if cost_norm <= 0.1 {
        cost_norm = 0.1;
    }
    value / cost_norm
}

// How much of the region around pos we hold, sampling at most sample_cap
// ships ring by ring. 1.0 when we match or outnumber them, sliding toward 0
// as they outnumber us.
pub fn control(game: &Game, pos: Point, radius: usize, sample_cap: usize) -> f64 {
    let (ours, theirs) = game.tiles_within_dist(pos, radius).into_iter()
        .filter_map(|p| game.ship_map.get(&p))
        .map(|id| game.ships.get(id).unwrap().player == game.my_pid)
        .take(sample_cap)
        .fold((0usize, 0usize), |(ours, theirs), friendly| {
            if friendly { (ours + 1, theirs) } else { (ours, theirs + 1) }
        });
    if ours >= theirs {
        1.0
    } else {
        (ours as f64 - theirs as f64 + sample_cap as f64) / sample_cap as f64
    }
}

// First turn at which the bank plus projected income strictly exceeds the
// amount needed; income scheduled for a turn counts from that turn on.
fn funding_turn(bank: f64, expected: &HashMap<usize, Vec<f64>>, halite_needed: isize)
        -> Option<usize> {
    let horizon = expected.keys().cloned().max().unwrap_or(0);
    let mut total = bank;
    for turn in 0..(horizon + 1) {
        if let Some(arrivals) = expected.get(&turn) {
            total += arrivals.iter().sum::<f64>();
        }
        if total > halite_needed as f64 {
            return Some(turn);
        }
    }
    None
}

// Convert ships parked on huge piles into dropoffs, relaxing the usual site
// requirements in proportion to how much of the cost the pile already covers.
// Returns the bank halite reserved for the builds committed here.
pub fn exceptional_dropoffs(game: &Game, config: &BotConfig, register: &mut MoveRegister)
        -> usize {
    if game.turn_number as f64 > game.constants.max_turns as f64 * config.dropoff_turns {
        return 0;
    }
    let dropoff_cost = game.constants.dropoff_cost;
    let mut reserved = 0usize;

    for id in register.remaining_ships() {
        let ship = game.ships.get(&id).unwrap();
        let cell_halite = game.halite_at(ship.pos);
        if cell_halite < config.min_exceptional_halite {
            continue;
        }

        if cell_halite > dropoff_cost {
            // the square pays for the whole dropoff by itself
            info!("free exceptional dropoff at ({},{})", ship.pos.x, ship.pos.y);
            register.register_dropoff(id);
            continue;
        }

        let mut halite_to_build = dropoff_cost as isize - ship.halite - cell_halite as isize;
        if halite_to_build < 0 {
            halite_to_build = 0;
        }
        let halite_to_build = halite_to_build as usize;
        if reserved + halite_to_build > game.energy[game.my_pid] {
            continue;
        }

        // p runs from 1 at the exceptional floor down to 0 at full cost; the
        // richer the square, the less we demand of it
        let p = 1.0 - (cell_halite - config.min_exceptional_halite) as f64
            / (dropoff_cost - config.min_exceptional_halite) as f64;

        if game.has_structure(ship.pos) {
            continue;
        }
        let distance = game.nearest_dropoff_distance(ship.pos, None);
        if (distance as f64) < config.min_dropoff_distance as f64 * p {
            continue;
        }

        let value = region_value(game, config, ship.pos, distance);
        if value > config.dropoff_halite {
            let nearby_ships = game.my_ships_within(ship.pos, config.dropoff_radius).len();
            if nearby_ships as f64 > config.dropoff_min_nearby_ships as f64 * p {
                info!("exceptional dropoff at ({},{}), reserving {}",
                    ship.pos.x, ship.pos.y, halite_to_build);
                register.register_dropoff(id);
                reserved += halite_to_build;
            }
        }
    }
    reserved
}
