use serde_json::Value;
use std::fs;

// Tuning knobs for the bot, fixed for the lifetime of a game. Built once in
// main and passed by reference; the optional JSON file overrides individual
// fields for local experiments.
#[derive(Debug, Clone)]
pub struct BotConfig {
    // stop planning dropoffs past this fraction of the game
    pub dropoff_turns: f64,
    // fleet sizes required before the first, second, and later dropoffs
    pub first_dropoff_ships: usize,
    pub second_dropoff_ships: usize,
    pub ships_per_dropoff: usize,
    // absolute nearby-halite floor for a site, and the floor tied to the
    // value of a ship turn
    pub dropoff_halite: f64,
    pub dropoff_halite_ship_turn: f64,
    pub dropoff_radius: usize,
    pub nearby_halite_decay: f64,
    pub min_dropoff_distance: usize,
    pub dropoff_extra_dist_bonus: f64,
    // a site without one of our ships inside this range is rejected outright
    pub dropoff_ship_max_distance: usize,
    pub dropoff_min_nearby_ships: usize,
    // sample cap when estimating territory control
    pub dropoff_territory_ships: usize,
    // fraction of a full hold a returning builder is assumed to carry
    pub assumed_returning_proportion: f64,
    // square halite floor for exceptional dropoffs; must stay below the
    // dropoff cost or the graduated factor degenerates
    pub min_exceptional_halite: usize,
}

impl Default for BotConfig {
    fn default() -> BotConfig {
        BotConfig {
            dropoff_turns: 0.8,
            first_dropoff_ships: 12,
            second_dropoff_ships: 8,
            ships_per_dropoff: 10,
            dropoff_halite: 8000.0,
            dropoff_halite_ship_turn: 60000.0,
            dropoff_radius: 8,
            nearby_halite_decay: 0.8,
            min_dropoff_distance: 17,
            dropoff_extra_dist_bonus: 0.02,
            dropoff_ship_max_distance: 16,
            dropoff_min_nearby_ships: 2,
            dropoff_territory_ships: 10,
            assumed_returning_proportion: 0.7,
            min_exceptional_halite: 3000,
        }
    }
}

impl BotConfig {
    pub fn load(path: &str) -> BotConfig {
        let mut config = BotConfig::default();
        if let Ok(text) = fs::read_to_string(path) {
            if let Ok(overrides) = ::serde_json::from_str::<Value>(&text) {
                config.apply_overrides(&overrides);
            }
        }
        config
    }

    pub fn apply_overrides(&mut self, v: &Value) {
        if let Some(x) = v["DROPOFF_TURNS"].as_f64() { self.dropoff_turns = x; }
        if let Some(x) = v["FIRST_DROPOFF_SHIPS"].as_u64() { self.first_dropoff_ships = x as usize; }
        if let Some(x) = v["SECOND_DROPOFF_SHIPS"].as_u64() { self.second_dropoff_ships = x as usize; }
        if let Some(x) = v["SHIPS_PER_DROPOFF"].as_u64() { self.ships_per_dropoff = x as usize; }
        if let Some(x) = v["DROPOFF_HALITE"].as_f64() { self.dropoff_halite = x; }
        if let Some(x) = v["DROPOFF_HALITE_SHIP_TURN"].as_f64() { self.dropoff_halite_ship_turn = x; }
        if let Some(x) = v["DROPOFF_RADIUS"].as_u64() { self.dropoff_radius = x as usize; }
        if let Some(x) = v["NEARBY_HALITE_DECAY"].as_f64() { self.nearby_halite_decay = x; }
        if let Some(x) = v["MIN_DROPOFF_DISTANCE"].as_u64() { self.min_dropoff_distance = x as usize; }
        if let Some(x) = v["DROPOFF_EXTRA_DIST_BONUS"].as_f64() { self.dropoff_extra_dist_bonus = x; }
        if let Some(x) = v["DROPOFF_SHIP_MAX_DISTANCE"].as_u64() { self.dropoff_ship_max_distance = x as usize; }
        if let Some(x) = v["DROPOFF_MIN_NEARBY_SHIPS"].as_u64() { self.dropoff_min_nearby_ships = x as usize; }
        if let Some(x) = v["DROPOFF_TERRITORY_SHIPS"].as_u64() { self.dropoff_territory_ships = x as usize; }
        if let Some(x) = v["ASSUMED_RETURNING_PROPORTION"].as_f64() { self.assumed_returning_proportion = x; }
        if let Some(x) = v["MIN_EXCEPTIONAL_HALITE"].as_u64() { self.min_exceptional_halite = x as usize; }
    }
}
