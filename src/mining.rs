use std::collections::HashMap;
use dropoffs::DropoffPlan;
use game::Game;

// What one ship-turn is roughly worth: the mean mineable halite per cell per
// turn. Used to price dropoffs against building another ship.
pub fn ship_turn_value(game: &Game) -> f64 {
    let total: usize = game.halite_map.gmap.iter()
        .map(|row| row.iter().sum::<usize>())
        .sum();
    let cells = (game.width * game.height) as f64;
    let per_turn = total as f64 / cells / game.constants.extract_ratio as f64;
    per_turn.max(1.0)
}

// Projected bank income keyed by turns from now: each returning ship is
// expected to land its whole hold when it reaches the nearest drop point
// (or the planned site, once that is where returners are heading).
pub fn expected_halite_times(game: &Game, returning: &[usize], plan: Option<&DropoffPlan>)
        -> HashMap<usize, Vec<f64>> {
    let plan_dest = match plan {
        Some(p) if p.underway && !p.complete => Some(p.destination),
        _ => None,
    };
    let mut times: HashMap<usize, Vec<f64>> = HashMap::new();
    for id in returning {
        let ship = game.ships.get(id).unwrap();
        let turns = game.nearest_dropoff_distance(ship.pos, plan_dest);
        times.entry(turns).or_insert_with(Vec::new).push(ship.halite as f64);
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::Point;

    #[test]
    fn ship_turn_value_tracks_mean_halite() {
        let mut game = Game::mock(32, 32);
        for x in 0..32 {
            for y in 0..32 {
                game.halite_map.gmap[y][x] = 400;
            }
        }
        // 400 per cell at an extract ratio of 4
        assert!((ship_turn_value(&game) - 100.0).abs() < 1e-9);
        // an empty map still prices a ship turn above zero
        let empty = Game::mock(32, 32);
        assert!(ship_turn_value(&empty) >= 1.0);
    }

    #[test]
    fn returners_grouped_by_arrival_turn() {
        let mut game = Game::mock(32, 32);
        game.mock_add_ship(0, 1, Point{x: 7, y: 4}, 900);
        game.mock_add_ship(0, 2, Point{x: 4, y: 7}, 650);
        game.mock_add_ship(0, 3, Point{x: 4, y: 12}, 500);
        let times = expected_halite_times(&game, &[1, 2, 3], None);
        assert_eq!(times.get(&3), Some(&vec![900.0, 650.0]));
        assert_eq!(times.get(&8), Some(&vec![500.0]));
        assert_eq!(times.len(), 2);
    }
}
