use std::collections::HashSet;
use data::{Direction, Point};
use game::Game;
use pathfinding::directed::astar::astar;
use rand::{thread_rng, Rng};

// One step along a cheap path toward target. Falls back to a greedy step when
// the planned square is already claimed this turn.
pub fn route_step(game: &Game, start: Point, target: Point, forbidden: &HashSet<Point>)
        -> (Point, Direction) {
    if start == target {
        return (start, Direction::Still);
    }
    let k: usize = 100;
    let result = astar(
        &start,
        |&p| {
            game.neighbors(p).into_iter()
                .map(|n| (n, k + game.halite_at(n)/10))
                .collect::<Vec<(Point, usize)>>()
        },
        |&p| k * game.dist(p, target),
        |&p| p == target,
    );
    if let Some((path, _)) = result {
        if path.len() > 1 && !forbidden.contains(&path[1]) {
            return (path[1], direction_to(game, start, path[1]));
        }
    }
    greedy_step(game, start, target, forbidden)
}

fn direction_to(game: &Game, from: Point, to: Point) -> Direction {
    for d in Direction::all_directions() {
        if game.step_toward(from, d) == to {
            return d;
        }
    }
    Direction::Still
}

// Step that shrinks the distance if it can, dodging claimed squares.
// Direction order is shuffled so equal-length detours don't always pick the
// same side.
pub fn greedy_step(game: &Game, start: Point, target: Point, forbidden: &HashSet<Point>)
        -> (Point, Direction) {
    let mut dirs = Direction::all_directions();
    thread_rng().shuffle(&mut dirs);
    let mut best_score = 100000;
    let mut best_pos = start;
    let mut best_dir = Direction::Still;
    for d in dirs {
        let new_pos = game.step_toward(start, d);
        let mut score = game.dist(new_pos, target);
        if forbidden.contains(&new_pos) {
            score += 1000;
        }
        if score < best_score {
            best_score = score;
            best_pos = new_pos;
            best_dir = d;
        }
    }
    (best_pos, best_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_step_closes_the_distance() {
        let game = Game::mock(32, 32);
        let start = Point { x: 4, y: 4 };
        let target = Point { x: 10, y: 4 };
        let (pos, dir) = route_step(&game, start, target, &HashSet::new());
        assert!(game.dist(pos, target) < game.dist(start, target));
        assert!(dir != Direction::Still);
    }

    #[test]
    fn route_step_detours_around_expensive_ground() {
        let mut game = Game::mock(32, 32);
        // a wall of costly squares straight east of the start
        for x in 5..10 {
            game.halite_map.gmap[4][x] = 1000;
        }
        let start = Point { x: 4, y: 4 };
        let target = Point { x: 10, y: 4 };
        let (pos, _) = route_step(&game, start, target, &HashSet::new());
        // stepping off the row is cheaper than plowing through it
        assert!(pos != Point { x: 5, y: 4 });
    }

    #[test]
    fn greedy_step_avoids_claimed_squares() {
        let game = Game::mock(32, 32);
        let start = Point { x: 4, y: 4 };
        let target = Point { x: 6, y: 4 };
        let mut forbidden = HashSet::new();
        forbidden.insert(Point { x: 5, y: 4 });
        let (pos, _) = greedy_step(&game, start, target, &forbidden);
        assert!(pos != Point { x: 5, y: 4 });
    }

    #[test]
    fn arrived_ships_stay_put() {
        let game = Game::mock(32, 32);
        let here = Point { x: 8, y: 8 };
        let (pos, dir) = route_step(&game, here, here, &HashSet::new());
        assert_eq!(pos, here);
        assert_eq!(dir, Direction::Still);
    }
}
