use std::collections::HashMap;
use data::*;
use moves::MoveRegister;
use serde_json::Value;
use std::cmp::min;

pub struct Game {
	pub turn_number: usize,
    pub max_turns: usize,
    pub constants: Constants,
    pub num_players: usize,
    pub my_pid: usize,
    pub factories: Vec<Factory>,
    pub width: usize,
    pub height: usize,
    pub halite_map: GMap<usize>,

    pub ships: HashMap<usize, Ship>,
    pub ship_id_by_player: Vec<Vec<usize>>,
    pub ship_map: HashMap<Point, usize>, // map of locations to ship IDs for lookup in ships
    pub dropoffs: Vec<Dropoff>,
    pub energy: Vec<usize>,
    pub my_drop_pts: Vec<Point>,
    pub nearest_drop_pt_idx: GMap<usize>,
    pub nearest_drop_pt_dist: GMap<usize>,
    pub enemy_drop_pts: HashMap<Point, usize>,
}

pub struct Constants {
    pub max_turns: usize,
    pub ship_cost: usize,
    pub dropoff_cost: usize,
    pub max_halite: usize,
    pub extract_ratio: usize,
}

pub fn parse_line_of_nums<I: Iterator<Item = String>>(lines_iter: &mut I) -> Vec<usize> {
    lines_iter.next().unwrap()
        .trim()
        .split_whitespace()
        .map(str::parse::<usize>)
        .map(Result::unwrap)
        .collect()
}

impl Game {
	pub fn init<I: Iterator<Item = String>>(lines_iter: &mut I,
        constant_json: Value, num_players: usize, my_pid: usize) -> Game {

        let mut factories: Vec<Factory> = Vec::new();
        let mut my_drop_pts: Vec<Point> = Vec::new();
        let mut enemy_drop_pts: HashMap<Point, usize> = HashMap::new();
        for _ in 0..num_players {
            let this_player = parse_line_of_nums(lines_iter);
            let f_x = this_player[1] as isize;
            let f_y = this_player[2] as isize;
            factories.push(Factory {
                player: this_player[0],
                pos: Point{
                    x: f_x,
                    y: f_y,
                },
            });
            if this_player[0] == my_pid {
                my_drop_pts.push(Point{x: f_x, y: f_y});
            } else {
                enemy_drop_pts.insert(Point{x: f_x, y: f_y}, this_player[0]);
            }
        }

        let dims = parse_line_of_nums(lines_iter);
        let width = dims[0];
        let height = dims[1];

        let mut h_map: Vec<Vec<usize>> = Vec::new();
        for _y in 0..height {
            h_map.push(parse_line_of_nums(lines_iter));
        }
        info!("num_players: {}, my player id: {}\n factories: {:?}",
            num_players, my_pid, factories);

        let max_turns = constant_json["MAX_TURNS"].as_u64().unwrap() as usize;
        info!("MAX_TURNS: {}", max_turns);

        Game {
			turn_number: 0,
            max_turns,
            constants: Constants {
                max_turns,
                ship_cost: constant_json["NEW_ENTITY_ENERGY_COST"].as_u64().unwrap() as usize,
                dropoff_cost: constant_json["DROPOFF_COST"].as_u64().unwrap() as usize,
                max_halite: constant_json["MAX_ENERGY"].as_u64().unwrap() as usize,
                extract_ratio: constant_json["EXTRACT_RATIO"].as_u64().unwrap() as usize,
            },
            num_players,
            my_pid,
            factories,
            width, height,
            halite_map: GMap { gmap: h_map },
            ships: HashMap::new(),
            dropoffs: Vec::new(),
            ship_id_by_player: Vec::new(),
            ship_map: HashMap::new(),
            energy: vec![0; num_players],
            my_drop_pts,
            nearest_drop_pt_idx: GMap{ gmap: vec![vec![0; width]; height] },
            nearest_drop_pt_dist: GMap{ gmap: vec![vec![width+height+1; width]; height] },
            enemy_drop_pts,
		}
	}

	pub fn ready(&mut self, name: &str) {
        self.update_dropoff_maps();
        println!("{}", name);
    }

    pub fn update_frame<I: Iterator<Item = String>>(&mut self, lines_iter: &mut I) {
        self.turn_number = str::parse::<usize>(&lines_iter.next().unwrap()).unwrap() - 1;

        info!("====== TURN {} ======", self.turn_number);

        self.ship_id_by_player.clear();
        self.ships.clear();
        self.dropoffs.clear();
        self.ship_map.clear();
        for _ in 0..self.num_players {
            let player_info = parse_line_of_nums(lines_iter);
            let player_id = player_info[0];
            let num_ships = player_info[1];
            let num_dropoffs = player_info[2];
            self.energy[player_id] = player_info[3];

            self.ship_id_by_player.push(Vec::new());
            info!("player {} info: {:?}", player_id, player_info);
            for _ in 0..num_ships {
                let ship_info = parse_line_of_nums(lines_iter);
                let ship_id = ship_info[0];
                let x = ship_info[1] as isize;
                let y = ship_info[2] as isize;
                self.ship_id_by_player[player_id].push(ship_id);
                let s = Ship {
                    player: player_id,
                    ship_id,
                    pos: Point{x, y,},
                    halite: ship_info[3] as isize,
                };
                self.ships.insert(ship_id, s);
                self.ship_map.insert(Point{x, y}, ship_id);
            }

            for _ in 0..num_dropoffs {
                let dropoff_info = parse_line_of_nums(lines_iter);
                let d_pos = Point {
                        x: dropoff_info[1] as isize,
                        y: dropoff_info[2] as isize,
                    };
                self.dropoffs.push(Dropoff {
                    player: player_id,
                    pos: d_pos,
                });
                if self.my_pid == player_id {
                    if !self.my_drop_pts.contains(&d_pos) {
                        self.my_drop_pts.push(d_pos);
                        self.update_dropoff_maps();
                    }
                } else {
                    if !self.enemy_drop_pts.contains_key(&d_pos) {
                        self.enemy_drop_pts.insert(d_pos, player_id);
                    }
                }
            }
        }

        let num_map_updates = str::parse::<usize>(&lines_iter.next().unwrap()).unwrap();
        for _ in 0..num_map_updates {
            let map_update = parse_line_of_nums(lines_iter);
            let x = map_update[0];
            let y = map_update[1];
            self.halite_map.gmap[y][x] = map_update[2];
        }
    }

    pub fn end_turn((spawn, register): (bool, MoveRegister)) {
        if spawn {
            print!("g ");
        }
        for (ship_id, command) in register.commands().iter() {
            match command {
                ShipCommand::MakeDropoff() => {
                    print!("c {} ", ship_id);
                },
                ShipCommand::MoveShip(dir) => {
                    print!("m {} {} ", ship_id, dir.get_char_encoding());
                },
            }
        }
    	println!();
    }

    pub fn update_dropoff_maps(&mut self) {
        let vmaps = self.make_vmaps(&self.my_drop_pts);
        self.nearest_drop_pt_idx = vmaps.0;
        self.nearest_drop_pt_dist = vmaps.1;
    }

    // returns (index, distance)
    pub fn make_vmaps(&self, pts: &Vec<Point>) -> (GMap<usize>, GMap<usize>) {
        // assume width == height
        let nd = pts.len();
        assert!(nd > 0);
        if nd == 1 {
            let nearest_pt_idx = GMap{ gmap: vec![vec![0; self.width]; self.height] };
            let mut nearest_pt_dist = GMap{ gmap: vec![vec![0; self.width]; self.height] };
            for d in 0..(self.width+1) {
                for p in self.tiles_at_dist(pts[0], d) {
                    *nearest_pt_dist.get_mut(p) = d;
                }
            }
            (nearest_pt_idx, nearest_pt_dist)
        } else {
            let mut open = vec![true; nd];
            let mut nearest_pt_idx = GMap{ gmap: vec![vec![self.width*self.height+1; self.width]; self.height] };
            let mut nearest_pt_dist = GMap{ gmap: vec![vec![self.width+self.height+1; self.width]; self.height] };
            for d in 0..(self.width+1) {
                for d_idx in 0..nd {
                    if open[d_idx] {
                        let mut update = false;
                        for p in self.tiles_at_dist(pts[d_idx], d) {
                            if *nearest_pt_idx.get(p) >= self.width*self.height+1 {
                                *nearest_pt_idx.get_mut(p) = d_idx;
                                *nearest_pt_dist.get_mut(p) = d;
                                update = true;
                            }
                        }
                        open[d_idx] = update;
                    }
                }
            }
            (nearest_pt_idx, nearest_pt_dist)
        }
    }

    pub fn nearest_drop_pos(&self, pos: Point) -> Point{
        let idx = *self.nearest_drop_pt_idx.get(pos);
        assert!(idx < self.my_drop_pts.len());
        self.my_drop_pts[idx]
    }

    pub fn normalize(&self, pos: Point) -> Point {
        let width: isize = self.width as isize;
        let height: isize = self.height as isize;
        let x = ((pos.x % width) + width) % width;
        let y = ((pos.y % height) + height) % height;
        Point {x, y}
    }

    pub fn halite_at(&self, pos: Point) -> usize {
        *self.halite_map.get(pos)
    }

    pub fn dist(&self, pos1: Point, pos2: Point) -> usize {
        let dx = (pos1.x - pos2.x).abs() as usize;
        let dy = (pos1.y - pos2.y).abs() as usize;
        let toroidal_dx = min(dx, self.width-dx);
        let toroidal_dy = min(dy, self.height-dy);
        toroidal_dx + toroidal_dy
    }

    pub fn tiles_at_dist(&self, pos: Point, dist: usize) -> Vec<Point> {
        // assumes width == height and both are even
        if dist == 0 {
            vec![pos]
        } else if dist < self.width/2 {
            (0..(dist as isize)).map(|d|
                self.normalize(Point{
                    x: pos.x + (dist as isize) - d,
                    y: pos.y + d}))
            .chain((0..(dist as isize)).map(|d|
                self.normalize(Point{
                    x: pos.x - d,
                    y: pos.y + (dist as isize) - d})))
            .chain((0..(dist as isize)).map(|d|
                self.normalize(Point{
                    x: pos.x - (dist as isize) + d,
                    y: pos.y - d})))
            .chain((0..(dist as isize)).map(|d|
                self.normalize(Point{
                    x: pos.x + d,
                    y: pos.y - (dist as isize) + d})))
            .collect()
        } else if dist == self.width/2 {
            (0..(dist as isize)).map(|d|
                self.normalize(Point{
                    x: pos.x + (dist as isize) - d,
                    y: pos.y + d}))
            .chain((0..(dist as isize)).map(|d|
                self.normalize(Point{
                    x: pos.x - d,
                    y: pos.y + (dist as isize) - d})))
            .chain((1..(dist as isize)).map(|d|
                self.normalize(Point{
                    x: pos.x - (dist as isize) + d,
                    y: pos.y - d})))
            .chain((1..(dist as isize)).map(|d|
                self.normalize(Point{
                    x: pos.x + d,
                    y: pos.y - (dist as isize) + d})))
            .collect()
        } else if dist <= self.width {
            let antipode = self.normalize(Point {
                x: pos.x + (self.width as isize)/2,
                y: pos.y + (self.height as isize)/2,
            });
            self.tiles_at_dist(antipode, self.width - dist)
        } else {
            vec![]
        }
    }

    pub fn tiles_within_dist(&self, pos: Point, dist: usize) -> Vec<Point> {
        let mut tiles: Vec<Point> = Vec::new();
        for d in 0..(dist+1) {
            tiles.extend(self.tiles_at_dist(pos, d));
        }
        tiles
    }

    pub fn step_toward(&self, pos: Point, d: Direction) -> Point {
        let (dx, dy) = match d {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Still => (0, 0),
        };

        self.normalize(Point { x: pos.x + dx, y: pos.y + dy })
    }

    pub fn neighbors(&self, pos: Point) -> Vec<Point> {
        Direction::adjacent_directions().iter().map(|&d| self.step_toward(pos, d)).collect()
    }

    // any shipyard or dropoff, ours or theirs
    pub fn has_structure(&self, pos: Point) -> bool {
        self.my_drop_pts.contains(&pos) || self.enemy_drop_pts.contains_key(&pos)
    }

    pub fn has_enemy_ship(&self, pos: Point) -> bool {
        match self.ship_map.get(&pos) {
            Some(id) => self.ships.get(id).unwrap().player != self.my_pid,
            None => false,
        }
    }

    pub fn my_ships_within(&self, pos: Point, radius: usize) -> Vec<usize> {
        self.ship_id_by_player[self.my_pid].iter().cloned()
            .filter(|id| self.dist(self.ships.get(id).unwrap().pos, pos) <= radius)
            .collect()
    }

    // distance to the nearest of our drop points, counting a planned site if given
    pub fn nearest_dropoff_distance(&self, pos: Point, plan_dest: Option<Point>) -> usize {
        let base = *self.nearest_drop_pt_dist.get(pos);
        match plan_dest {
            Some(dest) => min(base, self.dist(pos, dest)),
            None => base,
        }
    }

    // halite within radius, each ring discounted by another factor of decay
    pub fn halite_nearby(&self, pos: Point, radius: usize, decay: f64) -> f64 {
        let mut total = 0.0;
        let mut weight = 1.0;
        for d in 0..(radius+1) {
            let ring: usize = self.tiles_at_dist(pos, d).iter()
                .map(|&p| self.halite_at(p))
                .sum();
            total += weight * ring as f64;
            weight *= decay;
        }
        total
    }

    pub fn nearest_friendly_ship_turns(&self, pos: Point) -> Option<usize> {
        self.ship_id_by_player[self.my_pid].iter()
            .map(|id| self.dist(self.ships.get(id).unwrap().pos, pos))
            .min()
    }
}

#[derive(Debug)]
pub struct GMap<T> {
    pub gmap: Vec<Vec<T>>,
}

impl <T> GMap<T> {
    pub fn get(&self, pos: Point) -> &T {
        &self.gmap[pos.y as usize][pos.x as usize]
    }

    pub fn get_mut(&mut self, pos: Point) -> &mut T {
        &mut self.gmap[pos.y as usize][pos.x as usize]
    }
}

#[cfg(test)]
impl Game {
    // two players, our shipyard at (4,4), theirs at the antipode, empty map
    pub fn mock(width: usize, height: usize) -> Game {
        let my_base = Point { x: 4, y: 4 };
        let enemy_base = Point { x: (width/2 + 4) as isize, y: (height/2 + 4) as isize };
        let factories = vec![
            Factory { player: 0, pos: my_base },
            Factory { player: 1, pos: enemy_base },
        ];
        let mut enemy_drop_pts = HashMap::new();
        enemy_drop_pts.insert(enemy_base, 1);
        let mut game = Game {
            turn_number: 0,
            max_turns: 400,
            constants: Constants {
                max_turns: 400,
                ship_cost: 1000,
                dropoff_cost: 4000,
                max_halite: 1000,
                extract_ratio: 4,
            },
            num_players: 2,
            my_pid: 0,
            factories,
            width, height,
            halite_map: GMap { gmap: vec![vec![0; width]; height] },
            ships: HashMap::new(),
            dropoffs: Vec::new(),
            ship_id_by_player: vec![Vec::new(), Vec::new()],
            ship_map: HashMap::new(),
            energy: vec![5000, 5000],
            my_drop_pts: vec![my_base],
            nearest_drop_pt_idx: GMap{ gmap: vec![vec![0; width]; height] },
            nearest_drop_pt_dist: GMap{ gmap: vec![vec![width+height+1; width]; height] },
            enemy_drop_pts,
        };
        game.update_dropoff_maps();
        game
    }

    pub fn mock_add_ship(&mut self, player: usize, ship_id: usize, pos: Point, halite: isize) {
        self.ship_id_by_player[player].push(ship_id);
        self.ships.insert(ship_id, Ship { player, ship_id, pos, halite });
        self.ship_map.insert(pos, ship_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_wraps_around_the_torus() {
        let game = Game::mock(32, 32);
        assert_eq!(game.dist(Point{x: 0, y: 0}, Point{x: 31, y: 0}), 1);
        assert_eq!(game.dist(Point{x: 2, y: 3}, Point{x: 5, y: 1}), 5);
        assert_eq!(game.dist(Point{x: 0, y: 0}, Point{x: 16, y: 16}), 32);
    }

    #[test]
    fn tiles_at_dist_forms_rings() {
        let game = Game::mock(32, 32);
        let center = Point { x: 10, y: 10 };
        assert_eq!(game.tiles_at_dist(center, 0), vec![center]);
        assert_eq!(game.tiles_at_dist(center, 1).len(), 4);
        assert_eq!(game.tiles_at_dist(center, 3).len(), 12);
        for p in game.tiles_at_dist(center, 3) {
            assert_eq!(game.dist(center, p), 3);
        }
    }

    #[test]
    fn nearest_drop_distance_tracks_shipyard() {
        let game = Game::mock(32, 32);
        assert_eq!(*game.nearest_drop_pt_dist.get(Point{x: 4, y: 4}), 0);
        assert_eq!(*game.nearest_drop_pt_dist.get(Point{x: 7, y: 4}), 3);
        // a planned site closer than any built structure shortens the answer
        assert_eq!(game.nearest_dropoff_distance(Point{x: 20, y: 4}, None), 16);
        assert_eq!(game.nearest_dropoff_distance(Point{x: 20, y: 4}, Some(Point{x: 22, y: 4})), 2);
    }

    #[test]
    fn halite_nearby_discounts_by_ring() {
        let mut game = Game::mock(32, 32);
        for x in 0..32 {
            for y in 0..32 {
                game.halite_map.gmap[y][x] = 100;
            }
        }
        // center at weight 1, four neighbors at one factor of decay
        let total = game.halite_nearby(Point{x: 10, y: 10}, 1, 0.5);
        assert!((total - 300.0).abs() < 1e-9);
    }

    #[test]
    fn enemy_and_friendly_ships_distinguished() {
        let mut game = Game::mock(32, 32);
        game.mock_add_ship(0, 1, Point{x: 10, y: 10}, 0);
        game.mock_add_ship(1, 2, Point{x: 12, y: 10}, 0);
        assert!(!game.has_enemy_ship(Point{x: 10, y: 10}));
        assert!(game.has_enemy_ship(Point{x: 12, y: 10}));
        assert_eq!(game.my_ships_within(Point{x: 10, y: 10}, 3), vec![1]);
        assert_eq!(game.nearest_friendly_ship_turns(Point{x: 14, y: 10}), Some(4));
    }
}
