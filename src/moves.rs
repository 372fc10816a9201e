use std::collections::HashMap;
use data::{Direction, ShipCommand};

// Collects the commands for one turn. Ships never get more than one command;
// anything left unregistered at the end of the turn simply sits still, which
// is also what makes it a candidate for an exceptional dropoff.
pub struct MoveRegister {
    ship_ids: Vec<usize>,
    commands: HashMap<usize, ShipCommand>,
}

impl MoveRegister {
    pub fn new(ship_ids: Vec<usize>) -> MoveRegister {
        MoveRegister {
            ship_ids,
            commands: HashMap::new(),
        }
    }

    pub fn register_move(&mut self, ship_id: usize, dir: Direction) {
        self.commands.insert(ship_id, ShipCommand::MoveShip(dir));
    }

    pub fn register_dropoff(&mut self, ship_id: usize) {
        self.commands.insert(ship_id, ShipCommand::MakeDropoff());
    }

    pub fn has_command(&self, ship_id: usize) -> bool {
        self.commands.contains_key(&ship_id)
    }

    // ships still without a command, in registration order
    pub fn remaining_ships(&self) -> Vec<usize> {
        self.ship_ids.iter().cloned()
            .filter(|id| !self.commands.contains_key(id))
            .collect()
    }

    pub fn commands(&self) -> &HashMap<usize, ShipCommand> {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_ships_keeps_input_order() {
        let mut register = MoveRegister::new(vec![7, 3, 11]);
        assert_eq!(register.remaining_ships(), vec![7, 3, 11]);
        register.register_move(3, Direction::North);
        assert_eq!(register.remaining_ships(), vec![7, 11]);
        register.register_dropoff(7);
        assert!(register.has_command(7));
        assert_eq!(register.remaining_ships(), vec![11]);
    }
}
