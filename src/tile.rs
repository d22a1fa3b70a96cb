use std::fmt::{self, Display, Formatter};

use crate::data::Dir;

/// Characters allowed in level rows.
pub const TILE_CHARS: &str = " #$@*._+";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ground {
    Floor,
    Wall,
    /// Outside the playable area - blocks like a wall but isn't one.
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    Empty,
    Box,
    /// The player and the direction it's facing.
    Player(Dir),
}

/// One cell of the board.
///
/// A cell holds at most one of box or player, the target flag is independent of both.
/// Only floor tiles are ever occupied or marked as targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    ground: Ground,
    target: bool,
    occupant: Occupant,
}

impl Tile {
    pub const FLOOR: Tile = Tile::new(Ground::Floor, false, Occupant::Empty);
    pub const WALL: Tile = Tile::new(Ground::Wall, false, Occupant::Empty);
    pub const OUTSIDE: Tile = Tile::new(Ground::Outside, false, Occupant::Empty);
    pub const TARGET: Tile = Tile::new(Ground::Floor, true, Occupant::Empty);
    pub const BOX: Tile = Tile::new(Ground::Floor, false, Occupant::Box);
    pub const BOX_ON_TARGET: Tile = Tile::new(Ground::Floor, true, Occupant::Box);

    const fn new(ground: Ground, target: bool, occupant: Occupant) -> Self {
        Tile {
            ground,
            target,
            occupant,
        }
    }

    pub fn from_char(c: char) -> Option<Tile> {
        let tile = match c {
            ' ' => Tile::FLOOR,
            '#' => Tile::WALL,
            '$' => Tile::BOX,
            '@' => Tile::new(Ground::Floor, false, Occupant::Player(Dir::Down)),
            '*' => Tile::BOX_ON_TARGET,
            '.' => Tile::TARGET,
            '_' => Tile::OUTSIDE,
            '+' => Tile::new(Ground::Floor, true, Occupant::Player(Dir::Down)),
            _ => return None,
        };
        Some(tile)
    }

    pub fn to_char(self) -> char {
        match (self.ground, self.occupant, self.target) {
            (Ground::Wall, _, _) => '#',
            (Ground::Outside, _, _) => '_',
            (Ground::Floor, Occupant::Empty, false) => ' ',
            (Ground::Floor, Occupant::Empty, true) => '.',
            (Ground::Floor, Occupant::Box, false) => '$',
            (Ground::Floor, Occupant::Box, true) => '*',
            (Ground::Floor, Occupant::Player(_), false) => '@',
            (Ground::Floor, Occupant::Player(_), true) => '+',
        }
    }

    pub fn ground(self) -> Ground {
        self.ground
    }

    pub fn occupant(self) -> Occupant {
        self.occupant
    }

    pub fn is_wall(self) -> bool {
        self.ground == Ground::Wall
    }

    pub fn is_outside(self) -> bool {
        self.ground == Ground::Outside
    }

    pub fn is_blocked(self) -> bool {
        self.ground != Ground::Floor
    }

    pub fn is_target(self) -> bool {
        self.target
    }

    pub fn is_box(self) -> bool {
        self.occupant == Occupant::Box
    }

    pub fn is_player(self) -> bool {
        self.facing().is_some()
    }

    /// A box or the player can move here (the player's own cell counts).
    pub fn is_free_space(self) -> bool {
        !self.is_box() && !self.is_blocked()
    }

    pub fn facing(self) -> Option<Dir> {
        match self.occupant {
            Occupant::Player(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn with_occupant(self, occupant: Occupant) -> Tile {
        debug_assert!(occupant == Occupant::Empty || self.ground == Ground::Floor);
        Tile { occupant, ..self }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
