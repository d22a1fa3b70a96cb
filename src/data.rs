use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: i32,
    pub c: i32,
}

impl Pos {
    pub fn new(r: i32, c: i32) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> i32 {
        (self.r - other.r).abs() + (self.c - other.c).abs()
    }

    pub fn neighbors(self) -> [Pos; 4] {
        [self + Dir::Up, self + Dir::Right, self + Dir::Down, self + Dir::Left]
    }

    pub fn diagonals(self) -> [Pos; 4] {
        [
            Pos::new(self.r - 1, self.c - 1),
            Pos::new(self.r - 1, self.c + 1),
            Pos::new(self.r + 1, self.c - 1),
            Pos::new(self.r + 1, self.c + 1),
        ]
    }

    /// The direction leading to an adjacent position.
    pub fn dir_to(self, other: Pos) -> Option<Dir> {
        DIRECTIONS.iter().cloned().find(|&dir| self + dir == other)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

// .--------> c
// |
// |
// v
// r

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.delta();
        Pos::new(self.r + dr, self.c + dc)
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}
