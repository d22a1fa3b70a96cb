use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;
use log::debug;

use crate::data::{Dir, Pos};
use crate::level::Level;
use crate::moves::MoveRecord;
use crate::reachability::Reachability;
use crate::tile::{Occupant, Tile};
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardErr {
    Empty,
    Pos(usize, usize),
    NoPlayer,
    MultiplePlayers,
}

impl Display for BoardErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            BoardErr::Empty => write!(f, "Empty level"),
            BoardErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            BoardErr::NoPlayer => write!(f, "No player"),
            BoardErr::MultiplePlayers => write!(f, "More than one player"),
        }
    }
}

impl Error for BoardErr {}

/// The state of the level being played.
///
/// All mutation goes through the move engine (see `moves`),
/// which keeps the box counters and the reachability cache in sync with the grid.
#[derive(Clone)]
pub struct Board {
    grid: Vec2d<Tile>,
    player_pos: Pos,
    box_cnt: usize,
    boxes_on_target: usize,
    pub(crate) history: Vec<MoveRecord>,
    reachable: Reachability,
}

impl Board {
    pub fn new(level: &Level) -> Result<Self, BoardErr> {
        let mut rows = Vec::new();
        for (r, line) in level.rows().iter().enumerate() {
            let mut row = Vec::new();
            for (c, cur_char) in line.chars().enumerate() {
                row.push(Tile::from_char(cur_char).ok_or(BoardErr::Pos(r, c))?);
            }
            rows.push(row);
        }
        let grid = Vec2d::from_rows(rows, Tile::OUTSIDE);
        if grid.rows() == 0 || grid.cols() == 0 {
            return Err(BoardErr::Empty);
        }

        let mut player_pos = None;
        let mut box_cnt = 0;
        let mut boxes_on_target = 0;
        for pos in grid.positions() {
            let tile = grid[pos];
            if tile.is_player() {
                if player_pos.is_some() {
                    return Err(BoardErr::MultiplePlayers);
                }
                player_pos = Some(pos);
            }
            if tile.is_box() {
                box_cnt += 1;
                if tile.is_target() {
                    boxes_on_target += 1;
                }
            }
        }
        let player_pos = player_pos.ok_or(BoardErr::NoPlayer)?;

        debug!(
            "Loaded {}: {} boxes, {} on target",
            level.name(),
            box_cnt,
            boxes_on_target
        );
        Ok(Board {
            grid,
            player_pos,
            box_cnt,
            boxes_on_target,
            history: Vec::new(),
            reachable: Reachability::default(),
        })
    }

    /// Replaces the board with a fresh one built from `level`.
    /// Leaves the board untouched on error.
    pub fn load(&mut self, level: &Level) -> Result<(), BoardErr> {
        *self = Board::new(level)?;
        Ok(())
    }

    pub fn grid(&self) -> &Vec2d<Tile> {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Callers have to check `in_bounds` first.
    pub fn get(&self, pos: Pos) -> Tile {
        self.grid[pos]
    }

    pub(crate) fn set(&mut self, pos: Pos, tile: Tile) {
        self.grid[pos] = tile;
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.grid.contains(pos)
    }

    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.get(pos).is_blocked()
    }

    pub fn is_box(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.get(pos).is_box()
    }

    pub fn is_free_space(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.get(pos).is_free_space()
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn facing(&self) -> Dir {
        self.get(self.player_pos).facing().unwrap_or(Dir::Down)
    }

    pub fn box_cnt(&self) -> usize {
        self.box_cnt
    }

    pub fn boxes_on_target(&self) -> usize {
        self.boxes_on_target
    }

    /// Number of pushes that can be undone.
    pub fn push_cnt(&self) -> usize {
        self.history.len()
    }

    pub fn is_completed(&self) -> bool {
        self.boxes_on_target == self.box_cnt
    }

    /// Cells the player can walk to without pushing anything.
    pub fn reachable(&mut self) -> &FnvHashSet<Pos> {
        self.reachable.cells(&self.grid, self.player_pos)
    }

    pub fn is_reachable(&mut self, pos: Pos) -> bool {
        self.reachable.contains(&self.grid, self.player_pos, pos)
    }

    pub(crate) fn turn_player(&mut self, facing: Dir) {
        let pos = self.player_pos;
        let tile = self.get(pos).with_occupant(Occupant::Player(facing));
        self.set(pos, tile);
    }

    pub(crate) fn place_player(&mut self, pos: Pos, facing: Dir) {
        let old = self.get(self.player_pos).with_occupant(Occupant::Empty);
        self.set(self.player_pos, old);
        self.player_pos = pos;
        self.turn_player(facing);
        self.reachable.invalidate();
    }

    /// Unconditionally moves the box at `from` one cell in `dir`.
    pub(crate) fn move_box(&mut self, from: Pos, dir: Dir) {
        let to = from + dir;
        debug_assert!(self.is_box(from));
        debug_assert!(self.is_free_space(to));

        let from_tile = self.get(from);
        let to_tile = self.get(to);
        self.set(from, from_tile.with_occupant(Occupant::Empty));
        self.set(to, to_tile.with_occupant(Occupant::Box));
        if from_tile.is_target() != to_tile.is_target() {
            if to_tile.is_target() {
                self.boxes_on_target += 1;
            } else {
                self.boxes_on_target = self.boxes_on_target.saturating_sub(1);
            }
        }
        debug_assert!(self.boxes_on_target <= self.box_cnt);
        self.reachable.invalidate();
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "player {} facing {}, {}/{} boxes on target, {} pushes",
            self.player_pos,
            self.facing(),
            self.boxes_on_target,
            self.box_cnt,
            self.push_cnt()
        )?;
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(level: &str) -> Board {
        Board::new(&level.parse().unwrap()).unwrap()
    }

    #[test]
    fn loading() {
        let board = board(
            r"
######
#+$ *#
#  $.#
######
",
        );
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 6);
        assert_eq!(board.player_pos(), Pos::new(1, 1));
        assert_eq!(board.facing(), Dir::Down);
        assert_eq!(board.box_cnt(), 3);
        assert_eq!(board.boxes_on_target(), 1);
        assert_eq!(board.push_cnt(), 0);
        assert!(!board.is_completed());
        assert_eq!(board.to_string(), "######\n#+$ *#\n#  $.#\n######\n");
    }

    #[test]
    fn predicates() {
        let board = board(
            r"
 ###
#@$.#
 ###
",
        );
        assert!(board.in_bounds(Pos::new(0, 0)));
        assert!(!board.in_bounds(Pos::new(-1, 0)));
        assert!(!board.in_bounds(Pos::new(3, 0)));
        assert!(board.is_blocked(Pos::new(0, 0)));
        assert!(!board.is_blocked(Pos::new(-1, 0)));
        assert!(board.is_box(Pos::new(1, 2)));
        assert!(!board.is_free_space(Pos::new(1, 2)));
        assert!(board.is_free_space(Pos::new(1, 1)));
        assert!(board.is_free_space(Pos::new(1, 3)));
        assert!(!board.is_free_space(Pos::new(1, 5)));
        assert!(board.get(Pos::new(1, 3)).is_target());
    }

    #[test]
    fn already_solved() {
        let solved = board(
            r"
####
#@*#
####
",
        );
        assert!(solved.is_completed());

        let empty = board("###\n#@#\n###");
        assert_eq!(empty.box_cnt(), 0);
        assert!(empty.is_completed());
    }

    #[test]
    fn reloading() {
        let first: Level = "#####\n#@$.#\n#####".parse().unwrap();
        let second: Level = "######\n#.$ @#\n######".parse().unwrap();
        let mut board = Board::new(&first).unwrap();
        board.push(Dir::Right);
        assert_eq!(board.push_cnt(), 1);

        board.load(&second).unwrap();
        assert_eq!(board.player_pos(), Pos::new(1, 4));
        assert_eq!(board.push_cnt(), 0);
        assert_eq!(board.boxes_on_target(), 0);
        assert_eq!(board.to_string(), "######\n#.$ @#\n######\n");
    }
}
