use std::collections::VecDeque;

use fnv::FnvHashSet;
use log::debug;

use crate::data::Pos;
use crate::tile::Tile;
use crate::vec2d::Vec2d;

/// Lazily computed set of cells reachable by the player without pushing.
///
/// Empty means invalid - a computed set always contains at least the starting cell.
#[derive(Debug, Clone, Default)]
pub struct Reachability {
    cells: FnvHashSet<Pos>,
}

impl Reachability {
    pub fn invalidate(&mut self) {
        self.cells.clear();
    }

    pub fn is_valid(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn cells(&mut self, grid: &Vec2d<Tile>, start: Pos) -> &FnvHashSet<Pos> {
        if !self.is_valid() {
            self.compute(grid, start);
        }
        &self.cells
    }

    pub fn contains(&mut self, grid: &Vec2d<Tile>, start: Pos, pos: Pos) -> bool {
        self.cells(grid, start).contains(&pos)
    }

    fn compute(&mut self, grid: &Vec2d<Tile>, start: Pos) {
        self.cells.insert(start);
        let mut to_visit = VecDeque::new();
        to_visit.push_back(start);

        while let Some(cur) = to_visit.pop_front() {
            for &next in &cur.neighbors() {
                match grid.get(next) {
                    Some(tile) if !tile.is_box() && !tile.is_blocked() => {}
                    _ => continue,
                }
                if self.cells.insert(next) {
                    to_visit.push_back(next);
                }
            }
        }

        debug!("Reachable from {}: {} cells", start, self.cells.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::board::Board;
    use crate::data::Dir;

    fn board() -> Board {
        let level = r"
#######
#@ #  #
#  $ .#
#######
";
        Board::new(&level.parse().unwrap()).unwrap()
    }

    fn sorted(board: &mut Board) -> Vec<Pos> {
        let mut cells: Vec<_> = board.reachable().iter().cloned().collect();
        cells.sort();
        cells
    }

    #[test]
    fn boxes_and_walls_block() {
        let mut board = board();
        assert_eq!(
            sorted(&mut board),
            vec![Pos::new(1, 1), Pos::new(1, 2), Pos::new(2, 1), Pos::new(2, 2)]
        );
        assert!(board.is_reachable(Pos::new(2, 2)));
        assert!(!board.is_reachable(Pos::new(2, 3)));
        assert!(!board.is_reachable(Pos::new(1, 4)));
        assert!(!board.is_reachable(Pos::new(0, 0)));
        assert!(!board.is_reachable(Pos::new(-1, 7)));
    }

    #[test]
    fn repeated_queries() {
        let mut board = board();
        let first = sorted(&mut board);
        let second = sorted(&mut board);
        assert_eq!(first, second);
    }

    #[test]
    fn recomputed_after_push() {
        let mut board = board();
        assert_eq!(board.reachable().len(), 4);

        board.push(Dir::Down);
        board.push(Dir::Right);
        board.push(Dir::Right);
        assert_eq!(board.player_pos(), Pos::new(2, 3));
        assert_eq!(board.reachable().len(), 5);
        assert!(!board.is_reachable(Pos::new(1, 4)));

        board.push(Dir::Right);
        assert!(board.is_completed());
        assert_eq!(board.reachable().len(), 8);
        assert!(board.is_reachable(Pos::new(1, 5)));
        assert!(!board.is_reachable(Pos::new(2, 5)));

        board.undo();
        assert_eq!(board.reachable().len(), 5);
    }

    #[test]
    fn invalidating() {
        let board = board();
        let mut reachability = Reachability::default();
        assert!(!reachability.is_valid());
        assert!(reachability.contains(board.grid(), Pos::new(1, 1), Pos::new(1, 1)));
        assert!(reachability.is_valid());

        // a valid cache answers without looking at the grid again
        assert!(!reachability.contains(board.grid(), Pos::new(2, 4), Pos::new(2, 4)));

        reachability.invalidate();
        assert!(!reachability.is_valid());
        assert!(reachability.contains(board.grid(), Pos::new(2, 4), Pos::new(1, 5)));
    }
}
