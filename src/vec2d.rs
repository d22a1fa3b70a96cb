use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

/// Rectangular grid stored row by row in a single vector.
#[derive(Clone, PartialEq, Eq)]
pub struct Vec2d<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Vec2d<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.r >= 0 && pos.c >= 0 && (pos.r as usize) < self.rows && (pos.c as usize) < self.cols
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        if self.contains(pos) {
            Some(&self[pos])
        } else {
            None
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| Pos::new((i / cols) as i32, (i % cols) as i32))
    }

    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn scratchpad<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            rows: self.rows,
            cols: self.cols,
        }
    }

    fn index_of(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "{} out of bounds", pos);
        pos.r as usize * self.cols + pos.c as usize
    }
}

impl<T: Clone> Vec2d<T> {
    /// Pads rows shorter than the longest one with `fill`.
    pub fn from_rows(grid: Vec<Vec<T>>, fill: T) -> Self {
        let cols = grid.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut data = Vec::with_capacity(grid.len() * cols);
        let rows = grid.len();
        for mut row in grid {
            row.resize(cols, fill.clone());
            data.extend(row);
        }
        Vec2d { data, rows, cols }
    }
}

impl<T: Display> Display for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for cell in self.row(r) {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Display> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        let index = self.index_of(index);
        &self.data[index]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let index = self.index_of(index);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding() {
        let grid = Vec2d::from_rows(vec![vec!['#'], vec!['#', '@', '#'], vec![]], ' ');
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.to_string(), "#  \n#@#\n   \n");
        assert_eq!(grid[Pos::new(1, 1)], '@');
    }

    #[test]
    fn bounds() {
        let grid = Vec2d::from_rows(vec![vec![1, 2], vec![3, 4]], 0);
        assert!(grid.contains(Pos::new(1, 1)));
        assert!(!grid.contains(Pos::new(-1, 0)));
        assert!(!grid.contains(Pos::new(0, 2)));
        assert_eq!(grid.get(Pos::new(1, 0)), Some(&3));
        assert_eq!(grid.get(Pos::new(2, 0)), None);

        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );
    }

    #[test]
    fn scratchpad() {
        let grid = Vec2d::from_rows(vec![vec!['a', 'b', 'c']], ' ');
        let mut visited = grid.scratchpad(false);
        visited[Pos::new(0, 2)] = true;
        assert_eq!(visited.to_string(), "falsefalsetrue\n");
        assert_eq!(visited.rows(), 1);
        assert_eq!(visited.cols(), 3);
    }
}
