// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![allow(unknown_lints)] // necessary because rustc doesn't know about clippy
#![warn(clippy::all)]

pub mod action;
pub mod board;
pub mod config;
pub mod data;
pub mod fs;
pub mod level;
pub mod moves;
pub mod parser;
pub mod reachability;
pub mod scene;
pub mod session;
pub mod tile;
pub mod vec2d;

use std::error::Error;

use crate::level::Level;

pub trait LoadLevels {
    fn load_levels(&self) -> Result<Vec<Level>, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::board::Board;
    use crate::data::Dir;

    #[test]
    fn tutorial_levels() {
        let levels = "levels/tutorial.txt".load_levels().unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].name(), "Level 1");
        assert_eq!(levels[1].name(), "Level 2");

        for level in &levels {
            let board = Board::new(level).unwrap();
            assert_eq!(board.box_cnt(), level.box_cnt());
        }

        let mut board = Board::new(&levels[0]).unwrap();
        board.push(Dir::Right);
        assert!(board.is_completed());
    }

    #[test]
    fn broken_levels() {
        assert!("levels/broken.txt".load_levels().is_err());
        assert!("levels/does-not-exist.txt".load_levels().is_err());
    }
}
