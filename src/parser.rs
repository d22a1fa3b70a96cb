use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::iter;
use std::str::FromStr;

use log::debug;

use crate::data::Pos;
use crate::level::Level;
use crate::tile::TILE_CHARS;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    Empty,
    Pos(usize, usize),
    NoPlayer,
    MultiplePlayers,
    BoxesTargets(usize, usize),
    IncompleteBorder,
    NoLevels,
    InLevel(usize, Box<ParserErr>),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Empty => write!(f, "Level has no rows"),
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::BoxesTargets(boxes, targets) => write!(
                f,
                "Different number of boxes ({}) and targets ({})",
                boxes, targets
            ),
            ParserErr::IncompleteBorder => {
                write!(f, "Player can exit the level because of missing border")
            }
            ParserErr::NoLevels => write!(f, "No levels found"),
            ParserErr::InLevel(index, ref err) => write!(f, "Level {}: {}", index + 1, err),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // trim so we can specify levels using raw strings more easily
        let lines: Vec<_> = s.trim_matches(|c: char| c == '\n' || c == '\r').lines().collect();
        parse_level(&lines, "Untitled")
    }
}

/// Parses all levels in `text`, levels are separated by blank lines.
///
/// Fails on the first invalid level - a partially loaded pack is never returned.
pub fn parse_levels(text: &str) -> Result<Vec<Level>, ParserErr> {
    let mut levels = Vec::new();
    let mut block = Vec::new();

    // the extra empty line flushes the last block
    for line in text.lines().chain(iter::once("")) {
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            block.push(line);
            continue;
        }
        if block.is_empty() {
            continue;
        }

        let index = levels.len();
        let default_name = format!("Level {}", index + 1);
        let level = parse_level(&block, &default_name)
            .map_err(|err| ParserErr::InLevel(index, Box::new(err)))?;
        levels.push(level);
        block.clear();
    }

    if levels.is_empty() {
        return Err(ParserErr::NoLevels);
    }
    debug!("Parsed {} levels", levels.len());
    Ok(levels)
}

/// Parses and validates a single level.
///
/// Up to two leading lines which contain characters outside the level alphabet
/// are a header, the last of them is the level's name.
pub fn parse_level(lines: &[&str], default_name: &str) -> Result<Level, ParserErr> {
    let header_len = lines
        .iter()
        .take(2)
        .take_while(|line| !is_grid_line(line))
        .count();
    let name = match header_len {
        0 => default_name.to_string(),
        _ => {
            let name = lines[header_len - 1].trim().trim_start_matches(';').trim();
            if name.is_empty() {
                default_name.to_string()
            } else {
                name.to_string()
            }
        }
    };

    let mut rows = Vec::new();
    for (r, line) in lines[header_len..].iter().enumerate() {
        let mut row = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if !TILE_CHARS.contains(cur_char) {
                return Err(ParserErr::Pos(r, c));
            }
            row.push(cur_char);
        }
        rows.push(row);
    }

    let mut grid = Vec2d::from_rows(rows, ' ');
    if grid.rows() == 0 || grid.cols() == 0 {
        return Err(ParserErr::Empty);
    }

    let player_pos = check_contents(&grid)?;
    let interior = find_interior(&grid, player_pos)?;
    mark_outside(&mut grid, &interior);
    fill_corners(&mut grid);

    debug!(
        "Parsed level {}: {}x{}",
        name,
        grid.rows(),
        grid.cols()
    );
    let rows = (0..grid.rows())
        .map(|r| grid.row(r).iter().collect())
        .collect();
    Ok(Level::new(name, rows))
}

fn is_grid_line(line: &str) -> bool {
    line.chars().all(|c| TILE_CHARS.contains(c))
}

/// Exactly one player and as many boxes as targets, returns the player's position.
fn check_contents(grid: &Vec2d<char>) -> Result<Pos, ParserErr> {
    let mut player_pos = None;
    let mut boxes = 0;
    let mut targets = 0;

    for pos in grid.positions() {
        let cur_char = grid[pos];
        if cur_char == '@' || cur_char == '+' {
            if player_pos.is_some() {
                return Err(ParserErr::MultiplePlayers);
            }
            player_pos = Some(pos);
        }
        if cur_char == '$' || cur_char == '*' {
            boxes += 1;
        }
        if cur_char == '.' || cur_char == '*' || cur_char == '+' {
            targets += 1;
        }
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    if boxes != targets {
        return Err(ParserErr::BoxesTargets(boxes, targets));
    }
    Ok(player_pos)
}

/// Flood fill from the player - walls stop it but are marked as visited too.
/// Leaving the grid means the wall has a hole.
fn find_interior(grid: &Vec2d<char>, player_pos: Pos) -> Result<Vec2d<bool>, ParserErr> {
    let mut visited = grid.scratchpad(false);
    visited[player_pos] = true;
    let mut to_visit = VecDeque::new();
    to_visit.push_back(player_pos);

    while let Some(cur) = to_visit.pop_front() {
        for &next in &cur.neighbors() {
            if !grid.contains(next) {
                return Err(ParserErr::IncompleteBorder);
            }
            if visited[next] {
                continue;
            }
            visited[next] = true;
            if grid[next] != '#' {
                to_visit.push_back(next);
            }
        }
    }

    Ok(visited)
}

fn mark_outside(grid: &mut Vec2d<char>, interior: &Vec2d<bool>) {
    for pos in grid.positions() {
        if !interior[pos] {
            grid[pos] = '_';
        }
    }
}

// __##__         _####_
// _#  #_  -----> _#  #_
// __##__         _####_
fn fill_corners(grid: &mut Vec2d<char>) {
    for pos in grid.positions() {
        if grid[pos] != '_' {
            continue;
        }
        let touches_inside = pos.diagonals().iter().any(|&diagonal| match grid.get(diagonal) {
            Some(&c) => c != '#' && c != '_',
            None => false,
        });
        if touches_inside {
            grid[pos] = '#';
        }
    }
}
