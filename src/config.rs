use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::action::Action;
use crate::data::{Dir, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Right,
    Left,
    Restart,
    Undo,
}

pub const COMMANDS: [Command; 6] = [
    Command::Up,
    Command::Down,
    Command::Right,
    Command::Left,
    Command::Restart,
    Command::Undo,
];

impl Command {
    /// Keys bound to the command, WASD and IJKL both work for moving.
    pub fn keys(self) -> &'static str {
        match self {
            Command::Up => "wi",
            Command::Down => "sk",
            Command::Right => "dl",
            Command::Left => "aj",
            Command::Restart => "r",
            Command::Undo => "z",
        }
    }

    pub fn from_key(key: char) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        COMMANDS.iter().cloned().find(|cmd| cmd.keys().contains(key))
    }

    pub fn action(self) -> Action {
        match self {
            Command::Up => Action::Move(Dir::Up),
            Command::Down => Action::Move(Dir::Down),
            Command::Right => Action::Move(Dir::Right),
            Command::Left => Action::Move(Dir::Left),
            Command::Restart => Action::Restart,
            Command::Undo => Action::Undo,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Command::Up => write!(f, "up"),
            Command::Down => write!(f, "down"),
            Command::Right => write!(f, "right"),
            Command::Left => write!(f, "left"),
            Command::Restart => write!(f, "restart"),
            Command::Undo => write!(f, "undo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputErr {
    UnknownKey(char),
    BadClick(String),
}

impl Display for InputErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            InputErr::UnknownKey(key) => write!(f, "Unknown key: {}", key),
            InputErr::BadClick(ref input) => write!(f, "Invalid position: {}", input),
        }
    }
}

impl Error for InputErr {}

/// Turns one line of input into actions.
///
/// `row,col` clicks on a cell, anything else is a sequence of keys.
pub fn parse_input(line: &str) -> Result<Vec<Action>, InputErr> {
    let line = line.trim();
    if line.contains(',') {
        return parse_click(line).map(|pos| vec![Action::Click(pos)]);
    }

    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|key| {
            Command::from_key(key)
                .map(Command::action)
                .ok_or(InputErr::UnknownKey(key))
        }).collect()
}

fn parse_click(line: &str) -> Result<Pos, InputErr> {
    let bad_click = || InputErr::BadClick(line.to_string());

    let parts: Vec<_> = line.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(bad_click());
    }
    let r = parts[0].parse().map_err(|_| bad_click())?;
    let c = parts[1].parse().map_err(|_| bad_click())?;
    Ok(Pos::new(r, c))
}
