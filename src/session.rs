use std::error::Error;
use std::fmt::{self, Debug, Formatter};

use log::{debug, info, warn};

use crate::action::Action;
use crate::board::{Board, BoardErr};
use crate::level::Level;
use crate::parser::{self, ParserErr};

/// Used when no level file is given or when it fails to load.
pub const DEFAULT_LEVELS: &str = r"
; Warm-up
######
#@$ .#
######

; Default Level
_####__
_# .#__
_#  ###
_#*@  #
##  $ #
#   ###
#####__
";

pub fn default_levels() -> Vec<Level> {
    parser::parse_levels(DEFAULT_LEVELS).expect("built-in levels are invalid")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionErr {
    NoLevels,
    LastLevel,
    Parser(ParserErr),
    Board(BoardErr),
}

impl fmt::Display for SessionErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SessionErr::NoLevels => write!(f, "No levels to play"),
            SessionErr::LastLevel => write!(f, "Already at the last level"),
            SessionErr::Parser(ref err) => write!(f, "{}", err),
            SessionErr::Board(ref err) => write!(f, "{}", err),
        }
    }
}

impl Error for SessionErr {}

impl From<ParserErr> for SessionErr {
    fn from(err: ParserErr) -> Self {
        SessionErr::Parser(err)
    }
}

impl From<BoardErr> for SessionErr {
    fn from(err: BoardErr) -> Self {
        SessionErr::Board(err)
    }
}

/// An ordered list of levels and the board of the one being played.
///
/// Levels are only ever played forward, there's no going back to a previous one.
pub struct Session {
    levels: Vec<Level>,
    cur_level: usize,
    board: Board,
}

impl Session {
    pub fn new(levels: Vec<Level>) -> Result<Self, SessionErr> {
        let board = match levels.first() {
            Some(level) => Board::new(level)?,
            None => return Err(SessionErr::NoLevels),
        };
        Ok(Session {
            levels,
            cur_level: 0,
            board,
        })
    }

    /// Replaces the levels with the ones in `text` and starts from the first one.
    ///
    /// When `text` can't be parsed, the built-in levels are used instead
    /// and the error is still returned so the caller can report it.
    pub fn load_levels(&mut self, text: &str) -> Result<usize, SessionErr> {
        match parser::parse_levels(text) {
            Ok(levels) => {
                self.set_levels(levels)?;
                info!("Loaded {} levels", self.level_cnt());
                Ok(self.level_cnt())
            }
            Err(err) => {
                warn!("Failed to load levels ({}), using built-in levels", err);
                self.set_levels(default_levels())?;
                Err(err.into())
            }
        }
    }

    fn set_levels(&mut self, levels: Vec<Level>) -> Result<(), SessionErr> {
        *self = Session::new(levels)?;
        Ok(())
    }

    /// Rebuilds the current level from scratch, dropping the undo history.
    pub fn restart(&mut self) {
        debug!("Restarting level {}", self.cur_level + 1);
        let level = &self.levels[self.cur_level];
        // levels are validated when parsed so a fresh board can always be built
        if let Err(err) = self.board.load(level) {
            warn!("Failed to restart {}: {}", level.name(), err);
        }
    }

    pub fn next_level(&mut self) -> Result<(), SessionErr> {
        if self.is_last_level() {
            return Err(SessionErr::LastLevel);
        }
        self.board.load(&self.levels[self.cur_level + 1])?;
        self.cur_level += 1;
        info!(
            "Level {}/{}: {}",
            self.cur_level + 1,
            self.level_cnt(),
            self.level().name()
        );
        Ok(())
    }

    pub fn is_last_level(&self) -> bool {
        self.cur_level + 1 == self.levels.len()
    }

    pub fn level_completed(&self) -> bool {
        self.board.is_completed()
    }

    /// Zero-based index of the level being played.
    pub fn cur_level(&self) -> usize {
        self.cur_level
    }

    pub fn level_cnt(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.cur_level]
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Move(dir) => self.board.push(dir),
            Action::Restart => self.restart(),
            Action::Undo => self.board.undo(),
            Action::Click(pos) => self.board.click(pos),
        }
    }

    /// Applies the actions of one update in order.
    pub fn apply_all<I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = Action>,
    {
        for action in actions {
            self.apply(action);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(default_levels()).expect("built-in levels are invalid")
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Level {}/{}: {}",
            self.cur_level + 1,
            self.level_cnt(),
            self.level().name()
        )?;
        write!(f, "{:?}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config;
    use crate::data::{Dir, Pos};

    #[test]
    fn built_in_levels() {
        let levels = default_levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].name(), "Warm-up");
        assert_eq!(levels[1].name(), "Default Level");
        assert_eq!(levels[1].box_cnt(), 2);

        let session = Session::default();
        assert_eq!(session.cur_level(), 0);
        assert_eq!(session.level_cnt(), 2);
        assert!(!session.is_last_level());
        assert!(!session.level_completed());
    }

    #[test]
    fn playing_through() {
        let mut session = Session::default();
        session.apply_all(vec![Action::Move(Dir::Right), Action::Move(Dir::Right)]);
        assert!(session.level_completed());
        assert_eq!(session.board().push_cnt(), 2);

        session.next_level().unwrap();
        assert_eq!(session.cur_level(), 1);
        assert!(session.is_last_level());
        assert!(!session.level_completed());
        assert_eq!(session.board().push_cnt(), 0);

        assert_eq!(session.next_level(), Err(SessionErr::LastLevel));
        assert_eq!(session.cur_level(), 1);
    }

    #[test]
    fn restarting() {
        let mut session = Session::default();
        let before = session.board().to_string();

        session.apply(Action::Move(Dir::Right));
        session.apply(Action::Click(Pos::new(1, 1)));
        assert_ne!(session.board().to_string(), before);

        session.apply(Action::Restart);
        assert_eq!(session.board().to_string(), before);
        assert_eq!(session.board().push_cnt(), 0);
    }

    #[test]
    fn typed_clicks_outside() {
        let mut session = Session::default();
        let before = session.board().to_string();

        session.apply_all(config::parse_input("-2147483648,0").unwrap());
        session.apply_all(config::parse_input("2147483647,2147483647").unwrap());
        assert_eq!(session.board().to_string(), before);
    }

    #[test]
    fn undoing() {
        let mut session = Session::default();
        let before = session.board().grid().clone();
        session.apply_all(vec![
            Action::Move(Dir::Right),
            Action::Move(Dir::Right),
            Action::Undo,
            Action::Undo,
            Action::Undo,
        ]);
        assert_eq!(session.board().grid(), &before);
    }

    #[test]
    fn loading_levels() {
        let mut session = Session::default();
        session.next_level().unwrap();

        let cnt = session
            .load_levels("; One\n#####\n#@$.#\n#####\n\n; Two\n#####\n#.$@#\n#####\n")
            .unwrap();
        assert_eq!(cnt, 2);
        assert_eq!(session.cur_level(), 0);
        assert_eq!(session.level().name(), "One");
        assert_eq!(session.levels()[1].name(), "Two");
    }

    #[test]
    fn loading_broken_levels() {
        let mut session = Session::new(vec!["#####\n#@$.#\n#####".parse().unwrap()]).unwrap();
        assert_eq!(session.level_cnt(), 1);

        let err = session.load_levels("#####\n#@$ #\n#####\n").unwrap_err();
        assert_eq!(
            err,
            SessionErr::Parser(ParserErr::InLevel(
                0,
                Box::new(ParserErr::BoxesTargets(1, 0))
            ))
        );
        assert_eq!(session.levels(), &default_levels()[..]);
        assert_eq!(session.cur_level(), 0);
    }

    #[test]
    fn no_levels() {
        assert_eq!(Session::new(Vec::new()).unwrap_err(), SessionErr::NoLevels);
    }
}
