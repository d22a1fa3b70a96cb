use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::board::Board;
use crate::data::{Dir, Pos};

/// A successful push - enough to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    /// Where the player ended up, also where the box was before the push.
    pub player_pos: Pos,
    pub dir: Dir,
    /// Facing before the push.
    pub facing: Dir,
}

impl Display for MoveRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // pushes are uppercase in the usual LURD notation
        write!(f, "{}", self.dir.to_string().to_uppercase())
    }
}

impl Board {
    /// Moves the player one cell in `dir`, pushing a box if there's one in the way.
    ///
    /// When the move is impossible the player only turns to face `dir`.
    pub fn push(&mut self, dir: Dir) {
        let new_pos = self.player_pos() + dir;
        if !self.in_bounds(new_pos) {
            self.turn_player(dir);
            return;
        }

        if self.is_box(new_pos) {
            if !self.is_free_space(new_pos + dir) {
                self.turn_player(dir);
                return;
            }
            let record = MoveRecord {
                player_pos: new_pos,
                dir,
                facing: self.facing(),
            };
            self.history.push(record);
            self.move_box(new_pos, dir);
        }

        if self.is_free_space(new_pos) {
            self.place_player(new_pos, dir);
        } else {
            self.turn_player(dir);
        }
    }

    /// Reverses a push: the player steps back and drags the box along.
    fn pull(&mut self, record: MoveRecord) {
        let dir = record.dir.inverse();
        let new_pos = record.player_pos + dir;
        let box_pos = record.player_pos - dir;
        debug_assert!(self.is_free_space(new_pos));
        debug_assert!(self.is_box(box_pos));

        // player first so the box has somewhere to go
        self.place_player(new_pos, record.facing);
        self.move_box(box_pos, dir);
    }

    pub fn undo(&mut self) {
        if let Some(record) = self.history.pop() {
            debug!("Undoing {} at {}", record, record.player_pos);
            self.pull(record);
        }
    }

    /// Pushes made since the level was loaded, oldest first.
    pub fn pushes(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Neighbors are pushed toward, anything further is walked to if possible.
    pub fn click(&mut self, pos: Pos) {
        if !self.in_bounds(pos) {
            return;
        }

        let player_pos = self.player_pos();
        match player_pos.dist(pos) {
            0 => {}
            1 => {
                if let Some(dir) = player_pos.dir_to(pos) {
                    self.push(dir);
                }
            }
            _ => {
                if self.is_free_space(pos) && self.is_reachable(pos) {
                    self.place_player(pos, Dir::Down);
                }
            }
        }
    }
}
