use crate::data::{Dir, Pos};

/// Abstract player input, independent of how it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Dir),
    Restart,
    Undo,
    /// A cell picked with the mouse or typed as `row,col`.
    Click(Pos),
}
