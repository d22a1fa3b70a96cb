use std::fmt::{self, Debug, Display, Formatter};

/// A validated level - rows are padded to the same width,
/// everything outside the walls is `_` and the outline is closed.
#[derive(Clone, PartialEq, Eq)]
pub struct Level {
    name: String,
    rows: Vec<String>,
}

impl Level {
    pub(crate) fn new(name: String, rows: Vec<String>) -> Self {
        Level { name, rows }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.chars().count())
    }

    pub fn box_cnt(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.chars())
            .filter(|&c| c == '$' || c == '*')
            .count()
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "; {}", self.name)?;
        write!(f, "{}", self)
    }
}
