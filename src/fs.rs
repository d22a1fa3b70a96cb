use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::level::Level;
use crate::parser;
use crate::LoadLevels;

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn Error>> {
    let mut file = File::open(path)?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

impl LoadLevels for str {
    fn load_levels(&self) -> Result<Vec<Level>, Box<dyn Error>> {
        Path::new(self).load_levels()
    }
}

impl LoadLevels for Path {
    fn load_levels(&self) -> Result<Vec<Level>, Box<dyn Error>> {
        let text = read_file(self)?;
        Ok(parser::parse_levels(&text)?)
    }
}
