use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::session::{Session, SessionErr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Start,
    Playing,
    Paused,
    LevelFinished,
    AllFinished,
    Exit,
}

impl Display for Scene {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Scene::Start => write!(f, "start"),
            Scene::Playing => write!(f, "playing"),
            Scene::Paused => write!(f, "paused"),
            Scene::LevelFinished => write!(f, "level finished"),
            Scene::AllFinished => write!(f, "all levels finished"),
            Scene::Exit => write!(f, "exit"),
        }
    }
}

/// What the player picked in a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Start,
    Pause,
    Resume,
    Restart,
    NextLevel,
    Exit,
}

/// Decides which screen is shown, based on menu events and the session's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    scene: Scene,
}

impl Menu {
    pub fn new() -> Self {
        Menu {
            scene: Scene::Start,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Events that make no sense in the current scene are ignored.
    pub fn handle(&mut self, event: MenuEvent, session: &mut Session) -> Result<(), SessionErr> {
        let next = match (self.scene, event) {
            (_, MenuEvent::Exit) => Scene::Exit,
            (Scene::Start, MenuEvent::Start) => Scene::Playing,
            (Scene::Playing, MenuEvent::Pause) => Scene::Paused,
            (Scene::Paused, MenuEvent::Resume) => Scene::Playing,
            (Scene::Paused, MenuEvent::Restart) | (Scene::AllFinished, MenuEvent::Restart) => {
                session.restart();
                Scene::Playing
            }
            (Scene::LevelFinished, MenuEvent::NextLevel) => {
                session.next_level()?;
                Scene::Playing
            }
            _ => return Ok(()),
        };
        self.change(next);
        Ok(())
    }

    /// Call after applying the player's actions.
    pub fn update(&mut self, session: &Session) {
        if self.scene == Scene::Playing && session.level_completed() {
            if session.is_last_level() {
                self.change(Scene::AllFinished);
            } else {
                self.change(Scene::LevelFinished);
            }
        }
    }

    fn change(&mut self, scene: Scene) {
        debug!("Scene: {} -> {}", self.scene, scene);
        self.scene = scene;
    }
}

impl Default for Menu {
    fn default() -> Self {
        Menu::new()
    }
}
