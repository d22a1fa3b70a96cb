// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(unused)]
#![allow(unknown_lints)]
#![warn(clippy::all)]

use std::env;
use std::io::{self, BufRead};
use std::process;

use clap::{App, Arg};
use log::debug;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use sokoban::config::{self, COMMANDS};
use sokoban::fs;
use sokoban::scene::{Menu, MenuEvent, Scene};
use sokoban::session::Session;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban")
        .author("martin-t")
        .version("0.1")
        .arg(
            Arg::with_name("level")
                .short("n")
                .long("level")
                .takes_value(true)
                .value_name("N")
                .help("level to play, starting from 1"),
        ).arg(
            Arg::with_name("moves")
                .short("m")
                .long("moves")
                .takes_value(true)
                .value_name("KEYS")
                .help("apply the keys to the level and print the result"),
        ).arg(
            Arg::with_name("list")
                .short("l")
                .long("list")
                .conflicts_with("moves")
                .help("list the levels"),
        ).arg(Arg::with_name("file").help("level file, built-in levels are used if missing"))
        .get_matches();

    let mut session = Session::default();

    if let Some(path) = matches.value_of("file") {
        let text = fs::read_file(path).unwrap_or_else(|err| {
            let current_dir = env::current_dir().unwrap_or_default();
            println!("Can't read file {} in {}: {}", path, current_dir.display(), err);
            process::exit(1);
        });
        if let Err(err) = session.load_levels(&text) {
            println!("Failed to load levels: {}", err);
            println!("Using built-in levels");
        }
    }

    if matches.is_present("list") {
        list_levels(&session);
        return;
    }

    if let Some(level) = matches.value_of("level") {
        let level_cnt = session.level_cnt();
        let number = match level.parse::<usize>() {
            Ok(number) if number >= 1 && number <= level_cnt => number,
            _ => {
                println!("Level {} doesn't exist, there are {} levels", level, level_cnt);
                process::exit(1);
            }
        };
        for _ in 1..number {
            if let Err(err) = session.next_level() {
                println!("Can't go to level {}: {}", number, err);
                process::exit(1);
            }
        }
    }

    if let Some(keys) = matches.value_of("moves") {
        let actions = config::parse_input(keys).unwrap_or_else(|err| {
            println!("Invalid moves: {}", err);
            process::exit(1);
        });
        session.apply_all(actions);
        print_status(&session);
        return;
    }

    play(&mut session);
}

fn list_levels(session: &Session) {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("#"),
        Cell::new("Name"),
        Cell::new("Size"),
        Cell::new("Boxes"),
    ]));
    for (i, level) in session.levels().iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&(i + 1).to_string()),
            Cell::new(level.name()),
            Cell::new(&format!("{}x{}", level.width(), level.height())),
            Cell::new(&level.box_cnt().to_string()),
        ]));
    }
    table.printstd();
}

fn print_status(session: &Session) {
    println!(
        "Level {}/{}: {}",
        session.cur_level() + 1,
        session.level_cnt(),
        session.level().name()
    );
    print!("{}", session.board());
    println!(
        "Pushes: {}",
        (session.board().push_cnt() as u64).separated_string()
    );
    if session.level_completed() {
        println!("Level completed");
    } else {
        println!("Level not completed");
    }
}

fn print_help() {
    for cmd in COMMANDS.iter() {
        println!("{:>8}: {}", cmd, cmd.keys());
    }
    println!("   click: row,col");
    println!("   pause: p");
    println!("    quit: q");
}

/// Reads lines from stdin until the player quits or stdin runs out.
fn play(session: &mut Session) {
    let mut menu = Menu::new();
    print_help();
    if let Err(err) = menu.handle(MenuEvent::Start, session) {
        println!("{}", err);
        return;
    }
    print_status(session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                println!("Can't read input: {}", err);
                break;
            }
        };
        let input = line.trim();
        debug!("Input in scene {}: {:?}", menu.scene(), input);

        let event = match (menu.scene(), input) {
            (_, "q") => Some(MenuEvent::Exit),
            (Scene::Playing, "p") => Some(MenuEvent::Pause),
            (Scene::Paused, "c") => Some(MenuEvent::Resume),
            (Scene::Paused, "r") | (Scene::AllFinished, "r") => Some(MenuEvent::Restart),
            (Scene::LevelFinished, _) => Some(MenuEvent::NextLevel),
            _ => None,
        };

        match event {
            Some(event) => {
                if let Err(err) = menu.handle(event, session) {
                    println!("{}", err);
                }
            }
            None if menu.scene() == Scene::Playing => match config::parse_input(input) {
                Ok(actions) => {
                    session.apply_all(actions);
                    menu.update(session);
                }
                Err(err) => println!("{}", err),
            },
            None => {}
        }

        match menu.scene() {
            Scene::Exit => break,
            Scene::Playing => print_status(session),
            Scene::Paused => println!("Paused - c to continue, r to restart, q to quit"),
            Scene::LevelFinished => {
                print_status(session);
                println!("Press enter to continue");
            }
            Scene::AllFinished => {
                print_status(session);
                println!("All levels finished - r to restart, q to quit");
            }
            Scene::Start => {}
        }
    }
}

