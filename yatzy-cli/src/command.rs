//! Parsing of interactive `play` commands.

use yatzy_core::Category;

use crate::grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Roll,
    /// Die positions, 0-based.
    Hold(Vec<usize>),
    Select(Category),
    Confirm,
    Board,
    New,
    Help,
    Quit,
}

pub const HELP: &str = r#"Commands:
    roll | r              Roll every die that is not held
    hold <die>... | h     Toggle hold on dice 1-5 (e.g. `hold 1 3`)
    select <field> | s    Select a field by name (fullHouse) or grid number (15)
    confirm | c           Bank the current dice into the selected field
    board | b             Show the scoreboard
    new                   Start over with a fresh game
    help                  Show this help
    quit | q              Leave
"#;

pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Board);
    };
    let rest: Vec<&str> = words.collect();

    match verb.to_ascii_lowercase().as_str() {
        "roll" | "r" => Ok(Command::Roll),
        "hold" | "h" => {
            if rest.is_empty() {
                return Err("Usage: hold <die>... (dice are numbered 1-5)".to_string());
            }
            let mut dice = Vec::with_capacity(rest.len());
            for w in rest {
                match w.parse::<usize>() {
                    Ok(n) if (1..=5).contains(&n) => dice.push(n - 1),
                    _ => return Err(format!("Invalid die: {w} (dice are numbered 1-5)")),
                }
            }
            Ok(Command::Hold(dice))
        }
        "select" | "s" => {
            let [field] = rest.as_slice() else {
                return Err("Usage: select <field>".to_string());
            };
            parse_field(field).map(Command::Select)
        }
        "confirm" | "c" => Ok(Command::Confirm),
        "board" | "b" => Ok(Command::Board),
        "new" => Ok(Command::New),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command: {other} (type `help`)")),
    }
}

fn parse_field(s: &str) -> Result<Category, String> {
    if let Ok(idx) = s.parse::<u8>() {
        return grid::category_at(idx).ok_or_else(|| format!("No field at grid number {idx}"));
    }
    s.parse::<Category>().map_err(|e| e.to_string())
}
