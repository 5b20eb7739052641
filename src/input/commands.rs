//! # Command Definitions
//!
//! Text commands for the terminal driver.

use crate::game::{BuildingId, Position};
use crate::input::{PlayerInput, Selection, MAX_TICKS_PER_INPUT};

/// Why a command line could not be parsed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("Can advance at most {max} ticks at once, not {requested}")]
    TooManyTicks { requested: u32, max: u32 },
}

/// One-line summaries of every command, for `help`.
pub const COMMAND_HELP: &[(&str, &str)] = &[
    ("click X Y", "use the current tool on tile (X, Y)"),
    ("word TEXT", "spell a word from the rack"),
    ("road", "select the road tool"),
    ("build ID", "select a building from the catalog"),
    ("upgrade", "select the upgrade tool"),
    ("bridge", "toggle bridge mode"),
    ("remove", "toggle remove mode"),
    ("tick [N]", "advance the town N ticks (default 1, at most 1000)"),
    ("new [SEED]", "start over on a new map"),
    ("map", "show the map"),
    ("status", "show resources, rack and progress"),
    ("catalog", "list buildings"),
    ("help", "show this list"),
    ("quit", "leave"),
];

/// Parses a command line.
///
/// # Examples
///
/// ```
/// use lettervale::{parse_command, PlayerInput, Position};
///
/// assert_eq!(parse_command("click 3 4"), Ok(PlayerInput::Activate(Position::new(3, 4))));
/// assert_eq!(parse_command("w river"), Ok(PlayerInput::SubmitWord("river".to_string())));
/// assert_eq!(parse_command("tick"), Ok(PlayerInput::Tick(1)));
/// ```
pub fn parse_command(line: &str) -> Result<PlayerInput, CommandError> {
    let mut parts = line.split_whitespace();
    let command = parts.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
    let rest: Vec<&str> = parts.collect();

    let input = match command.as_str() {
        "click" | "c" => {
            let x = number_arg(rest.first(), "click", "X and Y")?;
            let y = number_arg(rest.get(1), "click", "X and Y")?;
            PlayerInput::Activate(Position::new(x, y))
        }
        "word" | "w" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "word",
                    argument: "a word",
                });
            }
            PlayerInput::SubmitWord(rest.join(" "))
        }
        "road" | "r" => PlayerInput::Select(Selection::Road),
        "build" | "b" => {
            let id = rest.first().ok_or(CommandError::MissingArgument {
                command: "build",
                argument: "a building id",
            })?;
            PlayerInput::Select(Selection::Building(BuildingId::from(
                id.to_ascii_lowercase().as_str(),
            )))
        }
        "upgrade" | "u" => PlayerInput::Select(Selection::Upgrade),
        "bridge" => PlayerInput::ToggleBridgeMode,
        "remove" | "rm" => PlayerInput::ToggleRemoveMode,
        "tick" | "t" => match rest.first() {
            Some(count) => {
                let requested: u32 = count
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(count.to_string()))?;
                if requested > MAX_TICKS_PER_INPUT {
                    return Err(CommandError::TooManyTicks {
                        requested,
                        max: MAX_TICKS_PER_INPUT,
                    });
                }
                PlayerInput::Tick(requested)
            }
            None => PlayerInput::Tick(1),
        },
        "new" => PlayerInput::NewMap(rest.first().map(|seed| seed.to_string())),
        "map" | "m" => PlayerInput::ShowMap,
        "status" | "s" => PlayerInput::ShowStatus,
        "catalog" => PlayerInput::ShowCatalog,
        "help" | "?" => PlayerInput::Help,
        "quit" | "exit" | "q" => PlayerInput::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(input)
}

fn number_arg(
    arg: Option<&&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<i32, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument { command, argument })?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}
