//! Referee protocol command parser.
//!
//! Parses incoming text commands into structured `Command` variants that the
//! binary's main loop dispatches on.

use crate::board::Rotation;
use crate::resolve::PlacementIntent;

/// A parsed client-to-referee command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; the referee replies `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game, optionally with an explicit id.
    NewGame { id: Option<String> },

    /// `place <instance> <anchor> <rotation> [r]`.
    Place(PlacementIntent),

    /// `check <instance> <anchor> <rotation> [r]`: validate without placing.
    Check(PlacementIntent),

    /// Print the board in row notation.
    Show,

    /// Print the board notation on one line.
    Board,

    /// Print the JSON board projection.
    State,

    /// Count the legal placements of one piece.
    Moves { piece: String },

    /// List every unplaced, uncaptured piece.
    Pieces,

    /// Terminate the referee.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "show" => Some(Command::Show),
        "board" => Some(Command::Board),
        "state" => Some(Command::State),
        "pieces" => Some(Command::Pieces),
        "newgame" => Some(Command::NewGame { id: args.first().map(|s| s.to_string()) }),

        "setoption" => parse_setoption(args),
        "place" => parse_intent("place", args).map(Command::Place),
        "check" => parse_intent("check", args).map(Command::Check),
        "moves" => parse_moves(args),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value) = match args.iter().position(|&t| t == "value") {
        Some(vi) => {
            let value_parts = &args[vi + 1..];
            let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
            (&args[1..vi], value)
        }
        None => (&args[1..], None),
    };
    if name_parts.is_empty() {
        eprintln!("malformed setoption: empty name");
        return None;
    }

    Some(Command::SetOption { name: name_parts.join(" "), value })
}

/// Parses the `<instance> <anchor> <rotation> [r]` arguments shared by
/// `place` and `check`.
fn parse_intent(verb: &str, args: &[&str]) -> Option<PlacementIntent> {
    if args.len() < 3 || args.len() > 4 {
        eprintln!("malformed {}: expected '{} <instance> <anchor> <rotation> [r]'", verb, verb);
        return None;
    }

    let anchor = match args[1].parse::<i32>() {
        Ok(a) => a,
        Err(_) => {
            eprintln!("malformed {}: invalid anchor '{}'", verb, args[1]);
            return None;
        }
    };

    let rotation = match args[2].parse::<u16>().ok().and_then(Rotation::from_degrees) {
        Some(r) => r,
        None => {
            eprintln!("malformed {}: invalid rotation '{}'", verb, args[2]);
            return None;
        }
    };

    let reflected = match args.get(3) {
        None => false,
        Some(&"r") | Some(&"reflected") => true,
        Some(other) => {
            eprintln!("malformed {}: unexpected '{}'", verb, other);
            return None;
        }
    };

    Some(PlacementIntent::new(args[0], anchor, rotation, reflected))
}

/// Parses `moves <instance>`.
fn parse_moves(args: &[&str]) -> Option<Command> {
    match args {
        [piece] => Some(Command::Moves { piece: piece.to_string() }),
        _ => {
            eprintln!("malformed moves: expected 'moves <instance>'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("hello"), Some(Command::Hello));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("  quit  "), Some(Command::Quit));
        assert_eq!(parse_command("show"), Some(Command::Show));
        assert_eq!(parse_command("state"), Some(Command::State));
        assert_eq!(parse_command("pieces"), Some(Command::Pieces));
        assert_eq!(parse_command("board"), Some(Command::Board));
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("frobnicate"), None);
    }

    #[test]
    fn parse_newgame() {
        assert_eq!(parse_command("newgame"), Some(Command::NewGame { id: None }));
        assert_eq!(
            parse_command("newgame match-7"),
            Some(Command::NewGame { id: Some("match-7".into()) })
        );
    }

    #[test]
    fn parse_setoption_variants() {
        assert_eq!(
            parse_command("setoption name EnforceTurn value true"),
            Some(Command::SetOption { name: "EnforceTurn".into(), value: Some("true".into()) })
        );
        assert_eq!(
            parse_command("setoption name AllowReflection"),
            Some(Command::SetOption { name: "AllowReflection".into(), value: None })
        );
        assert_eq!(parse_command("setoption EnforceTurn true"), None);
        assert_eq!(parse_command("setoption name value x"), None);
    }

    #[test]
    fn parse_place_variants() {
        assert_eq!(
            parse_command("place LIGHT_WALL3 0 0"),
            Some(Command::Place(PlacementIntent::new("LIGHT_WALL3", 0, Rotation::Deg0, false)))
        );
        assert_eq!(
            parse_command("place DARK_S_BEND 10 270 r"),
            Some(Command::Place(PlacementIntent::new("DARK_S_BEND", 10, Rotation::Deg270, true)))
        );
        // Off-board anchors are the validator's call.
        assert_eq!(
            parse_command("place LIGHT_WALL3 -1 0"),
            Some(Command::Place(PlacementIntent::new("LIGHT_WALL3", -1, Rotation::Deg0, false)))
        );
    }

    #[test]
    fn parse_check() {
        assert_eq!(
            parse_command("check LIGHT_WALL3 5 90"),
            Some(Command::Check(PlacementIntent::new("LIGHT_WALL3", 5, Rotation::Deg90, false)))
        );
        assert_eq!(parse_command("check LIGHT_WALL3"), None);
    }

    #[test]
    fn parse_place_rejects_bad_arguments() {
        assert_eq!(parse_command("place LIGHT_WALL3 0"), None);
        assert_eq!(parse_command("place LIGHT_WALL3 x 0"), None);
        assert_eq!(parse_command("place LIGHT_WALL3 0 45"), None);
        assert_eq!(parse_command("place LIGHT_WALL3 0 90 x"), None);
        assert_eq!(parse_command("place LIGHT_WALL3 0 90 r extra"), None);
    }

    #[test]
    fn parse_moves_needs_one_piece() {
        assert_eq!(parse_command("moves LIGHT_TOWER"), Some(Command::Moves { piece: "LIGHT_TOWER".into() }));
        assert_eq!(parse_command("moves"), None);
    }
}
