//! Referee session.
//!
//! Holds the engine and the game in progress between protocol commands and
//! writes each command's response.

use std::io::{self, Write};

use crate::board::{GameState, Owner};
use crate::config::OPTION_DECLARATIONS;
use crate::engine::Engine;
use crate::movegen::unplaced_pieces;
use crate::protocol::{board_rows, encode_board, BoardView, Command};
use crate::resolve::{PlacementIntent, ValidationResult};

/// Whether the main loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Mutable referee state between commands.
#[derive(Debug, Default)]
pub struct Session {
    pub engine: Engine,
    pub game: Option<GameState>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Executes one command, writing any response to `out`.
    pub fn dispatch<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        match cmd {
            Command::Hello => self.handle_hello(out)?,
            Command::IsReady => {
                writeln!(out, "readyok")?;
            }
            Command::SetOption { name, value } => {
                if let Err(e) = self.engine.config_mut().set_option(&name, value.as_deref()) {
                    eprintln!("setoption: {}", e);
                }
            }
            Command::NewGame { id } => {
                self.game = Some(self.engine.new_game(id.as_deref()));
            }
            Command::Place(intent) => self.handle_place(&intent, out)?,
            Command::Check(intent) => self.handle_check(&intent, out)?,
            Command::Show => self.handle_show(out)?,
            Command::Board => self.handle_board(out)?,
            Command::State => self.handle_state(out)?,
            Command::Moves { piece } => self.handle_moves(&piece, out)?,
            Command::Pieces => self.handle_pieces(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// Writes the identification lines, option declarations and `hellook`.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name cathedral")?;
        writeln!(out, "id version {}", env!("CARGO_PKG_VERSION"))?;
        for decl in OPTION_DECLARATIONS {
            writeln!(out, "{}", decl)?;
        }
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hellook")
    }

    /// Attempts a placement and reports `placed ...` or `rejected <REASON>`,
    /// followed by `gameover ...` when the move ends the game.
    pub fn handle_place<W: Write>(&mut self, intent: &PlacementIntent, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            eprintln!("place: no game in progress");
            return Ok(());
        };
        let was_finished = game.finished;
        match self.engine.attempt_placement(game, intent) {
            Ok(placement) => {
                writeln!(
                    out,
                    "placed {} captures {} territories {} scores {} {}",
                    intent.piece_id,
                    join_or_dash(placement.captures.iter().map(|s| s.as_str())),
                    join_or_dash(placement.new_territories.iter().map(|t| t.id.as_str())),
                    game.scores.light,
                    game.scores.dark,
                )?;
                if game.finished && !was_finished {
                    match game.winner {
                        Some(w) => writeln!(out, "gameover winner {}", w)?,
                        None => writeln!(out, "gameover draw")?,
                    }
                }
            }
            Err(reason) => writeln!(out, "rejected {}", reason.code())?,
        }
        Ok(())
    }

    /// Validates without placing and writes `check <json>`.
    pub fn handle_check<W: Write>(&mut self, intent: &PlacementIntent, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("check: no game in progress");
            return Ok(());
        };
        let report = ValidationResult::from(&self.engine.validate(game, intent));
        let json = serde_json::to_string(&report).map_err(io::Error::other)?;
        writeln!(out, "check {}", json)
    }

    /// Writes `board <notation>` on one line.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("board: no game in progress");
            return Ok(());
        };
        writeln!(out, "board {}", encode_board(game))
    }

    /// Writes the board as ten notation rows.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("show: no game in progress");
            return Ok(());
        };
        for row in board_rows(game) {
            writeln!(out, "{}", row)?;
        }
        Ok(())
    }

    /// Writes the JSON projection on one line.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("state: no game in progress");
            return Ok(());
        };
        let json = BoardView::from_state(game).to_json().map_err(io::Error::other)?;
        writeln!(out, "{}", json)
    }

    /// Writes `legalmoves <instance> <count>`.
    pub fn handle_moves<W: Write>(&mut self, piece: &str, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("moves: no game in progress");
            return Ok(());
        };
        let count = self.engine.legal_placements(game, piece).len();
        writeln!(out, "legalmoves {} {}", piece, count)
    }

    /// Writes one `pieces <OWNER> ...` line per owner.
    pub fn handle_pieces<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            eprintln!("pieces: no game in progress");
            return Ok(());
        };
        for owner in [Owner::Light, Owner::Dark, Owner::Neutral] {
            let ids = unplaced_pieces(game, owner);
            writeln!(out, "pieces {} {}", owner.as_str(), join_or_dash(ids.into_iter()))?;
        }
        Ok(())
    }
}

fn join_or_dash<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = items.collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parse_command;

    fn run(session: &mut Session, lines: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        for line in lines {
            if let Some(cmd) = parse_command(line) {
                if session.dispatch(cmd, &mut out).unwrap() == Flow::Quit {
                    break;
                }
            }
        }
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn hello_ends_with_hellook() {
        let lines = run(&mut Session::new(), &["hello"]);
        assert_eq!(lines.first().map(String::as_str), Some("id name cathedral"));
        assert_eq!(lines.last().map(String::as_str), Some("hellook"));
        assert!(lines.iter().any(|l| l.starts_with("option name AllowReflection")));
    }

    #[test]
    fn place_reports_outcome() {
        let lines = run(
            &mut Session::new(),
            &["newgame g", "place LIGHT_WALL3 0 0", "place DARK_WALL3 1 0", "place NOPE 0 0"],
        );
        assert_eq!(
            lines,
            vec![
                "placed LIGHT_WALL3 captures - territories - scores 3 0",
                "rejected CELL_OCCUPIED",
                "rejected UNKNOWN_PIECE",
            ]
        );
    }

    #[test]
    fn negative_anchor_is_rejected() {
        let lines = run(&mut Session::new(), &["newgame g", "place LIGHT_WALL3 -1 0", "isready"]);
        assert_eq!(lines, vec!["rejected OUT_OF_BOUNDS", "readyok"]);
    }

    #[test]
    fn check_reports_without_placing() {
        let mut session = Session::new();
        let lines = run(&mut session, &["newgame", "check LIGHT_WALL3 0 0", "check LIGHT_WALL3 -5 0"]);
        assert_eq!(lines.len(), 2);

        let ok: serde_json::Value = serde_json::from_str(&lines[0]["check ".len()..]).unwrap();
        assert_eq!(ok["legal"], true);
        assert!(ok.get("reason").is_none());
        let bad: serde_json::Value = serde_json::from_str(&lines[1]["check ".len()..]).unwrap();
        assert_eq!(bad["legal"], false);
        assert_eq!(bad["reason"], "OUT_OF_BOUNDS");

        let game = session.game.as_ref().unwrap();
        assert!(!game.pieces["LIGHT_WALL3"].placed);
        assert!(game.history.is_empty());
    }

    #[test]
    fn board_prints_one_line() {
        let lines = run(&mut Session::new(), &["newgame", "place DARK_WALL3 0 0", "board"]);
        let encoded = lines[1].strip_prefix("board ").unwrap();
        assert!(encoded.starts_with("DDD......./"));
        assert_eq!(encoded.split('/').count(), 10);
    }

    #[test]
    fn commands_without_game_print_nothing() {
        let lines = run(&mut Session::new(), &["place LIGHT_WALL3 0 0", "check LIGHT_WALL3 0 0", "show", "board", "state", "pieces"]);
        assert!(lines.is_empty());
    }

    #[test]
    fn setoption_reaches_engine() {
        let mut session = Session::new();
        run(&mut session, &["setoption name EnforceTurn value true"]);
        assert!(session.engine.config().enforce_turn);
        let lines = run(&mut session, &["newgame", "place DARK_TOWER 0 0"]);
        assert_eq!(lines, vec!["rejected OUT_OF_TURN"]);
    }

    #[test]
    fn show_and_moves() {
        let lines = run(&mut Session::new(), &["newgame", "place LIGHT_WALL3 0 0", "show", "moves DARK_COURTYARD"]);
        assert_eq!(lines[1], "LLL.......");
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[11], "legalmoves DARK_COURTYARD 78");
    }

    #[test]
    fn quit_stops_processing() {
        let lines = run(&mut Session::new(), &["quit", "isready"]);
        assert!(lines.is_empty());
    }
}
