//! Cathedral referee -- a rules engine speaking a line-based text protocol.
//!
//! Reads commands from stdin and writes responses to stdout; diagnostics go
//! to stderr.

use std::io::{self, BufRead};

use cathedral::protocol::parse_command;
use cathedral::session::{Flow, Session};

/// Runs the protocol loop until `quit` or end of input.
fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        if session.dispatch(cmd, &mut out)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}
