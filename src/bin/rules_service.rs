use std::io::{self, BufRead, Write};

use arbiter::protocol;

fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to read request: {e}");
                std::process::exit(1);
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = protocol::handle_line(&line);
        if writeln!(out, "{response}").and_then(|()| out.flush()).is_err() {
            // The session layer hung up; nothing useful left to do.
            std::process::exit(1);
        }
    }
}
