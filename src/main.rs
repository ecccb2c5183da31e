mod backup;
mod config;
mod db;
mod ipc;
mod store;

use std::io::{self, BufRead, Write};

fn main() {
    // stdout carries the protocol; startup failures report on stderr.
    let credentials = match config::Credentials::from_env() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("rollbookd: {e:#}");
            std::process::exit(1);
        }
    };
    let store = match store::Store::open(&credentials.data_dir) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("rollbookd: {e:#}");
            std::process::exit(1);
        }
    };
    let mut state = ipc::AppState {
        data_dir: credentials.data_dir,
        store,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // No id to correlate with; reply with a bare envelope.
                let _ = writeln!(
                    stdout,
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": { "code": "bad_json", "message": e.to_string() }
                    })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
