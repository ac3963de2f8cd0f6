//! aledger - line-oriented driver for the allocation ledger
//!
//! Reads one command per line from stdin and prints JSON results to
//! stdout. Exits 0 at end of input, non-zero with a message on the first
//! failing operation.
//!
//! Commands:
//! - `alloc <payload-bytes> [rooted]` - allocate, prints the new id
//! - `ref <id> [<id>...]` - replace the first id's outgoing references
//! - `root <id> on|off` - toggle direct reachability
//! - `stats` - print a usage snapshot
//! - `gc` - run a collection, print the sweep report
//! - `quit` - stop reading

use alloc_ledger::{Ledger, LedgerConfig, LedgerError, ObjectId};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = LedgerConfig::from_env();
    let mut ledger = match Ledger::new(config) {
        Ok(ledger) => ledger,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(2);
        }
    };

    // Command-level ids are the raw id values handed out by `alloc`.
    let mut ids: HashMap<u64, ObjectId> = HashMap::new();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("error: {}", err);
                return ExitCode::from(2);
            }
        };

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() || words[0].starts_with('#') {
            continue;
        }
        if words[0] == "quit" {
            break;
        }

        if let Err(err) = run_command(&mut ledger, &mut ids, &words) {
            eprintln!("error: {}", err);
            return ExitCode::from(1);
        }
    }

    ExitCode::SUCCESS
}

#[derive(Debug)]
enum DriverError {
    Usage(String),
    Ledger(LedgerError),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Usage(msg) => write!(f, "{}", msg),
            DriverError::Ledger(err) => write!(f, "{}", err),
        }
    }
}

impl From<LedgerError> for DriverError {
    fn from(err: LedgerError) -> Self {
        DriverError::Ledger(err)
    }
}

fn run_command(
    ledger: &mut Ledger,
    ids: &mut HashMap<u64, ObjectId>,
    words: &[&str],
) -> Result<(), DriverError> {
    let mut out = io::stdout().lock();

    match words[0] {
        "alloc" => {
            let payload = parse_usize(words.get(1), "alloc <payload-bytes> [rooted]")?;
            let rooted = words.get(2) == Some(&"rooted");
            let id = ledger.create(payload, rooted)?;
            ids.insert(id.value(), id);
            writeln!(out, "{{\"id\":{}}}", id.value()).ok();
        }
        "ref" => {
            let source = lookup(ids, words.get(1), "ref <id> [<id>...]")?;
            let targets = words[2..]
                .iter()
                .map(|w| lookup(ids, Some(w), "ref <id> [<id>...]"))
                .collect::<Result<Vec<_>, _>>()?;
            ledger.set_references(source, &targets)?;
            writeln!(out, "{{\"ok\":true}}").ok();
        }
        "root" => {
            let id = lookup(ids, words.get(1), "root <id> on|off")?;
            let rooted = match words.get(2) {
                Some(&"on") => true,
                Some(&"off") => false,
                _ => return Err(DriverError::Usage("usage: root <id> on|off".to_string())),
            };
            ledger.set_rooted(id, rooted)?;
            writeln!(out, "{{\"ok\":true}}").ok();
        }
        "stats" => {
            let snap = ledger.snapshot();
            let json = serde_json::to_string(&snap).expect("snapshot serializes");
            writeln!(out, "{}", json).ok();
        }
        "gc" => {
            let report = ledger.collect()?;
            let json = serde_json::to_string(&report).expect("report serializes");
            writeln!(out, "{}", json).ok();
        }
        other => {
            return Err(DriverError::Usage(format!("unknown command: {}", other)));
        }
    }

    Ok(())
}

fn parse_usize(word: Option<&&str>, usage: &str) -> Result<usize, DriverError> {
    word.and_then(|w| w.parse::<usize>().ok())
        .ok_or_else(|| DriverError::Usage(format!("usage: {}", usage)))
}

fn lookup(
    ids: &HashMap<u64, ObjectId>,
    word: Option<&&str>,
    usage: &str,
) -> Result<ObjectId, DriverError> {
    let raw = parse_usize(word, usage)? as u64;
    ids.get(&raw)
        .copied()
        .ok_or_else(|| DriverError::Usage(format!("unknown id: {}", raw)))
}
