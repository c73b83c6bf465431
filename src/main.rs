use std::{fs, path::PathBuf, process};

#[macro_use]
extern crate log;

use clap::Parser;

mod features;
use features::{Command, Session, Store};

/// Replays a command script against the in-memory demo bank and prints the
/// final state as JSON.
#[derive(Parser, Debug)]
struct Args {
    /// CSV command script; the built-in demo script runs when omitted.
    script: Option<PathBuf>,
}

const DEMO_SCRIPT: &str = "\
command, user, pin, to, amount
login, js, 1111, ,
sort, , , ,
transfer, , , jd, 200
loan, , , , 500
login, jd, 2222, ,
transfer, , , ss, 90
close, jd, 2222, ,
";

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let script = match &args.script {
        Some(path) => fs::read_to_string(path)?,
        None => DEMO_SCRIPT.to_string(),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(script.as_bytes());

    let mut session = Session::new(Store::demo()?);

    for result in rdr.deserialize() {
        let command: Command = result?;
        match command.apply(&mut session) {
            Ok(outcome) => {
                info!("{outcome}");
                if let Ok(statement) = session.statement() {
                    debug!("{} has {} available", statement.first_name, statement.summary.balance);
                }
            }
            Err(e) => warn!("{e}"),
        }
    }

    // The active statement once the script has run, or the closing
    // balances of every remaining account when nobody is logged in.
    match session.statement() {
        Ok(statement) => println!("{}", serde_json::to_string_pretty(&statement)?),
        Err(_) => println!("{}", serde_json::to_string_pretty(&session.balances())?),
    }

    Ok(())
}
