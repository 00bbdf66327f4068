//! Command-line front end: consult knowledge bases, run queries
//!
//! Batch mode runs `--goal` queries and exits; without goals an
//! interactive read-query-print loop starts on stdin.

use clap::Parser;
use hornbeam::{render, Engine, EngineError, SolveConfig, SolveError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "A miniature Horn-clause resolution engine", long_about = None)]
struct Args {
    /// Knowledge base files to consult
    files: Vec<PathBuf>,

    /// Goals to run in batch mode (interactive loop if none given)
    #[arg(short, long = "goal")]
    goals: Vec<String>,

    /// Stop after this many solutions per goal
    #[arg(short, long)]
    limit: Option<usize>,

    /// Time budget per query, in seconds
    #[arg(long, default_value = "60")]
    time_budget: u64,

    /// Ceiling on variables minted per query (0 = no limit)
    #[arg(long, default_value = "0")]
    max_variables: usize,

    /// Emit solutions as JSON objects, one per line
    #[arg(long)]
    json: bool,

    /// Turn debugging information on
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(args.verbosity as usize)
        .init()
        .expect("unable to initialize logger");

    let mut engine = Engine::new();
    for path in &args.files {
        match engine.consult_file(path) {
            Ok(count) => log::info!("{}: {} clause(s)", path.display(), count),
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                return ExitCode::from(2);
            }
        }
    }

    let config = SolveConfig {
        time_budget: Duration::from_secs(args.time_budget),
        max_variables: args.max_variables,
    };

    if args.goals.is_empty() {
        interactive(&mut engine, &config, args.limit, args.json)
    } else {
        batch(&mut engine, &config, &args)
    }
}

fn batch(engine: &mut Engine, config: &SolveConfig, args: &Args) -> ExitCode {
    let mut all_satisfied = true;
    for goal in &args.goals {
        match run_goal(engine, goal, config, args.limit, args.json) {
            Ok(0) => {
                println!("no.");
                all_satisfied = false;
            }
            Ok(_) => {}
            Err(e) => {
                report_error(&e);
                return ExitCode::from(2);
            }
        }
    }
    if all_satisfied {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn interactive(
    engine: &mut Engine,
    config: &SolveConfig,
    limit: Option<usize>,
    json: bool,
) -> ExitCode {
    println!("hornbeam {}", env!("CARGO_PKG_VERSION"));
    println!("enter goals, `halt.` to leave");

    let stdin = io::stdin();
    loop {
        print!("?- ");
        if io::stdout().flush().is_err() {
            return ExitCode::SUCCESS;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return ExitCode::SUCCESS,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "halt." || line == "halt" {
            return ExitCode::SUCCESS;
        }

        match run_goal(engine, line, config, limit, json) {
            Ok(0) => println!("no."),
            Ok(_) => {}
            Err(e) => report_error(&e),
        }
    }
}

/// Run one goal, printing each solution; returns how many were found
fn run_goal(
    engine: &mut Engine,
    goal: &str,
    config: &SolveConfig,
    limit: Option<usize>,
    json: bool,
) -> Result<usize, EngineError> {
    let mut query = engine.query_with_config(goal, config.clone())?;
    let mut found = 0;
    while limit.map_or(true, |n| found < n) {
        match query.next_solution()? {
            Some(env) => {
                found += 1;
                if json {
                    println!(
                        "{}",
                        render::solution_json(query.variables(), &env, query.symbols())
                    );
                } else {
                    println!(
                        "{}",
                        render::solution(query.variables(), &env, query.symbols())
                    );
                }
            }
            None => break,
        }
    }
    Ok(found)
}

fn report_error(error: &EngineError) {
    match error {
        EngineError::Solve(SolveError::Aborted(abort)) => {
            eprintln!("search aborted: {}", abort)
        }
        other => eprintln!("error: {}", other),
    }
}
