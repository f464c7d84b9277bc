use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;
use simplelog::{Config as LogConfig, SimpleLogger};

use sexpr::config::Config;
use sexpr::evaluator::{self, Env};
use sexpr::printer;
use sexpr::repl;

/// An interpreter for a small Lisp-like S-expression language.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Script to evaluate form by form instead of starting the REPL
    file: Option<PathBuf>,

    /// Evaluate one expression, print the result and exit
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,

    /// File to keep REPL line history in
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Do not load or save REPL history
    #[arg(long, conflicts_with = "history")]
    no_history: bool,

    /// Increase logging verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default();
        if self.no_history {
            config.history_file = None;
        } else if let Some(history) = &self.history {
            config.history_file = Some(history.clone());
        }
        config.log_level = Config::log_level_for(self.verbose);
        config
    }
}

fn run(args: &Args, config: &Config) -> io::Result<bool> {
    let mut env = Env::new();

    let results = if let Some(expr) = &args.eval {
        vec![evaluator::eval(expr, &mut env)]
    } else if let Some(file) = &args.file {
        let source = fs::read_to_string(file)?;
        evaluator::eval_all(&source, &mut env)
    } else {
        repl::run(config)?;
        return Ok(true);
    };

    printer::println_to(io::stdout(), &results)?;
    Ok(results.iter().all(|result| result.is_ok()))
}

fn main() {
    let args = Args::parse();
    let config = args.config();

    if let Err(e) = SimpleLogger::init(config.log_level, LogConfig::default()) {
        eprintln!("could not initialize logging: {}", e);
    }

    match run(&args, &config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            process::exit(2);
        }
    }
}
