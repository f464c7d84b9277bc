use std::io;
use std::path::Path;

use ansi_term::Color;
use linefeed::{Interface, ReadResult, Terminal};
use log::info;

use crate::config::Config;
use crate::evaluator::{self, Env};
use crate::printer;

fn configure_reader<T: Terminal>(reader: &Interface<T>, config: &Config) -> io::Result<()> {
    let mut reader = reader.lock_reader();
    reader.set_blink_matching_paren(true);

    let style = Color::Purple.bold();

    reader.set_prompt(&format!(
        "\x01{prefix}\x02{text}\x01{suffix}\x02",
        prefix = style.prefix(),
        text = config.prompt,
        suffix = style.suffix()
    ))
}

fn load_history<T: Terminal>(reader: &Interface<T>, history_file: &Path) {
    if let Err(e) = reader.load_history(history_file) {
        if e.kind() == io::ErrorKind::NotFound {
            println!(
                "History file {} doesn't exist, not loading history.",
                history_file.display()
            );
        } else {
            eprintln!(
                "Could not load history file {}: {}",
                history_file.display(),
                e
            );
        }
    }
}

pub fn run(config: &Config) -> io::Result<()> {
    let reader = Interface::new("sexpr")?;
    configure_reader(&reader, config)?;

    if let Some(history_file) = &config.history_file {
        load_history(&reader, history_file);
    }

    let mut env = Env::new();

    loop {
        match reader.read_line()? {
            ReadResult::Input(input) => {
                if let Some(output) = rep(&input, &mut env) {
                    reader.add_history_unique(input.clone());
                    println!("{}", output);
                }
            }
            ReadResult::Eof => {
                print!("^D");
                break;
            }
            ReadResult::Signal(signal) => {
                println!("signal: {:?}", signal);
                break;
            }
        }
    }

    info!("session ended with {} binding(s)", env.len());

    if let Some(history_file) = &config.history_file {
        if let Err(e) = reader.save_history(history_file) {
            eprintln!(
                "Could not save history file {}: {}",
                history_file.display(),
                e
            );
        }
    }

    Ok(())
}

/// rep reads, evaluates and prints one line against `env`. Blank lines produce no output.
pub fn rep(input: &str, env: &mut Env) -> Option<String> {
    if input.trim().is_empty() {
        return None;
    }
    let result = evaluator::eval(input, env);
    Some(printer::render(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines() {
        let mut env = Env::new();
        assert_eq!(rep("", &mut env), None);
        assert_eq!(rep("   \t", &mut env), None);
    }

    #[test]
    fn keeps_state_between_lines() {
        let mut env = Env::new();
        let session = vec![
            ("(set x 10)", "10"),
            ("x", "10"),
            ("(fn add1 (x) (add x 1))", "add1"),
            ("(add1 x)", "11"),
            ("(div x 0)", "undefined"),
        ];
        for (input, expected) in session {
            assert_eq!(rep(input, &mut env), Some(String::from(expected)));
        }
    }

    #[test]
    fn reports_errors_and_continues() {
        let mut env = Env::new();
        assert_eq!(
            rep("(add 1", &mut env),
            Some(String::from(
                "Error: syntax error: missing closing parenthesis for list opened at token 0"
            ))
        );
        assert_eq!(
            rep("y", &mut env),
            Some(String::from("Error: undefined symbol: y"))
        );
        assert_eq!(rep("(set y 2)", &mut env), Some(String::from("2")));
        assert_eq!(rep("y", &mut env), Some(String::from("2")));
    }
}
