use std::fs;

use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use symba::{Environment, run_source};

/// symba is a small Mathematica-style symbolic calculator with a
/// read-evaluate-print loop.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the input as a file path instead of source text.
    #[arg(short, long)]
    file: bool,

    /// Source text to evaluate (or a file path with --file). Omit to start
    /// the interactive prompt.
    source: Option<String>,
}

fn main() {
    let args = Args::parse();
    let mut env = Environment::new();

    let Some(contents) = args.source else {
        repl(&mut env);
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
            std::process::exit(1);
        })
    } else {
        contents
    };

    match run_source(&script, &mut env) {
        Ok(result) => println!("= {result}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}

/// Runs the interactive prompt until `exit`, Ctrl-C, or Ctrl-D.
///
/// Each line is parsed and evaluated against the shared environment, so
/// assignments persist between lines. Errors are printed and the loop
/// continues.
fn repl(env: &mut Environment) {
    let Ok(mut editor) = DefaultEditor::new() else {
        eprintln!("Failed to initialize the line editor.");
        return;
    };

    loop {
        match editor.readline("symba> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" {
                    break;
                }
                let _ = editor.add_history_entry(line);

                match run_source(line, env) {
                    Ok(result) => println!("= {result}"),
                    Err(e) => println!("{e}"),
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            },
        }
    }
}
