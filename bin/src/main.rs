use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;

use errors::{Diagnostic, Diagnostics};
use interpreter::{Interpreter, Value};
use scanner::Scanner;

mod history;
use history::TokenHistory;

/// Exit status for a script that contained any error.
const EXIT_DATA_ERROR: u8 = 65;

#[derive(clap::Parser)]
#[command(about = "Evaluate a single toylang expression from a file, or start a prompt")]
struct Args {
    /// Script to evaluate. Starts the prompt when omitted.
    file: Option<PathBuf>,

    /// Print the parsed expression tree before its value
    #[arg(long)]
    print_ast: bool,

    /// Print the tokens of every input
    #[arg(long)]
    print_tokens: bool,
}

struct Session {
    print_ast: bool,
    print_tokens: bool,
    history: TokenHistory,
}

impl Session {
    fn new(args: &Args) -> Self {
        Self {
            print_ast: args.print_ast,
            print_tokens: args.print_tokens,
            history: TokenHistory::default(),
        }
    }

    fn run(&mut self, source: &str) -> Result<Value, Diagnostics> {
        let (tokens, diagnostics) = Scanner::new(source).scan_tokens();
        self.history.extend(tokens.iter().cloned());

        if self.print_tokens {
            tokens.iter().for_each(|token| println!("{token}"));
        }

        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }

        let expr = parser::parse(tokens)?;
        if self.print_ast {
            println!("{expr}");
        }

        Interpreter::new().evaluate(&expr).map_err(|e| Diagnostic::from(e).into())
    }
}

fn run_file(path: PathBuf, session: &mut Session) -> anyhow::Result<ExitCode> {
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("Could not open file: {}", path.display()))?;

    match session.run(&source) {
        Ok(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::from(EXIT_DATA_ERROR))
        }
    }
}

fn run_prompt(session: &mut Session) -> anyhow::Result<ExitCode> {
    loop {
        print!(">>> ");
        stdout().flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }

        match line.trim() {
            "exit" => return Ok(ExitCode::SUCCESS),
            ":tokens" => {
                session.history.tokens().iter().for_each(|token| println!("{token}"));
                continue;
            }
            "" => continue,
            _ => (),
        }

        // Every prompt line is scanned as line 1
        match session.run(line.trim_end_matches(['\n', '\r'])) {
            Ok(value) => println!("{value}"),
            Err(e) => eprintln!("{e}"),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let mut session = Session::new(&args);

    match args.file {
        Some(file) => run_file(file, &mut session),
        None => run_prompt(&mut session),
    }
}
