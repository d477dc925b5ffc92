use std::{
    fs,
    io::{self, BufRead, Write},
};

use blast::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{DEFAULT_MAX_CALL_DEPTH, Interpreter, InterpreterConfig},
        lexer::Lexer,
        parser::Parser as BlastParser,
    },
    run_source_with,
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// blast runs scripts written in the Blast language: `turbo` variables,
/// `blast` functions, `cruise` loops and `echo` output.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treats `contents` as the path of a script file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Starts an interactive session that runs one line at a time.
    #[arg(short, long)]
    repl: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Calls nested deeper than this stop the program.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// The script, or its path with `--file`.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = InterpreterConfig { max_call_depth: args.max_call_depth };
    std::process::exit(run(&args, config));
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt().with_env_filter(filter)
         .with_writer(io::stderr)
         .with_target(true)
         .init();
}

fn run(args: &Args, config: InterpreterConfig) -> i32 {
    let mut interpreter = Interpreter::with_config(config);

    if args.repl {
        return repl(&mut interpreter);
    }

    let Some(contents) = &args.contents else {
        eprintln!("Nothing to run. Pass a script, a path with --file, or --repl.");
        return 64;
    };

    let script = if args.file {
        match fs::read_to_string(contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                return 66;
            },
        }
    } else {
        contents.clone()
    };

    match run_source_with(&script, &mut interpreter) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("{e}");
            70
        },
    }
}

/// Reads statements line by line until end of input or `exit`.
fn repl(interpreter: &mut Interpreter) -> i32 {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return 1;
        }

        let Some(Ok(line)) = lines.next() else {
            println!();
            return 0;
        };

        let line = line.trim();
        if line == "exit" {
            return 0;
        }

        run_line(interpreter, line);
    }
}

fn run_line(interpreter: &mut Interpreter, line: &str) {
    let mut parser = BlastParser::new(Lexer::new(line));

    loop {
        let statement = match parser.parse_one_statement() {
            Ok(Some(statement)) => statement,
            Ok(None) => return,
            Err(errors) => {
                eprintln!("{errors}");
                return;
            },
        };

        match interpreter.interpret_statement(&statement) {
            Ok(()) => {},
            Err(e @ RuntimeError::Thrown { .. }) => eprintln!("{e}"),
            Err(e) => {
                eprintln!("{e}");
                return;
            },
        }
    }
}
