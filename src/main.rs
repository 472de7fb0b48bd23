use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use treelox::ast_printer::AstPrinter;
use treelox::interpreter::Interpreter;
use treelox::runner;
use treelox::scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking Lox interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: PathBuf },

    /// Parses a program and prints its syntax tree
    Parse {
        filename: PathBuf,

        /// Print the tree as JSON instead of prefix notation
        #[arg(long)]
        json: bool,
    },

    /// Runs a program from a file, or starts a REPL when no file is given
    Run { filename: Option<PathBuf> },
}

/// Reads a whole source file as UTF‑8 text.
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("treelox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // RUST_LOG, when set, wins
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(filename: &Path) -> Result<()> {
    let source = read_file(filename)?;
    let mut tokenized = true;

    for token in Scanner::new(source.as_bytes()) {
        match token {
            Ok(token) => println!("{}", token),

            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if !tokenized {
        debug!("Tokenization failed, exiting with code 65");
        std::process::exit(65);
    }

    Ok(())
}

fn parse(filename: &Path, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let parsed = runner::parse_source(&source);

    for error in &parsed.errors {
        eprintln!("{}", error);
    }

    if parsed.has_errors() {
        debug!("Parse failed, exiting with code 65");
        std::process::exit(65);
    }

    if json {
        let tree = serde_json::to_string_pretty(&parsed.statements)
            .context("Failed to serialize syntax tree")?;
        println!("{}", tree);
    } else {
        for stmt in &parsed.statements {
            println!("{}", AstPrinter::print_stmt(stmt));
        }
    }

    Ok(())
}

fn run_file(filename: &Path) -> Result<()> {
    let source = read_file(filename)?;
    let mut interpreter = Interpreter::new();

    if let Err(e) = runner::run(&mut interpreter, &source) {
        eprintln!("{}", e);
        debug!("Run failed, exiting with code {}", e.exit_code());
        std::process::exit(e.exit_code());
    }

    info!("Program executed successfully");
    Ok(())
}

/// Each line is a separate run sharing one interpreter; errors are reported
/// and the session continues.
fn repl() -> Result<()> {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("lox REPL");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        if let Err(e) = runner::run(&mut interpreter, &line) {
            eprintln!("{}", e);
        }
    }

    println!("Bye!");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match &args.commands {
        Commands::Tokenize { filename } => tokenize(filename),
        Commands::Parse { filename, json } => parse(filename, *json),
        Commands::Run {
            filename: Some(filename),
        } => run_file(filename),
        Commands::Run { filename: None } => repl(),
    }
}
