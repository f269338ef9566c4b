//! scheme - run, explore, and format R5RS-subset Scheme source.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate a file, printing the result of each top-level datum
//! scheme run program.scm
//!
//! # Start an interactive read-eval-print loop
//! scheme repl
//!
//! # Reformat a file in place, or check it's already formatted (CI mode)
//! scheme fmt program.scm
//! scheme fmt --check program.scm
//! ```

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use schemecore::config::Config;
use schemecore::eval::{builtins::global_frame, eval, Ctx};
use schemecore::hooks::StdoutHooks;
use schemecore::printer::print_value;
use schemecore::reader::Reader;

#[derive(Parser, Debug)]
#[command(name = "scheme")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Disable dotted-pair notation and require `(variadic name)` for rest
    /// parameters.
    #[arg(long, global = true)]
    no_dotted: bool,

    /// Reject irreversible mutators (`set-car!`, `vector-set!`, `load`, ...).
    #[arg(long, global = true)]
    fragile: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every top-level form in a file
    Run {
        /// Source file to evaluate
        path: PathBuf,
    },
    /// Start an interactive read-eval-print loop
    Repl,
    /// Reformat a source file
    Fmt {
        /// Source file to reformat
        path: PathBuf,

        /// Report whether the file is already formatted; don't write anything
        #[arg(long)]
        check: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let config = Config { dotted: !args.no_dotted, fragile: args.fragile };

    let result = match args.command {
        Command::Run { path } => run(&path, config),
        Command::Repl => repl(config),
        Command::Fmt { path, check } => fmt(&path, check, config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.to_string().red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(path: &PathBuf, config: Config) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let datums = Reader::new(&source, config)?.read_all()?;

    let frame = global_frame();
    let mut hooks = StdoutHooks;
    let mut ctx = Ctx::new(config, &mut hooks);

    for datum in datums {
        eval(&datum, &frame, &mut ctx)?;
    }
    Ok(())
}

fn repl(config: Config) -> anyhow::Result<()> {
    let frame = global_frame();
    let mut hooks = StdoutHooks;
    let mut ctx = Ctx::new(config, &mut hooks);
    let stdin = std::io::stdin();

    println!("{}", "scheme-core repl, ^D to exit".dimmed());
    loop {
        print!("{}", "> ".cyan());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match read_line(&line, config) {
            Ok(datums) => {
                for datum in datums {
                    match eval(&datum, &frame, &mut ctx) {
                        Ok(value) => println!("{}", print_value(&value)),
                        Err(err) => eprintln!("{}", err.to_string().red()),
                    }
                }
            }
            Err(err) => eprintln!("{}", err.to_string().red()),
        }
    }
    Ok(())
}

fn read_line(line: &str, config: Config) -> Result<Vec<schemecore::Value>, schemecore::ReadError> {
    let mut reader = Reader::new(line, config)?;
    reader.read_all()
}

fn fmt(path: &PathBuf, check: bool, config: Config) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)?;

    if check {
        if schemecore::format::is_formatted(&source, config)? {
            println!("{} {}", "ok".green(), path.display());
            Ok(())
        } else {
            println!("{} {} is not formatted", "drift".yellow(), path.display());
            Err(anyhow::anyhow!("{} is not formatted", path.display()))
        }
    } else {
        let formatted = schemecore::format::reformat(&source, config)?;
        std::fs::write(path, formatted)?;
        println!("{} {}", "formatted".green(), path.display());
        Ok(())
    }
}
