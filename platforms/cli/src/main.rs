mod logger;
mod source;

use clap::{Parser, Subcommand};
use source::{read_config, read_file, read_piped_table, read_program, ProgramSource};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tinytm::trace::render as render_trace;
use tinytm::{analyze, assemble, encode, run, ProgramManager, TuringMachineError, PROGRAMS};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// JSON configuration file (blank symbol, reserved states, step budget)
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the step budget
    #[clap(short, long, global = true)]
    max_steps: Option<usize>,

    /// Log debug messages to stderr
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a TinyASM file to raw transition table text
    Asm {
        /// The TinyASM source file
        file: PathBuf,
    },
    /// Run a program against an input string
    Run {
        /// Program file: `.tasm` is assembled, anything else is read as a raw table.
        /// Read from stdin when omitted and stdin is piped.
        #[clap(short, long)]
        program: Option<PathBuf>,

        /// Run a built-in program instead of a file
        #[clap(short, long, conflicts_with = "program")]
        builtin: Option<String>,

        /// The input written to the tape
        #[clap(short, long)]
        input: Option<String>,

        /// Print each step of the execution
        #[clap(short = 'd', long)]
        trace: bool,

        /// Print the execution as JSON
        #[clap(long, conflicts_with = "trace")]
        json: bool,
    },
    /// Report likely mistakes in a program
    Check {
        /// Program file: `.tasm` is assembled, anything else is read as a raw table
        program: PathBuf,
    },
    /// List the built-in programs
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode, TuringMachineError> {
    let mut config = read_config(cli.config.as_deref())?;
    if let Some(max_steps) = cli.max_steps {
        config.max_steps = max_steps;
    }
    config.validate()?;

    match cli.command {
        Command::Asm { file } => {
            let transitions = assemble(&read_file(&file)?, &config)?;
            print!("{}", encode(&transitions));
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            program,
            builtin,
            input,
            trace,
            json,
        } => {
            let (source, sample_input) = resolve_program(program.as_deref(), builtin.as_deref())?;
            let input = input.or(sample_input).unwrap_or_default();
            let table = source.into_table(&config)?;
            let execution = run(&table, &input, &config);

            if json {
                println!("{}", serde_json::to_string_pretty(&execution)?);
            } else if trace {
                print!("{}", render_trace(&input, &execution));
            } else {
                println!("{}", execution.output);
                eprintln!("{}", execution.halt);
            }

            Ok(if execution.accepted() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Check { program } => {
            let table = read_program(&program)?.into_table(&config)?;
            let diagnostics = analyze(&table, &config);

            for diagnostic in &diagnostics {
                println!("{diagnostic}");
            }

            Ok(if diagnostics.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::List => {
            for program in PROGRAMS.iter() {
                println!(
                    "{:<16} {} rules, sample input {}",
                    program.name,
                    program.transitions.len(),
                    program.sample_input
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Picks the program to run, along with a default input for built-in programs.
fn resolve_program(
    program: Option<&Path>,
    builtin: Option<&str>,
) -> Result<(ProgramSource, Option<String>), TuringMachineError> {
    if let Some(name) = builtin {
        let info = ProgramManager::get_program_by_name(name)?;
        return Ok((
            ProgramSource::TinyAsm(info.source.to_string()),
            Some(info.sample_input.to_string()),
        ));
    }

    if let Some(path) = program {
        return Ok((read_program(path)?, None));
    }

    read_piped_table()?
        .map(|source| (source, None))
        .ok_or_else(|| {
            TuringMachineError::FileError(
                "No program given: pass --program, --builtin, or pipe a table on stdin"
                    .to_string(),
            )
        })
}
