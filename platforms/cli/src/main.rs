mod loader;

use anyhow::{Context, Result};
use clap::Parser;
use loader::ConfigLoader;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use tm_engine::{
    programs::Config, ProgramManager, Run, Step, Tape, TuringMachine, MAX_EXECUTION_STEPS,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type Machine = TuringMachine<String, char>;

/// Cells shown on each side of the head in step-by-step output.
const STEP_VIEW_RADIUS: i64 = 32;
/// Cells printed on each side of the head for the final tape.
const FINAL_VIEW_RADIUS: i64 = 4096;

/// Runs a single-tape Turing machine until it halts.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tm-cli --input _111_ --debug
  tm-cli --program \"Busy Beaver (3-state)\" --json
  cat machine.json | tm-cli")]
struct Cli {
    /// Name of a built-in program (defaults to "Binary Increment")
    #[clap(short, long)]
    program: Option<String>,

    /// Path to a JSON machine configuration.
    /// Configuration content can also be piped via stdin.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Replaces the initial tape ('_' stands for the blank symbol)
    #[clap(short, long)]
    input: Option<String>,

    /// Replaces the initial head position
    #[clap(long, allow_hyphen_values = true)]
    head: Option<i64>,

    /// Upper bound on the number of executed steps
    #[clap(short, long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the final machine snapshot as JSON
    #[clap(long)]
    json: bool,

    /// Step through the execution from stdin commands
    #[clap(long)]
    interactive: bool,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.list {
        for name in ProgramManager::list_program_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = apply_input(load_config(&cli)?, cli.input.as_deref(), cli.head);
    let mut machine = TuringMachine::new(config);

    if cli.interactive {
        return interactive(&mut machine, cli.max_steps);
    }

    let run = if cli.debug {
        println!("{}", describe(&machine));
        let mut steps = 0;
        while steps < cli.max_steps {
            match machine.step() {
                Step::Advanced(_) => {
                    steps += 1;
                    println!("{}", describe(&machine));
                }
                Step::Halted => break,
            }
        }
        println!();
        Run {
            halted: machine.is_halted(),
            steps,
            max_steps: cli.max_steps,
        }
    } else {
        machine.run_to_halt(cli.max_steps)
    };
    tracing::info!(steps = run.steps, halted = run.halted, "run finished");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&machine.snapshot())?);
    } else {
        println!("{}", render_tape(&machine, FINAL_VIEW_RADIUS));
    }

    run.into_result()?;
    Ok(())
}

/// Resolves the configuration: a file, then a named built-in program, then piped stdin,
/// and finally the default built-in program.
fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        ConfigLoader::load_config(path)
    } else if let Some(name) = &cli.program {
        Ok(ProgramManager::get_program_by_name(name)?.config)
    } else if !cli.interactive && atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        ConfigLoader::load_config_from_string(&buffer)
    } else {
        Ok(ProgramManager::get_program_by_index(0)?.config)
    }
}

/// Replaces the initial tape and head of `config` where given.
fn apply_input(config: Config, input: Option<&str>, head: Option<i64>) -> Config {
    let tape = match input {
        Some(input) => Tape::parse(input, config.blank).cells().collect(),
        None => config.initial_tape.clone(),
    };
    let head = head.unwrap_or(config.initial_head);

    config.with_input(tape, head)
}

/// The materialized cells plus the head position, cut to `radius` cells around the head.
fn visible_range(machine: &Machine, radius: i64) -> (i64, i64) {
    let (min, max) = machine.tape().bounds();
    let head = machine.head();

    (
        min.min(head).max(head.saturating_sub(radius)),
        max.max(head).min(head.saturating_add(radius)),
    )
}

fn render_tape(machine: &Machine, radius: i64) -> String {
    let (from, to) = visible_range(machine, radius);
    machine.window(from, to).into_iter().collect()
}

/// One status line followed by the tape and a marker under the head.
fn describe(machine: &Machine) -> String {
    let (from, _) = visible_range(machine, STEP_VIEW_RADIUS);

    let tape = render_tape(machine, STEP_VIEW_RADIUS);
    let marker = " ".repeat(machine.head().abs_diff(from) as usize);

    format!(
        "Step: {}, State: {}, Head: {}{}\n  {}\n  {}^",
        machine.step_count(),
        machine.state(),
        machine.head(),
        if machine.is_halted() { " (halted)" } else { "" },
        tape,
        marker
    )
}

fn interactive(machine: &mut Machine, max_steps: usize) -> Result<()> {
    const HELP: &str = "Commands: [Enter]/s step, c continue, r reset, q quit";

    println!("{}", HELP);
    println!("{}", describe(machine));

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        match line?.trim() {
            "" | "s" => match machine.step() {
                Step::Advanced(advance) => {
                    println!(
                        "{} --{}/{}:{:?}--> {}",
                        advance.from, advance.read, advance.written, advance.direction, advance.to
                    );
                    println!("{}", describe(machine));
                }
                Step::Halted => println!("Machine halted."),
            },
            "c" => {
                let run = machine.run_to_halt(max_steps);
                if !run.halted {
                    println!("Stopped after {} steps without halting.", run.steps);
                }
                println!("{}", describe(machine));
            }
            "r" => {
                machine.reset();
                println!("{}", describe(machine));
            }
            "q" => break,
            other => println!("Unknown command '{}'. {}", other, HELP),
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}
