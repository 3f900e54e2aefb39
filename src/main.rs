use std::{io::ErrorKind, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use robolang::{
    ast::Program,
    error::LoadError,
    interpreter::evaluator::stepper::{Step, Stepper},
    robot::ScriptedRobot,
};

/// robolang parses robot-control programs and prints them back, optionally
/// dry-running them against a scripted robot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat every input as a path to a program file instead of source text.
    #[arg(short, long)]
    file: bool,

    /// Dry-run each parsed program against a scripted robot.
    #[arg(short, long)]
    run: bool,

    /// Number of actions the scripted robot accepts before halting.
    #[arg(long, default_value_t = 100)]
    max_actions: usize,

    /// Starting fuel of the scripted robot.
    #[arg(long, default_value_t = 100)]
    fuel: i64,

    /// Distance to the wall reported by the scripted robot.
    #[arg(long, default_value_t = 10)]
    wall: i64,

    /// Program sources, or file paths with `--file`.
    #[arg(required = true)]
    contents: Vec<String>,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();
    let mut failed = false;

    for input in &args.contents {
        let Some(program) = load(&args, input)? else {
            failed = true;
            println!("=================");
            continue;
        };

        println!("Parsing completed");
        println!("================\nProgram:");
        print!("{program}");
        if args.run {
            dry_run(&args, &program);
        }
        println!("=================");
    }

    println!("Done");
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Parses one input, printing any diagnostic. Returns `None` if the input
/// could not be used.
fn load(args: &Args, input: &str) -> Result<Option<Program>> {
    let loaded = if args.file {
        println!("Parsing '{input}'");
        robolang::parse_file(input)
    } else {
        println!("Parsing '<inline>'");
        robolang::parse(input).map_err(LoadError::from)
    };

    match loaded {
        Ok(program) => Ok(Some(program)),
        Err(LoadError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            println!("Can't find file '{input}'");
            Ok(None)
        },
        Err(LoadError::Parse(e)) => {
            println!("Parser error:");
            println!("{e}");
            Ok(None)
        },
        Err(e) => Err(e).with_context(|| format!("Loading {input}")),
    }
}

/// Steps `program` against a scripted robot until it finishes, halts or
/// stalls, printing every action.
fn dry_run(args: &Args, program: &Program) {
    let mut robot = ScriptedRobot::new().with_fuel(args.fuel)
                                        .with_wall_distance(args.wall)
                                        .with_budget(args.max_actions);
    let mut stepper = Stepper::new(program);
    let mut idle_steps = 0;

    println!("Running:");
    loop {
        match stepper.step(&mut robot) {
            Ok(Step::Acted(action)) => {
                idle_steps = 0;
                println!("    {action}");
            },
            Ok(Step::Idle) => {
                idle_steps += 1;
                if idle_steps > args.max_actions {
                    println!("Program stalled after {} actions", stepper.actions());
                    break;
                }
            },
            Ok(Step::Finished) => {
                println!("Program finished after {} actions", stepper.actions());
                break;
            },
            Err(e) => {
                println!("Program halted after {} actions: {e}", stepper.actions());
                break;
            },
        }
    }
}
