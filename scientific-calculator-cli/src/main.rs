use anyhow::{Context, Result};
use clap::{ArgEnum, Parser};
use clap_verbosity_flag::Verbosity;
use log::{info, LevelFilter};
use scientific_calculator::interpreter::{calculate, convert, tokens_to_string};
use scientific_calculator::{AngleMode, PreviewResult, Session};
use std::io;
use std::io::BufRead;

/// Evaluates arithmetic and scientific expressions
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate. Read line by line from stdin when omitted
    expression: Option<String>,

    /// The unit trigonometric functions work in
    #[clap(long, arg_enum, default_value = "raw")]
    angle_mode: AngleModeArgument,

    /// Print the parsed expression tree and its canonical form
    #[clap(long)]
    tree: bool,

    /// Replay whitespace separated keystrokes, e.g. "sin 3 0 ) =".
    /// Besides keys, "=", "del", "inv" and "mode" are understood
    #[clap(long, conflicts_with = "expression")]
    keys: Option<String>,

    #[clap(flatten)]
    verbose: Verbosity,
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum AngleModeArgument {
    Raw,
    Radians,
    Degrees,
}

impl From<AngleModeArgument> for AngleMode {
    fn from(argument: AngleModeArgument) -> Self {
        match argument {
            AngleModeArgument::Raw => AngleMode::Raw,
            AngleModeArgument::Radians => AngleMode::Radians,
            AngleModeArgument::Degrees => AngleMode::Degrees,
        }
    }
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    let level = args
        .verbose
        .log_level()
        .map_or(LevelFilter::Off, |level| level.to_level_filter());
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let angle_mode = AngleMode::from(args.angle_mode);
    info!("Calculating in {} mode", angle_mode);

    if let Some(keys) = &args.keys {
        return replay_keys(keys, angle_mode);
    }

    match &args.expression {
        Some(expression) => {
            if args.tree {
                print_tree(expression)?;
            }
            let result = calculate(expression, angle_mode)
                .with_context(|| format!("Could not calculate '{}'", expression))?;
            println!("{}", result);
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("Failed to read from stdin")?;
                if line.trim().is_empty() {
                    continue;
                }
                if args.tree {
                    if let Err(error) = print_tree(&line) {
                        eprintln!("{:#}", error);
                    }
                }
                match calculate(&line, angle_mode) {
                    Ok(result) => println!("{}", result),
                    Err(error) => println!("{} ({})", error.display_text(), error),
                }
            }
        }
    }
    Ok(())
}

fn print_tree(expression: &str) -> Result<()> {
    let tree = convert(expression)?;
    println!("{}", tree);
    println!("{}", tokens_to_string(tree.to_infix()?)?);
    Ok(())
}

fn replay_keys(keys: &str, angle_mode: AngleMode) -> Result<()> {
    let mut session = Session::new(angle_mode);

    for key in keys.split_whitespace() {
        match key {
            "=" => match session.evaluate_final() {
                Ok(result) => println!("= {}", result),
                Err(error) => println!("= {} ({})", error.display_text(), error),
            },
            "del" => {
                let preview = session.delete_or_clear();
                print_preview(&session, &preview);
            }
            "inv" => println!("inverse {}", session.toggle_inverse()),
            "mode" => println!("mode {}", session.toggle_angle_mode()),
            key => {
                let preview = session
                    .append_str(key)
                    .with_context(|| format!("Could not press '{}'", key))?;
                print_preview(&session, &preview);
            }
        }
    }
    Ok(())
}

fn print_preview(session: &Session, preview: &PreviewResult) {
    let preview_text = match (&preview.preview_text, preview.is_error) {
        (_, true) => "Error".to_string(),
        (Some(preview_text), false) => preview_text.clone(),
        (None, false) => String::new(),
    };
    println!(
        "{:<24} {:<16} [{}]",
        preview.expression_text,
        preview_text,
        session.delete_action()
    );
}
