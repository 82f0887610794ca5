use anyhow::{anyhow, Result};
use clap::{App, Arg};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use macropad_core::{Color, Context, Machine};
use macropad_input_stdin::StdinMachine;

mod config;
mod effector;

pub fn main() -> Result<()> {
    let matches = App::new("macropad")
        .version("0.1.0")
        .about("Runs a macro keypad layout, reading key events from stdin")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Config file to use instead of the default one")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("stdout")
                .long("stdout")
                .help("Print effects instead of sending them to the host"),
        )
        .arg(
            Arg::with_name("os")
                .long("os")
                .value_name("OS")
                .possible_values(&["MAC", "WIN", "LIN"])
                .help("Operating system to start with")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log every key press"),
        )
        .get_matches();

    init_logging(matches.is_present("verbose"));

    let config_path = matches
        .value_of("config")
        .map(PathBuf::from)
        .unwrap_or_else(config::default_path);
    let config = config::load_file(&config_path)?;
    let base_path = config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut keypad = config.get_keypad(base_path)?;
    let mut effector = config.get_effector(matches.is_present("stdout"));
    let mut settings = config.get_settings(matches.value_of("os"))?;
    let mut machine = StdinMachine::new();
    tracing::info!("Starting macropad with {} apps", keypad.apps().len());

    let mut labels = {
        let ctx = Context::new(effector.as_mut(), &mut settings);
        (keypad.current(&ctx).name().to_string(), keypad.labels(&ctx))
    };
    print_labels(&labels.0, &labels.1);

    while let Some(event) = machine
        .read()
        .map_err(|e| anyhow!("unable to read input: {}", e))?
    {
        let mut ctx = Context::new(effector.as_mut(), &mut settings);
        if let Err(e) = keypad.handle(event, &mut ctx) {
            tracing::error!("{:?} failed: {}", event, e);
        }

        // settings keys and app switches change what is shown
        let new_labels = (keypad.current(&ctx).name().to_string(), keypad.labels(&ctx));
        if new_labels != labels {
            labels = new_labels;
            print_labels(&labels.0, &labels.1);
        }
    }

    tracing::info!("Input closed, exiting");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the keypad as a grid of three columns
fn print_labels(app_name: &str, labels: &[(String, Color)]) {
    println!("[{}]", app_name);
    for row in labels.chunks(3) {
        let cells: Vec<String> = row
            .iter()
            .map(|(text, color)| format!("{:<10} {}", text, color))
            .collect();
        println!("{}", cells.join(" | "));
    }
}
