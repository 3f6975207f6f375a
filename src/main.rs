// Hide console window on Windows for release builds (GUI app).
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;
use colored::Colorize;

use dicetoss::toss::{DiceType, TossConfig, TossPlugin};

/// Toss a single die around a tray, one variant at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Die selected at start (d4, d6, d8, d10, d12, d20)
    #[arg(short, long, value_parser = parse_die_arg)]
    die: Option<DiceType>,

    /// Seed for the idle tumble
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    dump_config: bool,
}

fn parse_die_arg(s: &str) -> Result<DiceType, String> {
    DiceType::parse(s)
        .ok_or_else(|| format!("Unknown die type: {s}. Valid: d4, d6, d8, d10, d12, d20"))
}

fn build_config(args: &Args) -> Result<TossConfig, String> {
    let mut config = match &args.config {
        Some(path) => TossConfig::load(path)?,
        None => TossConfig::default(),
    };

    if let Some(die) = args.die {
        config.initial_die = Some(die);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    if args.dump_config {
        match config.to_ron_pretty() {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Dice Toss".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(TossPlugin::new(config))
        .run();
}
