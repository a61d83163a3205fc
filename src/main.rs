// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line driver: parse a puzzle input file, run a kernel, print the answers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use puzzle_search::divisor::DivisorSearch;
use puzzle_search::input;
use puzzle_search::logging;
use puzzle_search::permutation::{optimize, optimize_both, Mode};
use puzzle_search::subset::ExactFit;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "puzzle",
    version,
    about = "Exhaustive search over permutations, subsets, rewrites and divisor sums"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shortest and longest route visiting every place once (`A to B = 7` lines).
    Route {
        /// Input file.
        input: PathBuf,
    },
    /// Happiest circular seating (`A would gain 5 happiness units by sitting next to B.`).
    Seating {
        /// Input file.
        input: PathBuf,
        /// Add a neutral seat for yourself.
        #[arg(long)]
        include_self: bool,
    },
    /// Container combinations holding exactly the capacity (one size per line).
    Containers {
        /// Input file.
        input: PathBuf,
        /// Volume to fill exactly.
        #[arg(long, default_value_t = 150)]
        capacity: u64,
    },
    /// Distinct one-step molecules, and greedy steps back to the terminal symbol.
    Molecule {
        /// Input file.
        input: PathBuf,
        /// Symbol every molecule is built from.
        #[arg(long, default_value = "e")]
        terminal: String,
    },
    /// First house whose presents reach the threshold (a single integer).
    Presents {
        /// Input file.
        input: PathBuf,
        /// Presents per elf visit, multiplied by the elf number.
        #[arg(long, default_value_t = 10)]
        multiplier: u64,
        /// Houses each elf visits before stopping.
        #[arg(long)]
        visit_limit: Option<u64>,
        /// Highest house number to try.
        #[arg(long)]
        upper_bound: Option<u64>,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Route { input } => cmd_route(&input),
        Command::Seating {
            input,
            include_self,
        } => cmd_seating(&input, include_self),
        Command::Containers { input, capacity } => cmd_containers(&input, capacity),
        Command::Molecule { input, terminal } => cmd_molecule(&input, &terminal),
        Command::Presents {
            input,
            multiplier,
            visit_limit,
            upper_bound,
        } => cmd_presents(&input, multiplier, visit_limit, upper_bound),
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn cmd_route(path: &Path) -> Result<()> {
    let facts = input::parse_distances(&read_input(path)?)
        .with_context(|| format!("parse distances from {}", path.display()))?;
    info!(
        places = facts.entities.len(),
        pairs = facts.costs.len(),
        "loaded distances"
    );

    let extremes = optimize_both(&facts.entities, &facts.costs, false).context("order places")?;
    println!("shortest: {}", extremes.min);
    println!("longest: {}", extremes.max);
    Ok(())
}

fn cmd_seating(path: &Path, include_self: bool) -> Result<()> {
    let mut facts = input::parse_seating(&read_input(path)?)
        .with_context(|| format!("parse seating from {}", path.display()))?;
    if include_self {
        facts = facts.with_self_seat();
    }
    info!(
        guests = facts.entities.len(),
        pairs = facts.costs.len(),
        include_self,
        "loaded seating"
    );

    let happiness =
        optimize(&facts.entities, &facts.costs, Mode::Max, true).context("arrange guests")?;
    println!("happiness: {}", happiness);
    Ok(())
}

fn cmd_containers(path: &Path, capacity: u64) -> Result<()> {
    let sizes = input::parse_containers(&read_input(path)?)
        .with_context(|| format!("parse containers from {}", path.display()))?;
    info!(containers = sizes.len(), capacity, "loaded containers");

    let fit = ExactFit::search(&sizes, capacity);
    println!("combinations: {}", fit.count());
    match fit.min_len() {
        Some(min) => println!("fewest containers: {} ({} ways)", min, fit.count_at_min_len()),
        None => println!("fewest containers: none"),
    }
    Ok(())
}

fn cmd_molecule(path: &Path, terminal: &str) -> Result<()> {
    let molecule = input::parse_molecule(&read_input(path)?)
        .with_context(|| format!("parse molecule from {}", path.display()))?;
    info!(
        rules = molecule.rules.len(),
        length = molecule.molecule.len(),
        "loaded molecule"
    );

    println!("distinct molecules: {}", molecule.rules.expand(&molecule.molecule).len());
    let steps = molecule
        .rules
        .reduce(&molecule.molecule, terminal)
        .with_context(|| format!("reduce molecule to {:?}", terminal))?;
    println!("steps from {}: {}", terminal, steps);
    Ok(())
}

fn cmd_presents(
    path: &Path,
    multiplier: u64,
    visit_limit: Option<u64>,
    upper_bound: Option<u64>,
) -> Result<()> {
    let threshold = input::parse_threshold(&read_input(path)?)
        .with_context(|| format!("parse threshold from {}", path.display()))?;

    let search = DivisorSearch {
        multiplier,
        visit_limit,
        upper_bound,
    };
    let house = search
        .smallest_n_meeting(threshold)
        .context("search houses")?;
    println!("house: {}", house);
    Ok(())
}
