use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::combat::{resolve_battle, round_events_to_csv, BattleReport, CombatModel, TraceMode};
use crate::config::WarbandConfig;
use crate::data::army::{Army, ArmySummary};
use crate::data::catalog::{load_catalog, Catalog};
use crate::data::validate::validate_catalog_file;
use crate::optimizer::{optimize, rank_budgets_with_progress, run_matchup};

pub const USAGE: &str = "usage: warband <optimize|battle|matchup|rank|validate|catalog> [args] [--catalog=PATH] [--config=PATH]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Optimize,
    Battle,
    Matchup,
    Rank,
    Validate,
    Catalog,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("optimize") => Some(Command::Optimize),
        Some("battle") => Some(Command::Battle),
        Some("matchup") => Some(Command::Matchup),
        Some("rank") => Some(Command::Rank),
        Some("validate") => Some(Command::Validate),
        Some("catalog") => Some(Command::Catalog),
        _ => None,
    }
}

/// Arguments after the subcommand, split into positionals and `--name[=value]` flags.
#[derive(Debug, Default)]
struct Invocation<'a> {
    positional: Vec<&'a str>,
    flags: Vec<(&'a str, Option<&'a str>)>,
}

impl<'a> Invocation<'a> {
    fn from_args(args: &'a [String]) -> Self {
        let mut invocation = Self::default();
        for arg in args.iter().skip(2) {
            match arg.strip_prefix("--") {
                Some(flag) => match flag.split_once('=') {
                    Some((name, value)) => invocation.flags.push((name, Some(value))),
                    None => invocation.flags.push((flag, None)),
                },
                None => invocation.positional.push(arg),
            }
        }
        invocation
    }

    fn arg(&self, index: usize) -> Option<&'a str> {
        self.positional.get(index).copied()
    }

    fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|(flag, _)| *flag == name)
    }

    fn flag_value(&self, name: &str) -> Option<&'a str> {
        self.flags
            .iter()
            .find(|(flag, _)| *flag == name)
            .and_then(|(_, value)| *value)
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let invocation = Invocation::from_args(args);

    if command == Command::Validate {
        return handle_validate(&invocation);
    }

    let config = match WarbandConfig::resolve(invocation.flag_value("config")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    let catalog = match resolve_catalog(&invocation, &config) {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };

    match command {
        Command::Optimize => handle_optimize(&invocation, &catalog),
        Command::Battle => handle_battle(&invocation, &config, &catalog),
        Command::Matchup => handle_matchup(&invocation, &config, &catalog),
        Command::Rank => handle_rank(&invocation, &config, &catalog),
        Command::Catalog => emit_json(&catalog),
        Command::Validate => handle_validate(&invocation),
    }
}

fn resolve_catalog(invocation: &Invocation<'_>, config: &WarbandConfig) -> Result<Catalog, i32> {
    let path = invocation
        .flag_value("catalog")
        .or(config.catalog.as_deref());
    match path {
        None => Ok(Catalog::default_codex()),
        Some(path) => load_catalog(path).map_err(|err| {
            eprintln!("catalog error: {err}");
            1
        }),
    }
}

fn handle_optimize(invocation: &Invocation<'_>, catalog: &Catalog) -> i32 {
    let max_points = parse_arg(invocation.arg(0), "max_points", 150i64);
    let army = match optimize(catalog.units(), max_points) {
        Ok(army) => army,
        Err(err) => {
            eprintln!("optimize failed: {err}");
            return 1;
        }
    };

    if invocation.has_flag("table") {
        println!("Optimized Army (Max Points: {max_points}):");
        print!("{army}");
        println!("Total Points: {}", army.total_points());
        println!("Total Effectiveness: {:.2}", army.total_effectiveness());
        return 0;
    }

    #[derive(Serialize)]
    struct OptimizeOutput {
        max_points: i64,
        army: ArmySummary,
    }
    emit_json(&OptimizeOutput {
        max_points,
        army: ArmySummary::from(&army),
    })
}

fn handle_battle(invocation: &Invocation<'_>, config: &WarbandConfig, catalog: &Catalog) -> i32 {
    let (army_a, army_b) = match optimized_pair(invocation, catalog) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    let mut battle = config.battle;
    if let Some(raw) = invocation.arg(2) {
        match CombatModel::parse(raw) {
            Some(model) => battle.model = model,
            None => tracing::warn!("invalid model '{raw}', defaulting to {:?}", battle.model),
        }
    }
    if let Some(raw) = invocation.arg(3) {
        battle.seed = Some(parse_arg(Some(raw), "seed", battle.seed.unwrap_or(7)));
    }
    battle.distance = parse_arg(invocation.flag_value("distance"), "distance", battle.distance);
    battle.objectives = parse_arg(
        invocation.flag_value("objectives"),
        "objectives",
        battle.objectives,
    );
    battle.round_cap = parse_arg(invocation.flag_value("round-cap"), "round-cap", battle.round_cap);
    let as_csv = invocation.has_flag("csv");
    if as_csv {
        battle.trace_mode = TraceMode::Events;
    }

    let report = resolve_battle(&army_a, &army_b, &battle);

    if as_csv {
        return match round_events_to_csv(&report.events) {
            Ok(csv) => {
                print!("{csv}");
                0
            }
            Err(err) => {
                eprintln!("failed to write round trace: {err}");
                1
            }
        };
    }

    #[derive(Serialize)]
    struct BattleOutput<'a> {
        army_a: ArmySummary,
        army_b: ArmySummary,
        #[serde(flatten)]
        report: &'a BattleReport,
    }
    emit_json(&BattleOutput {
        army_a: ArmySummary::from(&army_a),
        army_b: ArmySummary::from(&army_b),
        report: &report,
    })
}

fn handle_matchup(invocation: &Invocation<'_>, config: &WarbandConfig, catalog: &Catalog) -> i32 {
    let (army_a, army_b) = match optimized_pair(invocation, catalog) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    let mut matchup = config.matchup;
    matchup.iterations = parse_arg(invocation.arg(2), "iterations", matchup.iterations);
    matchup.seed = parse_arg(invocation.arg(3), "seed", matchup.seed);
    matchup.workers = parse_arg(invocation.flag_value("workers"), "workers", matchup.workers);

    let summary = run_matchup(&army_a, &army_b, &matchup);
    emit_json(&summary)
}

fn handle_rank(invocation: &Invocation<'_>, config: &WarbandConfig, catalog: &Catalog) -> i32 {
    let Some(opponent_points) = invocation.arg(0) else {
        eprintln!("usage: warband rank <opponent_points> <budget>...");
        return 2;
    };
    let opponent_points = parse_arg(Some(opponent_points), "opponent_points", 150i64);
    let budgets: Vec<i64> = invocation
        .positional
        .iter()
        .skip(1)
        .filter_map(|raw| match raw.parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid budget '{raw}'");
                None
            }
        })
        .collect();
    if budgets.is_empty() {
        eprintln!("usage: warband rank <opponent_points> <budget>...");
        return 2;
    }

    let opponent = match optimize(catalog.units(), opponent_points) {
        Ok(army) => army,
        Err(err) => {
            eprintln!("optimize failed: {err}");
            return 1;
        }
    };

    let ranked = rank_budgets_with_progress(
        catalog.units(),
        &budgets,
        &opponent,
        &config.matchup,
        |done, total| tracing::info!("ranked {done}/{total} budget(s)"),
    );
    match ranked {
        Ok(ranked) => emit_json(&ranked),
        Err(err) => {
            eprintln!("rank failed: {err}");
            1
        }
    }
}

fn handle_validate(invocation: &Invocation<'_>) -> i32 {
    let Some(path) = invocation.arg(0).or(invocation.flag_value("catalog")) else {
        eprintln!("usage: warband validate <catalog.json|catalog.yaml>");
        return 2;
    };

    match validate_catalog_file(path) {
        Ok(report) if !report.has_errors() => {
            for diagnostic in &report.diagnostics {
                eprintln!("- {diagnostic}");
            }
            println!("validation passed: {path}");
            0
        }
        Ok(report) => {
            eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
            for diagnostic in &report.diagnostics {
                eprintln!("- {diagnostic}");
            }
            1
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

/// Optimal armies for the first two positional budgets.
fn optimized_pair(invocation: &Invocation<'_>, catalog: &Catalog) -> Result<(Army, Army), i32> {
    let points_a = parse_arg(invocation.arg(0), "points_a", 150i64);
    let points_b = parse_arg(invocation.arg(1), "points_b", 150i64);
    let optimize_side = |points: i64| {
        optimize(catalog.units(), points).map_err(|err| {
            eprintln!("optimize failed: {err}");
            1
        })
    };
    Ok((optimize_side(points_a)?, optimize_side(points_b)?))
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

fn parse_arg<T>(raw: Option<&str>, name: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match raw {
        None => default,
        Some(value) => value.parse::<T>().unwrap_or_else(|_| {
            tracing::warn!("invalid {name} '{value}', defaulting to {default}");
            default
        }),
    }
}
