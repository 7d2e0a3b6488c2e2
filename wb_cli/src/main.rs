//! # Weight & Balance CLI
//!
//! Prompt-driven terminal demo for the `wb_core` balance engine. Loads the
//! built-in 777-300ER dataset (or a reference data directory given with
//! `--data <dir>`), takes a simple load plan from stdin, and prints the load
//! summary. `--json` additionally prints the balance trace as JSON.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use wb_core::aircraft::EngineConfig;
use wb_core::engine::BalanceEngine;
use wb_core::{dataset, file_io};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn run() -> Result<(), wb_core::WbError> {
    let args: Vec<String> = std::env::args().collect();
    let json_output = args.iter().any(|a| a == "--json");
    let data_dir = args
        .iter()
        .position(|a| a == "--data")
        .and_then(|i| args.get(i + 1));

    println!("Weight & Balance Calculator - Boeing 777-300ER");
    println!("==============================================");
    println!();

    let data = match data_dir {
        Some(dir) => file_io::load_aircraft_data(Path::new(dir))?,
        None => dataset::boeing_777_300er().clone(),
    };
    let mut engine = BalanceEngine::new(data, EngineConfig::default())?;

    let regs: Vec<String> = engine
        .reference()
        .registrations()
        .map(str::to_string)
        .collect();
    println!("Registrations: {}", regs.join(", "));
    let reg = prompt_str(&format!("Select registration [{}]: ", regs[0]), &regs[0]);
    engine.select_registration(&reg)?;

    let pax_weight = prompt_f64("Passenger weight (kg) [88.5]: ", 88.5);
    let mut config = *engine.config();
    config.passenger_weight_kg = pax_weight;
    engine.set_config(config)?;

    println!();
    let fill_cabin = prompt_str("Fill every seat? [Y/n]: ", "y");
    if fill_cabin.eq_ignore_ascii_case("y") {
        let count = engine.passengers_mut().select_all();
        println!("  {} passengers boarded.", count);
    } else {
        let row = prompt_f64("Board one row, row number [10]: ", 10.0) as u32;
        let count = engine.passengers_mut().select_row(row);
        println!("  {} passengers boarded.", count);
    }

    println!();
    let fill_holds = prompt_str("Load every container position to max? [Y/n]: ", "y");
    if fill_holds.eq_ignore_ascii_case("y") {
        let count = engine.cargo_mut().load_max_all_containers();
        println!("  {} container positions loaded.", count);
    }

    println!();
    println!("Fuel (liters; entries are clamped to tank capacity):");
    let tank_plan: Vec<(String, f64)> = engine
        .fuel()
        .tanks()
        .iter()
        .map(|t| (t.name.clone(), t.max_l))
        .collect();
    for (name, max_l) in tank_plan {
        let liters = prompt_f64(&format!("  {} (max {:.0} L) [0]: ", name, max_l), 0.0);
        if liters > 0.0 {
            engine.fuel_mut().set_liters(&name, liters)?;
        }
    }

    println!();
    print!("{}", engine.summary()?);

    if json_output {
        let trace = engine.build_trace()?;
        println!();
        println!("Balance trace (JSON):");
        match serde_json::to_string_pretty(&trace) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("trace serialization failed: {e}"),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
