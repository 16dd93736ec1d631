//! bess-sched entry point — CLI wiring and config-driven schedule runs.

use std::path::Path;
use std::process;

use bess_sched::config::ScenarioConfig;
use bess_sched::io::export::export_csv;
use bess_sched::profile::{LoadProfile, PriceProfile, PvProfile};
use bess_sched::sched::{HourlyInputs, ScheduleSummary, schedule_with_policy};

/// Seed offsets so the three generators draw uncorrelated noise streams.
const LOAD_SEED_OFFSET: u64 = 11;
const PV_SEED_OFFSET: u64 = 23;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    telemetry_out: Option<String>,
    #[cfg(feature = "plot")]
    plot_out: Option<String>,
}

fn print_help() {
    eprintln!("bess-sched — hourly battery dispatch scheduling against spot prices");
    eprintln!();
    eprintln!("Usage: bess-sched [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, high_solar, volatile)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --telemetry-out <path>   Export hourly schedule to CSV");
    #[cfg(feature = "plot")]
    eprintln!("  --plot-out <path>        Render schedule chart to PNG");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        telemetry_out: None,
        #[cfg(feature = "plot")]
        plot_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            #[cfg(feature = "plot")]
            "--plot-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --plot-out requires a path argument");
                    process::exit(1);
                }
                cli.plot_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Generates the three forecast series from the scenario's profile sections.
fn build_inputs(cfg: &ScenarioConfig) -> HourlyInputs {
    let hours = cfg.simulation.hours;
    let seed = cfg.simulation.seed;

    let p = &cfg.price;
    let mut price = PriceProfile::new(
        p.base,
        p.morning_amp,
        p.morning_hour,
        p.evening_amp,
        p.evening_hour,
        p.peak_width_hours,
        p.noise_std,
        seed,
    );

    let l = &cfg.load;
    let mut load = LoadProfile::new(
        l.base_kwh,
        l.amp_kwh,
        l.phase_rad,
        l.noise_std,
        seed.wrapping_add(LOAD_SEED_OFFSET),
    );

    let s = &cfg.solar;
    let mut pv = PvProfile::new(
        s.kwh_peak,
        s.sunrise_hour,
        s.sunset_hour,
        s.noise_std,
        seed.wrapping_add(PV_SEED_OFFSET),
    );

    HourlyInputs::new(
        price.generate(hours),
        load.generate(hours),
        pv.generate(hours),
    )
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Generate inputs and run the scheduler
    let inputs = build_inputs(&scenario);
    let battery = scenario.battery.spec();
    let result = schedule_with_policy(
        &battery,
        &inputs,
        scenario.battery.initial_soc_percent,
        &scenario.policy.policy(),
    );
    let plan = match result {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    // Print per-hour records
    let records = plan.records(&inputs);
    for r in &records {
        println!("{r}");
    }

    // Print the summary
    let summary = ScheduleSummary::from_records(&records, &battery);
    println!("\n{summary}");

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }

    // Render chart if requested
    #[cfg(feature = "plot")]
    if let Some(ref path) = cli.plot_out {
        if let Err(e) = bess_sched::io::plot::render_schedule_png(&inputs, &plan, Path::new(path)) {
            eprintln!("error: failed to render chart: {e}");
            process::exit(1);
        }
        eprintln!("Chart written to {path}");
    }
}
