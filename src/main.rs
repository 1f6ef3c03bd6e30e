//! home-grid entry point: CLI wiring and config-driven household construction.

use std::path::Path;
use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use home_grid::config::HouseholdConfig;
use home_grid::io::export::export_csv;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    battery_override: Option<i64>,
    report_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("home-grid: household energy management");
    eprintln!();
    eprintln!("Usage: home-grid [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load household from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (demo, empty)");
    eprintln!("  --battery <n>            Override initial battery level (clamped to 0..=100)");
    eprintln!("  --report-out <path>      Export the device inventory to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Open the interactive dashboard");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the demo preset is used.");
    eprintln!("Set RUST_LOG to adjust log verbosity (default: info).");
}

/// Returns the value following a flag, or exits with an error.
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str, what: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        battery_override: None,
        report_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
        #[cfg(feature = "tui")]
        tui: false,
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
                cli.scenario_path = Some(flag_value(&args, i, "--scenario", "a path argument").to_string());
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(flag_value(&args, i, "--preset", "a name argument").to_string());
            }
            "--battery" => {
                i += 1;
                let raw = flag_value(&args, i, "--battery", "an integer argument");
                if let Ok(level) = raw.parse::<i64>() {
                    cli.battery_override = Some(level);
                } else {
                    eprintln!("error: --battery value \"{raw}\" is not a valid integer");
                    process::exit(1);
                }
            }
            "--report-out" => {
                i += 1;
                cli.report_out = Some(flag_value(&args, i, "--report-out", "a path argument").to_string());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = flag_value(&args, i, "--port", "a u16 argument");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = parse_args();
    init_tracing();

    // Load config: --scenario takes priority, then --preset, then demo default
    let mut config = if let Some(ref path) = cli.scenario_path {
        match HouseholdConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match HouseholdConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        HouseholdConfig::demo()
    };

    if let Some(level) = cli.battery_override {
        config.battery.initial_level = level;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    if config.battery_out_of_range() {
        warn!(
            requested = config.battery.initial_level,
            "initial battery level outside 0..=100, clamping"
        );
    }

    #[cfg_attr(not(feature = "tui"), expect(unused_mut))]
    let mut household = match config.build() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    info!(
        zones = household.zones().len(),
        battery = household.battery_level(),
        "household ready"
    );

    #[cfg(feature = "tui")]
    if cli.tui {
        household = match home_grid::tui::run(household) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("error: TUI crashed: {e}");
                process::exit(1);
            }
        };
    }

    // Print state and estimates
    println!("{}", household.snapshot());
    println!("{}", household.report());

    // Export CSV if requested
    if let Some(ref path) = cli.report_out {
        if let Err(e) = export_csv(&household.snapshot(), Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(%path, "device report written");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;

        let state = home_grid::api::AppState::new(household);
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(home_grid::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
