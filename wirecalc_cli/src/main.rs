//! # Wirecalc CLI Application
//!
//! Terminal front end for the calculation engine. Each subcommand reads its
//! fields from the command line (or prompts for them in `interactive`
//! mode), calls into `wirecalc_core` and prints the result.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn, Level};

use wirecalc_core::calculations::cable::{
    parse_standard_voltage, size_cable, standard_voltages, Load, SizingRequest, SizingResult,
    SystemType, VoltageSelection,
};
use wirecalc_core::calculations::ohms_law::{self, OhmsLawInput};
use wirecalc_core::calculations::speaker_delay::{self, Dimension, SpeakerDelayInput};
use wirecalc_core::calculations::{CalculationItem, CalculationOutput};
use wirecalc_core::materials::ConductorMaterial;
use wirecalc_core::parsing::parse_decimal;
use wirecalc_core::units::{Kilowatts, Watts};
use wirecalc_core::{CalcError, CalcResult, Settings};

#[derive(Parser)]
#[command(name = "wirecalc")]
#[command(about = "Wirecalc - cable sizing and small electrical calculators", long_about = None)]
struct Cli {
    /// Settings file (JSON) with default power factor, voltage drop and speed of sound
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a cable run
    Cable(CableArgs),
    /// Resistance and power from voltage and current
    Ohm {
        /// Voltage (V)
        #[arg(allow_negative_numbers = true)]
        voltage: String,
        /// Current (A)
        #[arg(allow_negative_numbers = true)]
        current: String,
    },
    /// Loudspeaker delay from its offset in centimeters
    Delay {
        /// Offset along X (cm)
        #[arg(short)]
        x: String,
        /// Offset along Y (cm); makes the calculation two-dimensional
        #[arg(short)]
        y: Option<String>,
        /// Offset along Z (cm); makes the calculation three-dimensional
        #[arg(short, requires = "y")]
        z: Option<String>,
    },
    /// Evaluate calculations described in a JSON file (one item or an array)
    Eval {
        /// Path to the JSON file
        path: PathBuf,
    },
    /// List the standard voltages per system type
    Voltages,
    /// Size a cable run by answering prompts
    Interactive,
}

#[derive(Args)]
struct CableArgs {
    /// One-way cable length (m)
    #[arg(short, long)]
    length: String,

    /// System type: single-phase, three-phase or dc
    #[arg(short, long)]
    system: String,

    /// Conductor material: copper or aluminum
    #[arg(short, long, default_value = "copper")]
    material: String,

    /// Voltage: a standard label such as 230V, or a custom value in volts
    #[arg(short = 'u', long)]
    voltage: String,

    #[command(flatten)]
    load: LoadArgs,

    /// Power factor cos φ (defaults to the configured value)
    #[arg(long)]
    power_factor: Option<String>,

    /// Allowed voltage drop in volts (defaults to the configured value)
    #[arg(long)]
    voltage_drop: Option<String>,

    /// Label shown in logs and JSON output
    #[arg(long, default_value = "")]
    label: String,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct LoadArgs {
    /// Load current (A)
    #[arg(long)]
    amps: Option<String>,

    /// Load power (W)
    #[arg(long)]
    watts: Option<String>,

    /// Load power (kW)
    #[arg(long)]
    kilowatts: Option<String>,
}

impl LoadArgs {
    fn to_load(&self) -> CalcResult<Load> {
        if let Some(amps) = &self.amps {
            return Ok(Load::Amps(parse_decimal("amps", amps)?));
        }
        if let Some(watts) = &self.watts {
            return Ok(Load::Watts(parse_decimal("watts", watts)?));
        }
        if let Some(kw) = &self.kilowatts {
            let watts: Watts = Kilowatts(parse_decimal("kilowatts", kw)?).into();
            return Ok(Load::Watts(watts.value()));
        }
        Err(CalcError::invalid_input("load", "", "Give --amps, --watts or --kilowatts"))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            warn!(code = e.error_code(), "calculation rejected");
            eprintln!("Error: {}", e);
            if e.is_input_error() {
                eprintln!("Invalid input. Please check your entries and try again.");
            }
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> CalcResult<Settings> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading settings");
            Settings::load(path)
        }
        None => Ok(Settings::default()),
    }
}

fn run(cli: &Cli) -> CalcResult<()> {
    let settings = load_settings(cli.config.as_deref())?;

    match &cli.command {
        Commands::Cable(args) => {
            let request = cable_request(args, &settings)?;
            let result = size_cable(&request)?;
            if cli.json {
                print_json(&result)
            } else {
                print_cable_report(&request, &result);
                Ok(())
            }
        }
        Commands::Ohm { voltage, current } => {
            let input = OhmsLawInput::new(
                parse_decimal("voltage", voltage)?,
                parse_decimal("current", current)?,
            );
            let result = ohms_law::calculate(&input)?;
            if cli.json {
                print_json(&result)
            } else {
                println!("{}", result.summary());
                println!("Power:  {:.2} W", result.power_w);
                Ok(())
            }
        }
        Commands::Delay { x, y, z } => {
            let x_cm = parse_decimal("x", x)?;
            let y_cm = y.as_deref().map(|v| parse_decimal("y", v)).transpose()?;
            let z_cm = z.as_deref().map(|v| parse_decimal("z", v)).transpose()?;
            let dimension = match (y_cm, z_cm) {
                (None, _) => Dimension::OneDimensional,
                (Some(_), None) => Dimension::TwoDimensional,
                (Some(_), Some(_)) => Dimension::ThreeDimensional,
            };
            let input = SpeakerDelayInput::new(
                dimension,
                x_cm,
                y_cm.unwrap_or(0.0),
                z_cm.unwrap_or(0.0),
            );
            let result = speaker_delay::calculate(&input, &settings.acoustics)?;
            if cli.json {
                print_json(&result)
            } else {
                println!("Distance: {:.1} cm", result.distance_cm);
                println!("{}", result.summary());
                Ok(())
            }
        }
        Commands::Eval { path } => {
            let items = read_items(path)?;
            let outputs = items
                .iter()
                .map(|item| {
                    info!(kind = item.calc_type(), label = item.label(), "evaluating");
                    item.evaluate(&settings)
                })
                .collect::<CalcResult<Vec<CalculationOutput>>>()?;
            if cli.json {
                print_json(&outputs)
            } else {
                for (item, output) in items.iter().zip(&outputs) {
                    let label = if item.label().is_empty() { item.calc_type() } else { item.label() };
                    println!("{:<20} {}", label, output.summary());
                }
                Ok(())
            }
        }
        Commands::Voltages => {
            for system in SystemType::ALL {
                println!("{:<16} {}", system.display_name(), standard_voltages(system).join(", "));
            }
            Ok(())
        }
        Commands::Interactive => run_interactive(&settings, cli.json),
    }
}

fn cable_request(args: &CableArgs, settings: &Settings) -> CalcResult<SizingRequest> {
    let system: SystemType = args.system.parse()?;
    let material: ConductorMaterial = args.material.parse()?;
    let voltage = parse_voltage(&args.voltage)?;
    let length = parse_decimal("length", &args.length)?;

    let mut request = SizingRequest::new(length, system, material, voltage, args.load.to_load()?)
        .with_defaults(&settings.sizing)
        .with_label(args.label.clone());
    if let Some(pf) = &args.power_factor {
        request = request.with_power_factor(parse_decimal("power_factor", pf)?);
    }
    if let Some(drop) = &args.voltage_drop {
        request = request.with_allowed_voltage_drop(parse_decimal("voltage_drop", drop)?);
    }
    Ok(request)
}

/// A standard label like "400V", otherwise a custom value with optional "V".
fn parse_voltage(text: &str) -> CalcResult<f64> {
    let text = text.trim();
    let selection = if parse_standard_voltage(text).is_ok() {
        VoltageSelection::Standard(text.to_string())
    } else {
        VoltageSelection::Custom(parse_decimal("voltage", text.trim_end_matches(['V', 'v']))?)
    };
    selection.resolve()
}

fn read_items(path: &Path) -> CalcResult<Vec<CalculationItem>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let value: serde_json::Value = serde_json::from_str(&contents)?;
    let items = if value.is_array() {
        serde_json::from_value::<Vec<CalculationItem>>(value)?
    } else {
        vec![serde_json::from_value::<CalculationItem>(value)?]
    };
    Ok(items)
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_cable_report(request: &SizingRequest, result: &SizingResult) {
    println!("═══════════════════════════════════════");
    println!("  CABLE SIZING RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Length:   {:.1} m", request.length_m);
    println!("  System:   {}", request.system_type);
    println!("  Material: {}", request.material);
    println!("  Voltage:  {:.0} V", request.voltage_v);
    println!("  Load:     {:.2} A ({:.0} W)", result.current_a, result.power_w);
    println!("  cos φ:    {:.2}", request.power_factor);
    println!("  ΔU max:   {:.2} V", request.allowed_voltage_drop_v);
    println!();
    println!("Result:");
    println!("  Cross-section:   {:.2} mm²", result.cross_section_mm2);
    println!("  Standard wiring: {}", result.recommended_gauge);
    println!("  Power loss:      {:.2} W ({:.2} %)", result.power_loss_w, result.loss_percent());
    println!("═══════════════════════════════════════");
    println!("{}", result.summary());
}

fn prompt_line(prompt: &str, default: &str) -> String {
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

fn run_interactive(settings: &Settings, json: bool) -> CalcResult<()> {
    println!("Wirecalc - Cable Cross-Section Calculator");
    println!("=========================================");
    println!();

    let length = parse_decimal("length", &prompt_line("Cable length (m) [25]: ", "25"))?;
    let system: SystemType =
        prompt_line("System (single-phase / three-phase / dc) [single-phase]: ", "single-phase")
            .parse()?;
    let material: ConductorMaterial =
        prompt_line("Material (copper / aluminum) [copper]: ", "copper").parse()?;

    let choices = standard_voltages(system);
    let default_voltage = choices.first().copied().unwrap_or("230V");
    let voltage = parse_voltage(&prompt_line(
        &format!("Voltage ({} or a custom value) [{}]: ", choices.join(" / "), default_voltage),
        default_voltage,
    ))?;

    let load = match prompt_line("Enter load as (a)mperes or (w)atts [a]: ", "a").as_str() {
        "w" | "W" => Load::Watts(parse_decimal("watts", &prompt_line("Load power (W) [1000]: ", "1000"))?),
        _ => Load::Amps(parse_decimal("amps", &prompt_line("Load current (A) [16]: ", "16"))?),
    };

    let request = SizingRequest::new(length, system, material, voltage, load)
        .with_defaults(&settings.sizing);
    let result = size_cable(&request)?;

    println!();
    if json {
        print_json(&result)
    } else {
        print_cable_report(&request, &result);
        Ok(())
    }
}
