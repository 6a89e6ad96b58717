//! # nsr CLI
//!
//! Command-line front end for the NSR-10 column engine.
//!
//! ```text
//! nsr surface --width-cm 40 --depth-cm 50 --bar '#6' --nx 3 --ny 1
//! nsr surface --input column.json --json
//! nsr combos --f1 0.5 --vertical --aa 0.25 --fa 1.3 --loads c1_loads.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use nsr_core::calculations::{
    generate_interaction_surface, ColumnInput, InteractionSurface, SteelRatioLimits, SurfaceResponse, SweepOptions,
};
use nsr_core::errors::CalcError;
use nsr_core::loads::{
    nsr10_service_combinations, nsr10_ultimate_combinations, ColumnLoadCase, LoadCombination,
    SeismicCombinationOptions,
};
use nsr_core::materials::RebarSize;
use nsr_core::project::GlobalSettings;

#[derive(Debug, Parser)]
#[command(name = "nsr", version, about = "NSR-10 column interaction surfaces")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the biaxial interaction surface of a rectangular column
    Surface(SurfaceArgs),

    /// List NSR-10 load combinations, optionally factoring column actions
    Combos(CombosArgs),
}

#[derive(Debug, Args)]
struct SurfaceArgs {
    /// JSON file holding a column input; replaces the geometry flags
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value = "C-1")]
    label: String,

    /// Section width b (cm)
    #[arg(long, default_value_t = 40.0)]
    width_cm: f64,

    /// Section depth h (cm)
    #[arg(long, default_value_t = 50.0)]
    depth_cm: f64,

    /// Clear cover to the stirrup (cm)
    #[arg(long, default_value_t = 4.0)]
    cover_cm: f64,

    /// Stirrup size (#3 to #10)
    #[arg(long, default_value = "#3")]
    stirrup: RebarSize,

    /// Longitudinal bar size (#3 to #10)
    #[arg(long, default_value = "#6")]
    bar: RebarSize,

    /// Bars on the faces parallel to b, corners included
    #[arg(long, default_value_t = 3)]
    nx: u32,

    /// Intermediate bars on the faces parallel to h
    #[arg(long, default_value_t = 1)]
    ny: u32,

    /// Concrete strength f'c (MPa)
    #[arg(long, default_value_t = 28.0)]
    fc: f64,

    /// Steel yield strength fy (MPa)
    #[arg(long, default_value_t = 420.0)]
    fy: f64,

    /// Neutral-axis depth samples
    #[arg(long, default_value_t = 30)]
    c_steps: usize,

    /// Neutral-axis orientation samples
    #[arg(long, default_value_t = 36)]
    theta_steps: usize,

    /// Axis-aligned block without displaced-concrete deduction
    #[arg(long)]
    legacy: bool,

    /// Keep net-tension points
    #[arg(long)]
    include_tension: bool,

    /// Drop points above 0.80·φ·Po
    #[arg(long)]
    axial_cap: bool,

    /// Evaluate samples in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the full status-tagged JSON response
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CombosArgs {
    /// Leave out the seismic combinations
    #[arg(long)]
    no_seismic: bool,

    /// Live-load factor f1 in seismic combinations
    #[arg(long, default_value_t = nsr_core::loads::F1_RESIDENTIAL)]
    f1: f64,

    /// Include the vertical seismic component Ev = 0.5·Aa·Fa·D
    #[arg(long)]
    vertical: bool,

    /// Effective peak acceleration coefficient Aa
    #[arg(long, default_value_t = 0.0)]
    aa: f64,

    /// Short-period site coefficient Fa
    #[arg(long, default_value_t = 1.0)]
    fa: f64,

    /// JSON file with service actions of one column, factored per combination
    #[arg(long)]
    loads: Option<PathBuf>,

    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Command::Surface(args) => run_surface(&args),
        Command::Combos(args) => run_combos(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CalcError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CalcError::invalid_input("input", path.display().to_string(), format!("Cannot read file: {e}"))
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn column_input(args: &SurfaceArgs) -> Result<ColumnInput, CalcError> {
    if let Some(path) = &args.input {
        tracing::info!(path = %path.display(), "reading column input");
        return read_json(path);
    }

    let settings = GlobalSettings::default();
    let mut column = settings.new_column(args.label.clone(), args.width_cm, args.depth_cm, args.nx, args.ny);
    column.clear_cover_cm = args.cover_cm;
    column.stirrup_diameter_mm = args.stirrup.diameter_mm();
    column.bar_diameter_mm = args.bar.diameter_mm();
    column.fc_mpa = args.fc;
    column.fy_mpa = args.fy;
    column.num_c_steps = args.c_steps;
    column.num_theta_steps = args.theta_steps;
    Ok(column)
}

fn sweep_options(args: &SurfaceArgs) -> SweepOptions {
    let base = if args.legacy {
        SweepOptions::legacy()
    } else {
        SweepOptions::default()
    };
    SweepOptions {
        include_tension: args.include_tension,
        enforce_axial_cap: args.axial_cap,
        parallel: args.parallel,
        ..base
    }
}

fn run_surface(args: &SurfaceArgs) -> Result<(), CalcError> {
    let column = column_input(args)?;
    let options = sweep_options(args);
    let result = generate_interaction_surface(&column, &options);

    if args.json {
        let response = SurfaceResponse::from(result.clone());
        println!("{}", serde_json::to_string_pretty(&response)?);
        return result.map(|_| ());
    }

    let surface = result?;
    print_surface(&column, &surface, &options);
    Ok(())
}

fn print_surface(column: &ColumnInput, surface: &InteractionSurface, options: &SweepOptions) {
    let params = &surface.params;
    let summary = surface.summary();

    println!("═══════════════════════════════════════");
    println!("  COLUMN {} - INTERACTION SURFACE", column.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Section:");
    println!("  b x h:    {:.0} x {:.0} cm", params.width_cm, params.depth_cm);
    println!("  Cover:    {:.1} cm (stirrup Ø{:.1} mm)", params.clear_cover_cm, params.stirrup_diameter_mm);
    println!("  f'c:      {:.1} MPa   β1 = {:.3}", params.fc_mpa, params.beta1);
    println!("  fy:       {:.0} MPa", params.fy_mpa);
    println!();
    println!("Reinforcement:");
    println!(
        "  Bars:     {} x Ø{:.1} mm ({} per face x, {} interior per face y)",
        params.bar_count, params.bar_diameter_mm, params.bars_per_face_x, params.bars_per_face_y_interior
    );
    println!("  As:       {:.2} cm²", summary.total_steel_area_cm2);
    println!("  ρg:       {}", steel_ratio_line(params.steel_ratio, &options.ratio_limits));
    println!();
    println!("Capacity:");
    println!("  Po        = {:.0} kN", params.po_n / 1000.0);
    println!("  φPn,max   = {:.0} kN", params.phi_pn_max_n / 1000.0);
    println!("  max φPn   = {:.0} kN", summary.max_axial_kn);
    println!("  max φMnx  = {:.1} kN·m", summary.max_moment_x_knm);
    println!("  max φMny  = {:.1} kN·m", summary.max_moment_y_knm);
    println!("  φ range   = {:.2} to {:.2}", summary.min_phi, summary.max_phi);
    println!();
    println!("═══════════════════════════════════════");
    println!("  {}", surface.message);
    println!("═══════════════════════════════════════");
}

fn run_combos(args: &CombosArgs) -> Result<(), CalcError> {
    let seismic = SeismicCombinationOptions {
        include_seismic: !args.no_seismic,
        live_factor: args.f1,
        include_vertical: args.vertical,
        aa: args.aa,
        fa: args.fa,
    };
    let service = nsr10_service_combinations();
    let ultimate = nsr10_ultimate_combinations(&seismic);

    let loads: Option<ColumnLoadCase> = match &args.loads {
        Some(path) => {
            let case: ColumnLoadCase = read_json(path)?;
            case.validate()?;
            Some(case)
        }
        None => None,
    };

    if args.json {
        let mut value = serde_json::json!({ "service": service, "ultimate": ultimate });
        if let Some(case) = &loads {
            value["factored"] = serde_json::to_value(case.factored_all(&ultimate))?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_combinations("SERVICE (B.2.3)", &service);
    print_combinations("ULTIMATE (B.2.4 / A.3.5.1)", &ultimate);

    if let Some(case) = &loads {
        println!("Factored actions - {}:", case.label);
        for (name, action) in case.factored_all(&ultimate) {
            println!(
                "  {:<6} Pu = {:>9.1} kN   Mux = {:>8.1} kN·m   Muy = {:>8.1} kN·m",
                name, action.axial_kn, action.moment_x_knm, action.moment_y_knm
            );
        }
        println!();
    }
    Ok(())
}

fn print_combinations(title: &str, combos: &[LoadCombination]) {
    println!("{title}:");
    for combo in combos {
        println!("  {:<6} {}", combo.name, combo.equation);
    }
    println!();
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {e}");
    eprintln!("Hint:  {}", e.hint());
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{json}");
    }
}

/// Ratio together with the band the sweep actually enforced.
fn steel_ratio_line(ratio: f64, limits: &SteelRatioLimits) -> String {
    format!("{ratio:.4} (permitted {:.4} to {:.4})", limits.min, limits.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_surface_flags_build_input() {
        let cli = Cli::parse_from(["nsr", "surface", "--width-cm", "30", "--bar", "#5", "--nx", "2", "--ny", "0"]);
        let Command::Surface(args) = cli.command else {
            panic!("expected surface command");
        };
        let column = column_input(&args).unwrap();
        assert_eq!(column.width_cm, 30.0);
        assert_eq!(column.bar_diameter_mm, 15.9);
        assert_eq!(column.nominal_bar_count(), 4);
        assert_eq!(sweep_options(&args), SweepOptions::default());
    }

    #[test]
    fn test_legacy_flag() {
        let cli = Cli::parse_from(["nsr", "surface", "--legacy", "--parallel"]);
        let Command::Surface(args) = cli.command else {
            panic!("expected surface command");
        };
        let options = sweep_options(&args);
        assert!(!options.deduct_displaced_concrete);
        assert!(options.parallel);
    }

    #[test]
    fn test_ratio_line_uses_applied_limits() {
        let limits = SteelRatioLimits { min: 0.005, max: 0.08 };
        assert_eq!(steel_ratio_line(0.0254, &limits), "0.0254 (permitted 0.0050 to 0.0800)");
        assert_eq!(
            steel_ratio_line(0.0254, &SteelRatioLimits::default()),
            "0.0254 (permitted 0.0100 to 0.0600)"
        );
    }

    #[test]
    fn test_rejects_unknown_bar() {
        assert!(Cli::try_parse_from(["nsr", "surface", "--bar", "#12"]).is_err());
    }
}
