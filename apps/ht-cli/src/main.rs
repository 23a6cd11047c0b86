use clap::{Parser, Subcommand};
use ht_config::{CaseConfig, ConfigError, FieldStore};
use ht_core::units::constants::T_ZERO_C;
use ht_core::units::{k, pa};
use ht_mesh::VolField;
use ht_thermo::{
    BasicThermo, ClampReport, FluidRhoThermo, HumidityRhoThermo, HumidityThermo, MoistAir, Region,
    RhoThermo, SaturationMethod, ThermoError, humidity_rho_thermo, resolve_phase, rho_thermo,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uom::si::mass_density::kilogram_per_cubic_meter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ht-cli")]
#[command(about = "humitherm CLI - humid-air thermophysical properties on a mesh", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax and structure
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Build the configured model and print derived properties
    Run {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Phase to build (default phase if omitted)
        #[arg(long)]
        phase: Option<String>,
        /// Shift every temperature by this many kelvin and correct again
        #[arg(long)]
        t_offset: Option<f64>,
    },
    /// Write every field of the model, keyed by persisted name
    Export {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Phase to build (default phase if omitted)
        #[arg(long)]
        phase: Option<String>,
        /// Output file (`.json` or YAML); stdout as JSON if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List registered model types
    Models,
}

/// A built model, humid or dry.
enum Model {
    Humid(Box<dyn HumidityRhoThermo>),
    Dry(Box<dyn FluidRhoThermo>),
}

impl Model {
    fn build(region: &Region, phase: Option<&str>) -> CliResult<Self> {
        let tag = region.model_type(resolve_phase(phase))?;
        if humidity_rho_thermo::table().contains(tag) {
            Ok(Model::Humid(humidity_rho_thermo::new(region, phase)?))
        } else {
            Ok(Model::Dry(rho_thermo::new(region, phase)?))
        }
    }

    /// Shift T by `dt` kelvin and re-derive, keeping the current density as old-time.
    fn shift_temperature(&mut self, dt: f64) -> ClampReport {
        match self {
            Model::Humid(m) => shift(m.as_mut(), dt),
            Model::Dry(m) => shift(m.as_mut(), dt),
        }
    }

    fn snapshot(&self) -> FieldStore {
        match self {
            Model::Humid(m) => m.snapshot(),
            Model::Dry(m) => m.snapshot(),
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Run {
            case_path,
            phase,
            t_offset,
        } => cmd_run(&case_path, phase.as_deref(), t_offset),
        Commands::Export {
            case_path,
            phase,
            output,
        } => cmd_export(&case_path, phase.as_deref(), output.as_deref()),
        Commands::Models => {
            cmd_models();
            Ok(())
        }
    }
}

fn load_region(case_path: &Path) -> CliResult<Region> {
    let case: CaseConfig = ht_config::load(case_path)?;
    info!(case = %case.name, path = %case_path.display(), "loaded case");
    Ok(Region::from_case(case)?)
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    let region = load_region(case_path)?;
    let mesh = region.mesh();
    println!("✓ Case is valid");
    println!("  Cells: {}", mesh.n_cells());
    println!("  Patches: {}", mesh.patches().len());
    for phase in region.case().phase_names() {
        let label = if phase.is_empty() { "(default)" } else { phase };
        let tag = region.model_type(phase).unwrap_or("<no type>");
        println!("  Phase {label}: {tag}");
    }
    Ok(())
}

fn cmd_run(case_path: &Path, phase: Option<&str>, t_offset: Option<f64>) -> CliResult<()> {
    let region = load_region(case_path)?;
    let mut model = Model::build(&region, phase)?;
    let air = MoistAir::from_def(&region.thermo_dict(resolve_phase(phase))?.mixture)?;

    if let Some(dt) = t_offset {
        let report = model.shift_temperature(dt);
        println!("Shifted T by {dt} K");
        print_clamp_report(&report);
    }

    match &model {
        Model::Humid(m) => {
            println!("Model: {} (method {})", m.type_name(), m.method());
            print_stats("T [°C]", &celsius(m.t()));
            print_stats("p [Pa]", m.p());
            print_stats("rho [kg/m³]", m.rho());
            print_stats("psi [s²/m²]", m.psi());
            print_stats("mu [Pa·s]", m.mu());
            print_stats("relHum [-]", m.relative_humidity());
            print_stats("q [kg/kg]", m.specific_humidity());
            print_stats("q max [kg/kg]", m.max_specific_humidity());
            print_stats("pSat [Pa]", m.p_sat_h2o());
            print_stats("pH2O [Pa]", m.partial_pressure_h2o());
            let total: f64 = m.water_mass().internal().iter().sum();
            println!("  {:<16} {total:.6e} kg", "water mass");
            print_mean_density(&air, m.t(), m.p(), m.specific_humidity().stats().mean);
        }
        Model::Dry(m) => {
            println!("Model: {}", m.type_name());
            print_stats("T [°C]", &celsius(m.t()));
            print_stats("p [Pa]", m.p());
            print_stats("rho [kg/m³]", m.rho());
            print_stats("psi [s²/m²]", m.psi());
            print_stats("mu [Pa·s]", m.mu());
            print_mean_density(&air, m.t(), m.p(), 0.0);
        }
    }
    Ok(())
}

fn cmd_export(case_path: &Path, phase: Option<&str>, output: Option<&Path>) -> CliResult<()> {
    let region = load_region(case_path)?;
    let store = Model::build(&region, phase)?.snapshot();

    match output {
        Some(path) => {
            let content = match path.extension().and_then(|e| e.to_str()) {
                Some("json") => serde_json::to_string_pretty(&store)?,
                _ => serde_yaml::to_string(&store)?,
            };
            std::fs::write(path, content)?;
            println!("✓ Exported {} fields to {}", store.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&store)?),
    }
    Ok(())
}

fn cmd_models() {
    println!("{}:", humidity_rho_thermo::FAMILY);
    for tag in humidity_rho_thermo::table().tags() {
        println!("  {tag}");
    }
    println!("{}:", rho_thermo::FAMILY);
    for tag in rho_thermo::table().tags() {
        println!("  {tag}");
    }
    println!("methods:");
    for method in SaturationMethod::ALL {
        println!("  {method}");
    }
}

fn shift<M: BasicThermo + ?Sized>(model: &mut M, dt: f64) -> ClampReport {
    model.store_old_time();
    model.t_mut().apply(|t| t + dt);
    model.correct()
}

fn celsius(t: &VolField) -> VolField {
    let mut c = t.derived("T");
    c.set_values(t.values().map(|t| t - T_ZERO_C));
    c
}

fn print_stats(label: &str, field: &VolField) {
    let s = field.stats();
    println!(
        "  {label:<16} min {:>12.5e}  mean {:>12.5e}  max {:>12.5e}",
        s.min, s.mean, s.max
    );
}

/// Density of the mixture at the mean T, p and q, for comparison with `rho`.
fn print_mean_density(air: &MoistAir, t: &VolField, p: &VolField, q: f64) {
    let rho = air.density(k(t.stats().mean), pa(p.stats().mean), q);
    println!(
        "  {:<16} {:.5e} kg/m³",
        "rho(mean state)",
        rho.get::<kilogram_per_cubic_meter>()
    );
}

fn print_clamp_report(report: &ClampReport) {
    if report.is_clean() {
        println!("  No values clamped");
        return;
    }
    println!("  Clamped values: {}", report.total());
    println!("    temperature:       {}", report.temperature);
    println!("    pressure:          {}", report.pressure);
    println!("    specific humidity: {}", report.specific_humidity);
    println!("    partial pressure:  {}", report.partial_pressure);
    println!("    water vapour:      {}", report.water_vapor);
    println!("    relative humidity: {}", report.relative_humidity);
}
