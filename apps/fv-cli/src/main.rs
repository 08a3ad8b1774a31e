use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use fv_app::{AppResult, PlotTiming, Selection, component_options, plot, time_options};
use fv_model::{ExampleKey, ModelSource, save_model};

#[derive(Parser)]
#[command(name = "fv-cli")]
#[command(about = "FieldView CLI - plot simulation result fields over their mesh", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in example models
    Examples,
    /// Print a model summary
    Describe {
        /// Example key or path to a model file (.yaml, .yml, .json)
        source: ModelSource,
    },
    /// List available results and time sets
    Results {
        /// Example key or path to a model file
        source: ModelSource,
    },
    /// Project one result onto the mesh and report its range
    Plot {
        /// Example key or path to a model file
        source: ModelSource,
        /// Result name (defaults to the first available result)
        #[arg(short, long)]
        result: Option<String>,
        /// Zero-based time/frequency index (defaults to the last set)
        #[arg(short, long)]
        time: Option<usize>,
        /// Component index for multi-component results
        #[arg(short, long)]
        component: Option<usize>,
        /// Write the mesh state as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a built-in example as a model file
    ExportModel {
        /// Example key
        example: ExampleKey,
        /// Output path; the extension picks YAML or JSON
        path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Examples => cmd_examples(),
        Commands::Describe { source } => cmd_describe(&source),
        Commands::Results { source } => cmd_results(&source),
        Commands::Plot {
            source,
            result,
            time,
            component,
            output,
        } => cmd_plot(source, result, time, component, output.as_deref()),
        Commands::ExportModel { example, path } => cmd_export_model(example, &path),
    }
}

fn cmd_examples() -> AppResult<()> {
    println!("Built-in examples:");
    for key in ExampleKey::ALL {
        println!("  {:<16}{}", key.as_str(), key.description());
    }
    Ok(())
}

fn cmd_describe(source: &ModelSource) -> AppResult<()> {
    let model = source.load()?;
    print!("{}", model);
    Ok(())
}

fn cmd_results(source: &ModelSource) -> AppResult<()> {
    let model = source.load()?;
    let info = model.result_info();

    if info.available_results.is_empty() {
        println!("No results in model {}", model.name());
        return Ok(());
    }

    println!("Results in {}:", model.name());
    for r in &info.available_results {
        let comps = component_options(r);
        println!(
            "  {:<24} {:<16} {} component{} ({}) [{}]",
            r.name,
            r.location,
            r.n_components,
            if r.n_components == 1 { "" } else { "s" },
            if comps.disabled { "fixed" } else { "selectable" },
            r.operator_name
        );
    }

    let times = time_options(&model);
    println!(
        "Time sets ({}): {}",
        model.time_freq_support().unit,
        times.options.len()
    );
    for opt in &times.options {
        println!("  [{}] {}", opt.value, opt.label);
    }
    Ok(())
}

fn cmd_plot(
    source: ModelSource,
    result: Option<String>,
    time: Option<usize>,
    component: Option<usize>,
    output: Option<&Path>,
) -> AppResult<()> {
    let model = source.load()?;
    let selection = Selection {
        source: Some(source),
        result_name: result,
        component,
        time_index: time,
    }
    .with_defaults(&model);
    let resolved = selection.resolve(&model)?;

    println!(
        "Plotting {} (component {}) at time set {} of {}",
        resolved.result.name,
        resolved.component,
        resolved.time_set(),
        model.time_freq_support().n_sets()
    );

    let response = plot(&model, &resolved)?;

    println!("✓ Attribute: {}", response.attribute_name);
    println!("  Location: {}", response.location);
    let missing = response.values().iter().filter(|v| v.is_nan()).count();
    println!(
        "  Entities: {} ({} without data)",
        response.values().len(),
        missing
    );
    println!(
        "  Range: [{}, {}]",
        response.range.min, response.range.max
    );
    println!();
    print!("{}", response.summary);

    print_timing(&response.timing);

    if let Some(path) = output {
        response.mesh_state.write_json(path)?;
        println!("✓ Mesh state written to {}", path.display());
    }

    Ok(())
}

fn print_timing(timing: &PlotTiming) {
    println!(
        "  Timing: evaluate {:.3} ms, project {:.3} ms, total {:.3} ms",
        timing.evaluate_s * 1e3,
        timing.project_s * 1e3,
        timing.total_s * 1e3
    );
}

fn cmd_export_model(example: ExampleKey, path: &Path) -> AppResult<()> {
    let model = fv_model::load_model(example)?;
    save_model(path, &model)?;
    println!("✓ Exported {} to {}", example, path.display());
    Ok(())
}
