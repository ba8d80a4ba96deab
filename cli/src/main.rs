use clap::{Parser, Subcommand};
use eda_common::db::core::FloorplanDB;
use eda_common::db::parser::{blocks, nets};
use eda_common::util::config::Config;
use eda_common::util::{check, generator, logger};
use eda_floorplan::result::FloorplanResult;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Floorplan {
        #[arg(long)]
        alpha: Option<f64>,
        #[arg(long)]
        blocks: Option<String>,
        #[arg(long)]
        nets: Option<String>,
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        workers: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    Generate {
        #[arg(long, default_value_t = 100)]
        blocks: usize,
        #[arg(long, default_value_t = 100)]
        nets: usize,
        #[arg(long, default_value_t = 0.50)]
        utilization: f64,
        #[arg(long, default_value = "inputs/random")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    let command = args.command.unwrap_or(Commands::Floorplan {
        alpha: None,
        blocks: None,
        nets: None,
        output: None,
        workers: None,
        seed: None,
    });

    match command {
        Commands::Generate {
            blocks,
            nets,
            utilization,
            output,
        } => {
            let safe_util = utilization.clamp(0.05, 0.95);
            if (safe_util - utilization).abs() > f64::EPSILON {
                log::warn!(
                    "Requested utilization {:.2} is unsafe. Clamped to {:.2}",
                    utilization,
                    safe_util
                );
            }

            if let Some(parent) = Path::new(&output).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let block_file = format!("{}.block", output);
            let net_file = format!("{}.nets", output);
            generator::generate_random_benchmark(&block_file, &net_file, blocks, nets, safe_util)?;
            log::info!("Generated: {} / {}", block_file, net_file);
        }
        Commands::Floorplan {
            alpha,
            blocks,
            nets,
            output,
            workers,
            seed,
        } => {
            if let Some(alpha) = alpha {
                config.floorplan.alpha = alpha;
            }
            if let Some(workers) = workers {
                config.floorplan.workers = workers;
            }
            if seed.is_some() {
                config.floorplan.seed = seed;
            }
            if let Some(blocks) = blocks {
                config.input.block_file = blocks;
            }
            if let Some(nets) = nets {
                config.input.net_file = nets;
            }
            if let Some(output) = output {
                config.input.output_file = output;
            }

            validate_input_paths(&config)?;
            prepare_output_dir(&config.input.output_file)?;

            if run_floorplan(&config).is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn validate_input_paths(config: &Config) -> anyhow::Result<()> {
    if !Path::new(&config.input.block_file).exists() {
        return Err(anyhow::anyhow!(
            "Input block file missing: {}",
            config.input.block_file
        ));
    }
    if !Path::new(&config.input.net_file).exists() {
        return Err(anyhow::anyhow!(
            "Input net file missing: {}",
            config.input.net_file
        ));
    }
    Ok(())
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn run_floorplan(config: &Config) -> anyhow::Result<()> {
    log::info!("--- Phase 1: Parsing ---");
    let mut db: FloorplanDB = blocks::parse(&config.input.block_file)?;
    nets::parse(&mut db, &config.input.net_file)?;

    log::info!(
        "--- Phase 2: Floorplanning (alpha = {:.2}, {} workers) ---",
        config.floorplan.alpha,
        config.floorplan.workers
    );
    let mut floorplanner =
        eda_floorplan::parallel::Floorplanner::new(db, config.floorplan.clone()).map_err(|e| {
            log::error!("Floorplanning failed: {}", e);
            anyhow::anyhow!(e.to_string())
        })?;
    let result = floorplanner.run().map_err(|e| {
        log::error!("Floorplanning failed: {}", e);
        anyhow::anyhow!(e.to_string())
    })?;

    log::info!(
        "Result: cost {:.4}, wirelength {:.1}, chip {}x{} (area {}), {:.2}s",
        result.cost,
        result.wirelength,
        result.chip_width,
        result.chip_height,
        result.chip_area,
        result.runtime_seconds
    );

    log::info!("--- Phase 3: Verification ---");
    if let Err(e) = check::run_floorplan_check(floorplanner.db(), &result.rects()) {
        log::error!("{}", e);
        return Err(anyhow::anyhow!(e));
    }

    log::info!("--- Phase 4: Dump ---");
    dump_report(&config.input.output_file, &result)?;
    log::info!("Report written to {}", config.input.output_file);
    Ok(())
}

/// Output format of the reference flow: cost, wirelength, chip area,
/// chip dimensions, runtime, then one line per block rectangle.
fn dump_report(path: &str, result: &FloorplanResult) -> anyhow::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{:.6}", result.cost)?;
    writeln!(file, "{:.2}", result.wirelength)?;
    writeln!(file, "{}", result.chip_area)?;
    writeln!(file, "{} {}", result.chip_width, result.chip_height)?;
    writeln!(file, "{:.2}", result.runtime_seconds)?;
    for p in &result.placements {
        writeln!(file, "{} {} {} {} {}", p.name, p.x1, p.y1, p.x2, p.y2)?;
    }
    Ok(())
}
