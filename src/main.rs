//! Faultgen CLI - procedural fault terrain generator.
//!
//! Generates a triangulated heightfield by applying random faults to a flat
//! grid and exports it as OBJ, RAW GPU buffers or PNG images.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use faultgen::export::{
    expected_channel_size, expected_index_size, export_heightmap_png, export_mesh_raw,
    export_normal_map_png, export_obj, PngExportOptions,
};
use faultgen::geometry::MAX_VERTICES;
use faultgen::pipeline::Pipeline;
use faultgen::terrain::build_grid;
use faultgen::TerrainConfig;

/// Procedural fault terrain generator.
#[derive(Parser)]
#[command(name = "faultgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is unset (trace|debug|info|warn|error).
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new terrain mesh.
    Generate {
        /// Vertices per grid side (1-256). Defaults to 2.
        #[arg(short, long, allow_negative_numbers = true)]
        grid_size: Option<i64>,

        /// Number of faults to apply. Defaults to 0.
        #[arg(short, long, allow_negative_numbers = true)]
        faults: Option<i64>,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Total height span after normalization.
        #[arg(long)]
        height_span: Option<f32>,

        /// TOML configuration file; command-line flags override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "terrain")]
        name: String,

        /// Export format.
        #[arg(long, default_value = "obj")]
        format: ExportFormat,
    },

    /// Display mesh and buffer sizes for a grid size.
    Info {
        /// Vertices per grid side.
        #[arg(short, long, default_value = "64")]
        grid_size: usize,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// Wavefront OBJ mesh with normals and vertex colors.
    Obj,
    /// Little-endian channel and index buffers.
    Raw,
    /// 16-bit heightmap and RGB normal map.
    Png,
    /// Every format above.
    All,
}

struct GenerateArgs {
    grid_size: Option<i64>,
    faults: Option<i64>,
    seed: Option<u64>,
    height_span: Option<f32>,
    config: Option<PathBuf>,
    output: PathBuf,
    name: String,
    format: ExportFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let result = match cli.command {
        Commands::Generate {
            grid_size,
            faults,
            seed,
            height_span,
            config,
            output,
            name,
            format,
        } => run_generate(GenerateArgs {
            grid_size,
            faults,
            seed,
            height_span,
            config,
            output,
            name,
            format,
        }),
        Commands::Info { grid_size } => {
            run_info(grid_size);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(args: &GenerateArgs) -> Result<TerrainConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let config = TerrainConfig::load(path)?;
            info!("Configuration loaded from: {}", path.display());
            config
        }
        None => TerrainConfig {
            seed: time_seed(),
            ..Default::default()
        },
    };

    if args.grid_size.is_some() || args.faults.is_some() {
        let sized = TerrainConfig::from_args(
            args.grid_size.unwrap_or(config.grid_size as i64),
            args.faults.unwrap_or(config.fault_count as i64),
        )?;
        config.grid_size = sized.grid_size;
        config.fault_count = sized.fault_count;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(span) = args.height_span {
        config.height_span = span;
    }

    config.validate()?;
    Ok(config)
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&args)?;

    info!("Faultgen - Procedural Fault Terrain Generator");
    info!("Grid: {}x{} vertices", config.grid_size, config.grid_size);
    info!("Faults: {}", config.fault_count);
    info!("Seed: {}", config.seed);
    info!("Output: {}", args.output.display());

    let start = Instant::now();
    let geometry = build_grid(config.grid_size)?;
    let pipeline = Pipeline::standard(&config);
    let mut rng = config.rng();

    let geometry = pipeline.run_with_callbacks(
        geometry,
        &mut rng,
        |name, i, total| info!("  [{}/{}] Starting: {}", i + 1, total, name),
        |name, i, total| info!("  [{}/{}] Completed: {}", i + 1, total, name),
    )?;
    let buffer = geometry.into_buffer()?;
    info!("Generation completed in {:.2?}", start.elapsed());

    let (min_h, max_h) = buffer.height_range();
    info!("Height range: [{:.4}, {:.4}]", min_h, max_h);

    let export_start = Instant::now();
    std::fs::create_dir_all(&args.output)?;
    let all = args.format == ExportFormat::All;

    if all || args.format == ExportFormat::Obj {
        let path = args.output.join(format!("{}.obj", args.name));
        export_obj(&buffer, &path)?;
        info!("  Exported OBJ mesh: {}", path.display());
    }
    if all || args.format == ExportFormat::Raw {
        export_mesh_raw(&buffer, &args.output, &args.name)?;
        info!("  Exported RAW buffers: {}_*.raw", args.name);
    }
    if all || args.format == ExportFormat::Png {
        let options = PngExportOptions::auto_range(&buffer);
        export_heightmap_png(&buffer, &args.output.join(format!("{}_height.png", args.name)), &options)?;
        export_normal_map_png(&buffer, &args.output.join(format!("{}_normal.png", args.name)), &options)?;
        info!("  Exported PNG maps: {}_height.png, {}_normal.png", args.name, args.name);
    }

    info!("Export completed in {:.2?}", export_start.elapsed());
    info!("Total time: {:.2?}", start.elapsed());
    Ok(())
}

fn run_info(grid_size: usize) {
    let side = grid_size as u64;
    let cells = side.saturating_sub(1);
    let vertices = side.saturating_mul(side);
    let triangles = cells.saturating_mul(cells).saturating_mul(2);
    let channel_bytes = expected_channel_size(grid_size);
    let index_bytes = expected_index_size(grid_size);

    println!("Faultgen - Mesh Configuration Info");
    println!("==================================");
    println!();
    println!("Grid: {}x{} vertices", grid_size, grid_size);
    println!("  Vertices:  {:>12}", vertices);
    println!("  Triangles: {:>12}", triangles);
    println!();
    println!("Buffer sizes:");
    println!("  Per channel (3 x f32): {:>10} bytes", channel_bytes);
    println!("  All channels (3):      {:>10} bytes", channel_bytes.saturating_mul(3));
    println!("  Indices (u16):         {:>10} bytes", index_bytes);
    println!();
    if vertices <= MAX_VERTICES as u64 {
        println!("16-bit indices: OK");
    } else {
        println!(
            "16-bit indices: TOO MANY VERTICES (max {}, grid size <= 256)",
            MAX_VERTICES
        );
    }
}
