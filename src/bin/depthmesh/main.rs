//! depthmesh CLI - depth map to mesh converter.
//!
//! Usage: depthmesh <COMMAND> [OPTIONS]
//!
//! Run `depthmesh --help` for available commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use depthmesh::algo::Progress;
use depthmesh::grid::DepthGrid;
use depthmesh::io::{depth, ply, Format};
use depthmesh::pipeline::{depth_to_mesh, ConvertOptions};

#[derive(Parser)]
#[command(name = "depthmesh")]
#[command(author, version, about = "Depth map to 3D mesh converter", long_about = None)]
struct Cli {
    /// Log pipeline details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a depth map into a PLY mesh
    Convert {
        /// Input depth map file
        #[arg(default_value = "DepthMap_8.dat")]
        input: PathBuf,

        /// Output PLY file
        #[arg(default_value = "output.ply")]
        output: PathBuf,

        /// Scale applied to X/Y coordinates (negative mirrors)
        #[arg(short, long, default_value = "1.0", allow_negative_numbers = true)]
        scale: f64,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Display depth map or mesh information
    Info {
        /// Input depth map (.dat, .bin) or mesh (.ply) file
        input: PathBuf,
    },

    /// Write a synthetic depth map
    Synth {
        /// Output depth map file
        output: PathBuf,

        /// Grid width in cells
        #[arg(long, default_value = "64")]
        width: usize,

        /// Grid height in cells
        #[arg(long, default_value = "48")]
        height: usize,

        /// Cut zero-valued holes into the surface
        #[arg(long)]
        holes: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            scale,
            sequential,
        } => {
            cmd_convert(&input, &output, scale, sequential)?;
        }

        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Synth {
            output,
            width,
            height,
            holes,
        } => {
            cmd_synth(&output, width, height, holes)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that drives a terminal progress bar.
///
/// Each stage restarts the bar when its message changes.
fn create_progress() -> Progress {
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("[{bar:30.cyan/blue}] {percent:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }
        if bar.message() != message {
            bar.reset();
            bar.set_message(message.to_string());
        }
        bar.set_length(total as u64);
        bar.set_position(bar.position().max(current as u64));
        if current >= total {
            bar.finish();
        }
    })
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    scale: f64,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Depth map to 3D mesh converter");
    println!();

    println!("1. Reading depth map {}...", input.display());
    let grid = depth::load(input)?;
    print_grid_stats(&grid);
    println!();

    let options = ConvertOptions::new()
        .with_scale(scale)
        .with_parallel(!sequential)
        .with_progress(create_progress());
    let mode = if sequential { "sequential" } else { "parallel" };

    println!("2-3. Projecting points and generating triangles ({})...", mode);
    let start = Instant::now();
    let mesh = depth_to_mesh(&grid, &options)?;
    let elapsed = start.elapsed();
    println!("Vertices: {}", mesh.num_vertices());
    println!("Triangles: {} ({:.2?})", mesh.num_faces(), elapsed);
    println!();

    println!("4. Exporting PLY...");
    ply::save(&mesh, output)?;
    println!("Saved: {}", output.display());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match Format::from_path(input) {
        Some(Format::DepthMap) => {
            let grid = depth::load(input)?;
            println!("File: {}", input.display());
            print_grid_stats(&grid);
        }
        Some(Format::Ply) => {
            let mesh = ply::load(input)?;
            mesh.validate()?;
            println!("File: {}", input.display());
            println!("Vertices: {}", mesh.num_vertices());
            println!("Faces: {}", mesh.num_faces());
            if let Some((min, max)) = mesh.bounding_box() {
                println!(
                    "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
                    min.x, min.y, min.z, max.x, max.y, max.z
                );
                let diag = max - min;
                println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
            }
        }
        None => {
            return Err(format!(
                "unsupported file format: {}",
                input
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("(none)")
            )
            .into());
        }
    }

    Ok(())
}

fn cmd_synth(
    output: &Path,
    width: usize,
    height: usize,
    holes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let grid = synthetic_grid(width, height, holes)?;
    depth::save(&grid, output)?;

    println!("Saved: {} ({}x{})", output.display(), width, height);
    print_grid_stats(&grid);
    Ok(())
}

fn print_grid_stats(grid: &DepthGrid) {
    let stats = grid.stats();
    println!("Size: {}x{} cells", grid.width(), grid.height());
    if stats.has_valid_samples() {
        println!("Depth: {:.2} - {:.2}", stats.min_depth, stats.max_depth);
    } else {
        println!("Depth: no valid samples");
    }
    println!("Valid cells: {}", stats.valid_count);
}

/// A Gaussian bump on a tilted plane, optionally with a disc-shaped hole and
/// a missing left column.
fn synthetic_grid(
    width: usize,
    height: usize,
    holes: bool,
) -> Result<DepthGrid, Box<dyn std::error::Error>> {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let sigma = (width.min(height) as f64 / 4.0).max(1.0);
    let hole_center = (width as f64 / 3.0, height as f64 / 3.0);
    let hole_radius = width.min(height) as f64 / 8.0;

    let mut depths = Vec::new();
    for row in 0..height {
        for col in 0..width {
            let (x, y) = (col as f64, row as f64);
            let r2 = (x - cx).powi(2) + (y - cy).powi(2);
            let mut d = 1000.0 + 0.5 * y + 250.0 * (-r2 / (2.0 * sigma * sigma)).exp();

            if holes {
                let h2 = (x - hole_center.0).powi(2) + (y - hole_center.1).powi(2);
                if col == 0 || h2 < hole_radius * hole_radius {
                    d = depthmesh::grid::NO_DATA;
                }
            }
            depths.push(d);
        }
    }

    Ok(DepthGrid::new(height, width, depths)?)
}
