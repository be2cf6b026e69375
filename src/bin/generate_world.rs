//! World generator binary — turns a heightmap image into chunked voxel
//! world geometry on disk.
//!
//! Usage: cargo run --release --bin generate_world -- --image <PATH> [OPTIONS]
//!
//! Options:
//!   --image <PATH>     Source heightmap image (required)
//!   --terrain <KIND>   lowlands | midlands | highlands (default: midlands)
//!   --intensity <PCT>  Terrain intensity percentage 0-100 (default: 100)
//!   --scale <FACTOR>   Height scaling override (bypasses --terrain)
//!   --seed <SEED>      RNG seed (default: 12345)
//!   --display <MODE>   world | vicinity (default: world)
//!   --player-x <X>     Viewer X for vicinity mode (default: 0)
//!   --player-y <Y>     Viewer Y for vicinity mode (default: 0)
//!   --out <DIR>        Output directory (default: out/world)
//!
//! Output structure:
//!   <out>/
//!     manifest.json    # config + emitted chunk/tree indices
//!     chunks/          # chunk_<i>.obj, vertex-colored quads
//!     trees/           # tree_<i>.obj

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use glam::Vec3;
use serde_json::json;

use voxelfield::config::{DisplayMode, TerrainKind, WorldConfig};
use voxelfield::core::types::Result;
use voxelfield::heightfield::Heightfield;
use voxelfield::voxel::Mesh;
use voxelfield::world::WorldSession;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(image) = parse_str_arg(&args, "--image") else {
        eprintln!("Usage: generate_world --image <PATH> [--terrain KIND] [--intensity PCT]");
        eprintln!("       [--scale FACTOR] [--seed SEED] [--display MODE]");
        eprintln!("       [--player-x X] [--player-y Y] [--out DIR]");
        std::process::exit(1);
    };

    if let Err(e) = run(&args, &image) {
        log::error!("Generation failed: {e}");
        std::process::exit(1);
    }
}

fn run(args: &[String], image: &str) -> Result<()> {
    let seed = parse_u64_arg(args, "--seed").unwrap_or(12345);
    let terrain = parse_str_arg(args, "--terrain").unwrap_or_else(|| "midlands".to_string());
    let intensity = parse_u32_arg(args, "--intensity").unwrap_or(100);
    let display = parse_str_arg(args, "--display").unwrap_or_else(|| "world".to_string());
    let player_x = parse_f32_arg(args, "--player-x").unwrap_or(0.0);
    let player_y = parse_f32_arg(args, "--player-y").unwrap_or(0.0);
    let out = PathBuf::from(parse_str_arg(args, "--out").unwrap_or_else(|| "out/world".to_string()));

    let kind: TerrainKind = terrain.parse()?;
    let mode: DisplayMode = display.parse()?;
    let config = match parse_f64_arg(args, "--scale") {
        Some(scale) => WorldConfig {
            height_scaling: scale,
            seed,
        },
        None => WorldConfig::from_terrain(kind, intensity, seed),
    };

    println!("=== Voxelfield World Generator ===");
    println!("Image:   {image}");
    println!("Terrain: {terrain} at {intensity}% (scaling {:.3})", config.height_scaling);
    println!("Seed:    {seed}");
    println!("Display: {display}");
    println!("Output:  {}", out.display());
    println!();

    let start = Instant::now();
    let heightfield = Heightfield::from_image(image)?;
    let mut session = WorldSession::generate(heightfield, &config)?;
    let view = session.view(mode, Vec3::new(player_x, player_y, 0.0));

    let chunk_dir = out.join("chunks");
    let tree_dir = out.join("trees");
    std::fs::create_dir_all(&chunk_dir)?;
    std::fs::create_dir_all(&tree_dir)?;

    let mut total_faces = 0usize;
    for &i in &view.chunks {
        let mesh = &session.chunks()[i];
        total_faces += mesh.faces().len();
        write_obj(&chunk_dir.join(format!("chunk_{i}.obj")), mesh)?;
    }
    for &i in &view.trees {
        let (_, mesh) = &session.trees()[i];
        write_obj(&tree_dir.join(format!("tree_{i}.obj")), mesh)?;
    }

    let manifest = json!({
        "image": image,
        "height_scaling": config.height_scaling,
        "seed": seed,
        "display": display,
        "grid_side": session.topology().side(),
        "chunk_count": session.chunks().len(),
        "tree_count": session.trees().len(),
        "emitted": {
            "chunks": view.chunks,
            "trees": view.trees,
        },
    });
    std::fs::write(
        out.join("manifest.json"),
        serde_json::to_string_pretty(&manifest).unwrap_or_default(),
    )?;

    println!();
    println!("=== Generation Complete ===");
    println!(
        "Chunks: {} emitted (of {}), {} quads",
        view.chunks.len(),
        session.chunks().len(),
        total_faces
    );
    println!("Trees:  {} emitted (of {})", view.trees.len(), session.trees().len());
    println!("Time:   {:.2}s", start.elapsed().as_secs_f64());
    println!("Output: {}", out.display());
    Ok(())
}

/// Write a vertex-colored OBJ (the common "v x y z r g b" extension).
fn write_obj(path: &Path, mesh: &Mesh) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for (v, c) in mesh.vertices().iter().zip(mesh.colors()) {
        writeln!(
            w,
            "v {} {} {} {:.4} {:.4} {:.4}",
            v.x,
            v.y,
            v.z,
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0
        )?;
    }
    for f in mesh.faces() {
        writeln!(w, "f {} {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1, f[3] + 1)?;
    }
    w.flush()
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_f64_arg(args: &[String], flag: &str) -> Option<f64> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
