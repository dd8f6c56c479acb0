use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drawbench_core::storage::{self, SceneStore};
use drawbench_core::{Scene, Shape, ShapeKind};

mod shell;

#[derive(Parser, Debug)]
#[command(name = "drawbench")]
#[command(version, about = "Shape scene editor and file tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a scene file
    Info {
        /// Scene file (.txt or .json)
        file: PathBuf,
    },
    /// Convert between the text and JSON scene formats
    Convert {
        /// Input scene file; the format follows the extension
        input: PathBuf,
        /// Output scene file; the format follows the extension
        output: PathBuf,
    },
    /// Edit a scene interactively
    Edit {
        /// Scene file to open; created on the first save
        file: Option<PathBuf>,
    },
    /// List scenes saved in the local scene store
    Scenes,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Info { file } => info(&file),
        Command::Convert { input, output } => convert(&input, &output),
        Command::Edit { file } => shell::run(file),
        Command::Scenes => scenes(),
    }
}

/// Load a scene, picking the format from the file extension.
fn load_any(path: &Path) -> Result<Scene> {
    let result = if is_json(path) {
        storage::load_scene_json(path)
    } else {
        storage::load_scene(path)
    };
    result.with_context(|| format!("failed to load {}", path.display()))
}

/// Save a scene, picking the format from the file extension.
fn save_any(scene: &Scene, path: &Path) -> Result<()> {
    let result = if is_json(path) {
        storage::save_scene_json(scene, path)
    } else {
        storage::save_scene(scene, path)
    };
    result.with_context(|| format!("failed to save {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// One-line human description of a shape.
fn describe(shape: &Shape) -> String {
    let bounds = shape.bounds();
    let selected = if shape.selected() { " [selected]" } else { "" };
    format!(
        "{} {}x{} at ({}, {}) {}{}",
        shape.kind(),
        bounds.width(),
        bounds.height(),
        bounds.x0,
        bounds.y0,
        shape.color(),
        selected,
    )
}

fn info(path: &Path) -> Result<()> {
    let scene = load_any(path)?;
    let count = |kind: ShapeKind| scene.iter().filter(|s| s.kind() == kind).count();
    println!(
        "{}: {} shapes ({} squares, {} circles, {} rectangles)",
        path.display(),
        scene.len(),
        count(ShapeKind::Square),
        count(ShapeKind::Circle),
        count(ShapeKind::Rectangle),
    );
    if let Some(bounds) = scene.bounds() {
        println!(
            "bounds: ({}, {}) to ({}, {})",
            bounds.x0, bounds.y0, bounds.x1, bounds.y1
        );
    }
    for shape in scene.iter() {
        println!("  {}", describe(shape));
    }
    Ok(())
}

fn convert(input: &Path, output: &Path) -> Result<()> {
    let scene = load_any(input)?;
    save_any(&scene, output)?;
    println!(
        "converted {} -> {} ({} shapes)",
        input.display(),
        output.display(),
        scene.len(),
    );
    Ok(())
}

fn scenes() -> Result<()> {
    let store = SceneStore::open_default().context("failed to open the scene store")?;
    let names = store.list().context("failed to list the scene store")?;
    if names.is_empty() {
        println!("no scenes in {}", store.base().display());
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}
