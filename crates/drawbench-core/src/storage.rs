//! Scene persistence: text and JSON files, plus a named scene store under
//! the user's data directory.

use crate::format::{self, FormatError};
use crate::scene::Scene;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension used by scene files in the text format.
pub const SCENE_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene file: {0}")]
    Format(#[from] FormatError),
    #[error("invalid scene json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not determine a data directory for the scene store")]
    NoHome,
}

fn io_err(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Append the scene extension when `path` has none.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension(SCENE_EXTENSION)
    } else {
        path.to_path_buf()
    }
}

/// Save a scene to `path` in the text format. A path without an extension
/// gets `.txt` appended.
pub fn save_scene(scene: &Scene, path: &Path) -> Result<(), StorageError> {
    let path = with_default_extension(path);
    let text = format::write_scene(scene);
    fs::write(&path, text).map_err(|e| io_err(&path, e))?;
    log::info!("saved {} shapes to {}", scene.len(), path.display());
    Ok(())
}

/// Load a scene from a text-format file. The loaded scene is deselected.
pub fn load_scene(path: &Path) -> Result<Scene, StorageError> {
    let text = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let scene = format::parse_scene(&text)?;
    log::info!("loaded {} shapes from {}", scene.len(), path.display());
    Ok(scene)
}

/// Save a scene to `path` as JSON.
pub fn save_scene_json(scene: &Scene, path: &Path) -> Result<(), StorageError> {
    let json = scene.to_json()?;
    fs::write(path, json).map_err(|e| io_err(path, e))?;
    log::info!("saved {} shapes to {}", scene.len(), path.display());
    Ok(())
}

/// Load a scene from a JSON file. The loaded scene is deselected.
pub fn load_scene_json(path: &Path) -> Result<Scene, StorageError> {
    let json = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let scene = Scene::from_json(&json)?;
    log::info!("loaded {} shapes from {}", scene.len(), path.display());
    Ok(scene)
}

/// A directory of named scenes in the text format.
#[derive(Debug, Clone)]
pub struct SceneStore {
    base: PathBuf,
}

impl SceneStore {
    /// Open (and create if needed) a store rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base = base.into();
        fs::create_dir_all(&base).map_err(|e| io_err(&base, e))?;
        Ok(Self { base })
    }

    /// Open the store at the platform default location,
    /// `<data dir>/drawbench/scenes`.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::new(Self::default_location()?)
    }

    /// Platform default store directory.
    pub fn default_location() -> Result<PathBuf, StorageError> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or(StorageError::NoHome)?;
        Ok(base.join("drawbench").join("scenes"))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path a named scene is stored at.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base.join(name).with_extension(SCENE_EXTENSION)
    }

    pub fn save(&self, name: &str, scene: &Scene) -> Result<(), StorageError> {
        save_scene(scene, &self.path_for(name))
    }

    pub fn load(&self, name: &str) -> Result<Scene, StorageError> {
        load_scene(&self.path_for(name))
    }

    /// Names of stored scenes, sorted.
    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(&self.base).map_err(|e| io_err(&self.base, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&self.base, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(SCENE_EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Color, Shape, Square};
    use kurbo::Point;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_shape(Shape::Square(Square::new(
            Point::new(10.0, 10.0),
            80.0,
            Color::Green,
        )));
        scene.add_shape(Shape::Circle(Circle::new(
            Point::new(200.0, 100.0),
            60.0,
            Color::Black,
        )));
        scene
    }

    #[test]
    fn text_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.txt");
        let scene = sample_scene();

        save_scene(&scene, &path).unwrap();
        let loaded = load_scene(&path).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn json_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let scene = sample_scene();

        save_scene_json(&scene, &path).unwrap();
        let loaded = load_scene_json(&path).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scene(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn load_malformed_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "SQUARE 0 0 nope RED false").unwrap();
        let err = load_scene(&path).unwrap_err();
        assert!(matches!(err, StorageError::Format(_)));
    }

    #[test]
    fn store_saves_and_lists_named_scenes() {
        let dir = tempfile::tempdir().unwrap();
        let store = SceneStore::new(dir.path().join("scenes")).unwrap();

        store.save("alpha", &sample_scene()).unwrap();
        store.save("beta", &Scene::new()).unwrap();
        // A stray non-scene file must not show up in the listing.
        std::fs::write(store.base().join("notes.md"), "x").unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "beta"]);
        let loaded = store.load("alpha").unwrap();
        assert_eq!(loaded, sample_scene());
    }

    #[test]
    fn save_defaults_missing_extension_to_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene");
        save_scene(&sample_scene(), &path).unwrap();
        assert!(!path.exists());
        assert!(path.with_extension("txt").exists());
    }

    #[test]
    fn store_path_uses_txt_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = SceneStore::new(dir.path()).unwrap();
        assert_eq!(
            store.path_for("demo"),
            dir.path().join("demo.txt"),
        );
    }
}
