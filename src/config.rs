use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Compiler settings. The defaults produce the layout the Tale runtime expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text of the `# ...` heading that starts the script, compared case-insensitively
    pub entry_point: String,
    /// Replaces a leading `Scene`/`Scena` token in scene names
    pub scene_rename_token: String,
    /// Directory for generated scene classes, relative to the output root
    pub scenes_dir: PathBuf,
    /// File extension of generated scene classes
    pub extension: String,
    pub transition_file: PathBuf,
    pub dialog_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry_point: "Script".to_string(),
            scene_rename_token: "Story".to_string(),
            scenes_dir: PathBuf::from("Scenes"),
            extension: "cs".to_string(),
            transition_file: PathBuf::from("Transition.cs"),
            dialog_file: PathBuf::from("Dialog.cs"),
        }
    }
}

impl Config {
    /// Loads a JSON config file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn is_entry_point(&self, heading: &str) -> bool {
        heading.to_lowercase() == self.entry_point.to_lowercase()
    }

    pub fn scene_path(&self, scene: &str) -> PathBuf {
        self.scenes_dir.join(format!("{}.{}", scene, self.extension))
    }
}
