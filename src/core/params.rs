use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options of the brick, suitable for config files and pipeline presets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NuCorrectOptions {
    /// Extra arguments passed verbatim to the tool, split on whitespace
    pub arg: String,
    /// Stream the tool's output to the console instead of capturing it
    pub flag_verbose: bool,
    /// Resolve file names only; run nothing and touch nothing
    pub flag_test: bool,
    /// Output directory; None means the directory of `t1`
    pub folder_out: Option<PathBuf>,
    /// Kill the tool after this many seconds; None waits forever
    pub timeout_secs: Option<u64>,
}

impl Default for NuCorrectOptions {
    fn default() -> Self {
        Self {
            arg: String::new(),
            flag_verbose: true,
            flag_test: false,
            folder_out: None,
            timeout_secs: None,
        }
    }
}

/// Process-wide settings, built once at start-up and passed to every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    /// Name or path of the correction executable
    pub tool: String,
    /// Name or path of the compression executable
    pub zip_command: String,
    /// Extension appended by `zip_command`, matched literally
    pub zip_ext: String,
    /// Parent of scratch directories; None means the system temp dir
    pub tmp_root: Option<PathBuf>,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            tool: "nu_correct".to_string(),
            zip_command: "gzip".to_string(),
            zip_ext: ".gz".to_string(),
            tmp_root: None,
        }
    }
}

impl BrickConfig {
    /// Load a JSON config; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Reject executables that cannot be launched.
    pub fn validate(&self) -> Result<()> {
        for (arg, value) in [("tool", &self.tool), ("zip_command", &self.zip_command)] {
            if value.trim().is_empty() {
                return Err(Error::InvalidArgument {
                    arg,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn tmp_root(&self) -> PathBuf {
        self.tmp_root.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Whether `path` names a compressed file.
    pub fn is_compressed(&self, path: &Path) -> bool {
        !self.zip_ext.is_empty()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(&self.zip_ext))
    }
}
