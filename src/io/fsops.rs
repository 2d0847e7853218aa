use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::core::command::ExternalCommand;
use crate::core::params::BrickConfig;
use crate::error::{Error, Result};
use crate::io::process::run_external;

/// Uniquely named scratch workspace, removed recursively on `close` or drop.
pub struct ScratchDir {
    dir: Option<TempDir>,
}

impl ScratchDir {
    /// Create `nucorrect_<stem>_<random>` under the configured temp root.
    pub fn create(config: &BrickConfig, stem: &str) -> Result<Self> {
        let root = config.tmp_root();
        fs::create_dir_all(&root)?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("nucorrect_{}_", stem))
            .tempdir_in(&root)?;
        debug!("Scratch directory: {:?}", dir.path());
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        self.dir
            .as_ref()
            .map(TempDir::path)
            .unwrap_or_else(|| Path::new(""))
    }

    /// Remove the directory and report any failure.
    pub fn close(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => Ok(dir.close()?),
            None => Ok(()),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!("Failed to remove scratch directory {:?}: {}", path, e);
            }
        }
    }
}

/// Move `src` to `dst`, creating missing parents of `dst`.
pub fn relocate(src: &Path, dst: &Path) -> Result<()> {
    if !src.exists() {
        return Err(Error::MissingArtifact {
            path: src.to_path_buf(),
        });
    }
    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match fs::rename(src, dst) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            fs::copy(src, dst)?;
            fs::remove_file(src)?;
        }
        Err(e) => return Err(e.into()),
    }
    debug!("Moved {:?} -> {:?}", src, dst);
    Ok(())
}

/// Compress `src` in place with the configured tool; returns the archive path.
pub fn compress(src: &Path, config: &BrickConfig) -> Result<PathBuf> {
    let cmd = ExternalCommand::new(&config.zip_command).arg(src);
    run_external(&cmd, false, None)?;

    let mut archived = src.as_os_str().to_os_string();
    archived.push(&config.zip_ext);
    let archived = PathBuf::from(archived);
    if !archived.exists() {
        return Err(Error::MissingArtifact { path: archived });
    }
    Ok(archived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(root: &Path) -> BrickConfig {
        BrickConfig {
            tmp_root: Some(root.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn scratch_dir_is_named_after_stem_and_removed() -> Result<()> {
        let root = tempfile::tempdir()?;
        let scratch = ScratchDir::create(&config_in(root.path()), "subj01_nu")?;
        let path = scratch.path().to_path_buf();
        assert!(path.is_dir());
        assert!(
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("nucorrect_subj01_nu_"))
        );
        fs::write(path.join("leftover.mnc"), b"x")?;
        scratch.close()?;
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn scratch_dirs_for_the_same_stem_do_not_collide() -> Result<()> {
        let root = tempfile::tempdir()?;
        let cfg = config_in(root.path());
        let a = ScratchDir::create(&cfg, "subj01_nu")?;
        let b = ScratchDir::create(&cfg, "subj01_nu")?;
        assert_ne!(a.path(), b.path());
        Ok(())
    }

    #[test]
    fn dropping_scratch_dir_cleans_up() -> Result<()> {
        let root = tempfile::tempdir()?;
        let path = {
            let scratch = ScratchDir::create(&config_in(root.path()), "s")?;
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn relocate_creates_destination_parents() -> Result<()> {
        let root = tempfile::tempdir()?;
        let src = root.path().join("a_nu.mnc");
        fs::write(&src, b"volume")?;
        let dst = root.path().join("out/nested/a_nu.mnc");
        relocate(&src, &dst)?;
        assert!(!src.exists());
        assert_eq!(fs::read(&dst)?, b"volume");
        Ok(())
    }

    #[test]
    fn relocating_a_missing_file_reports_it() {
        let root = tempfile::tempdir().unwrap();
        let err = relocate(&root.path().join("nope.imp"), &root.path().join("x.imp")).unwrap_err();
        assert!(matches!(err, Error::MissingArtifact { .. }));
    }
}
