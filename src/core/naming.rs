//! File name derivation for volumes, including doubly-suffixed compressed volumes
//! such as `subj01.mnc.gz`.
use std::path::{Path, PathBuf};

/// Suffix appended to the base name of every corrected artifact
pub const NU_SUFFIX: &str = "_nu";
/// Extension of the intensity mapping written next to the corrected volume
pub const IMP_EXT: &str = ".imp";

/// A volume path split into directory, base name and extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeName {
    pub dir: PathBuf,
    pub base: String,
    /// Format extension with its dot (`.mnc`), possibly empty
    pub format_ext: String,
    /// Archive extension (`.gz`) when the file is compressed
    pub archive_ext: Option<String>,
}

impl VolumeName {
    pub fn parse(path: &Path, archive_ext: &str) -> Self {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let (mut base, mut format_ext) = split_extension(path);
        let mut archive = None;

        if !archive_ext.is_empty() && format_ext == archive_ext {
            archive = Some(format_ext);
            let (inner_base, inner_ext) = split_extension(Path::new(&base));
            base = inner_base;
            format_ext = inner_ext;
        }

        Self {
            dir,
            base,
            format_ext,
            archive_ext: archive,
        }
    }

    /// `format_ext` followed by the archive extension, if any
    pub fn effective_ext(&self) -> String {
        match &self.archive_ext {
            Some(a) => format!("{}{}", self.format_ext, a),
            None => self.format_ext.clone(),
        }
    }

    /// `<base>_nu`
    pub fn nu_stem(&self) -> String {
        format!("{}{}", self.base, NU_SUFFIX)
    }

    /// Default corrected volume: `<folder>/<base>_nu<effective ext>`
    pub fn nu_path(&self, folder: &Path) -> PathBuf {
        folder.join(format!("{}{}", self.nu_stem(), self.effective_ext()))
    }

    /// Default intensity map: `<folder>/<base>_nu.imp`, never compressed
    pub fn imp_path(&self, folder: &Path) -> PathBuf {
        folder.join(format!("{}{}", self.nu_stem(), IMP_EXT))
    }

    /// Uncompressed corrected volume inside a scratch directory
    pub fn scratch_nu_path(&self, scratch: &Path) -> PathBuf {
        scratch.join(format!("{}{}", self.nu_stem(), self.format_ext))
    }
}

// Returns (stem, ".ext"); ext is empty when the name has none.
fn split_extension(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}
