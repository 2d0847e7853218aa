//! Shared types used across nucorrect.
//! Includes the caller-facing request structures (`NuCorrectInputs`, `NuCorrectOutputs`)
//! and `OutputTarget`, the three-way value describing where an artifact should go.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Destination of one output artifact before defaulting.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    /// Unset: derive the path from the input volume name.
    #[default]
    Default,
    /// Explicitly absent: the artifact is computed but never persisted.
    Omitted,
    /// Concrete destination.
    Path(PathBuf),
}

impl OutputTarget {
    /// Build a target from CLI-style arguments. `omit` wins over a path.
    pub fn from_flags(path: Option<PathBuf>, omit: bool) -> Self {
        match (path, omit) {
            (_, true) => OutputTarget::Omitted,
            (Some(p), false) => OutputTarget::Path(p),
            (None, false) => OutputTarget::Default,
        }
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, OutputTarget::Omitted)
    }

    /// Concrete path, if one was supplied and it is not empty.
    pub fn explicit_path(&self) -> Option<&Path> {
        match self {
            OutputTarget::Path(p) if !p.as_os_str().is_empty() => Some(p.as_path()),
            _ => None,
        }
    }
}

impl From<PathBuf> for OutputTarget {
    fn from(path: PathBuf) -> Self {
        OutputTarget::Path(path)
    }
}

impl From<&str> for OutputTarget {
    fn from(path: &str) -> Self {
        OutputTarget::Path(PathBuf::from(path))
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Default => write!(f, "<default>"),
            OutputTarget::Omitted => write!(f, "<omitted>"),
            OutputTarget::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Input files of the brick. `t1` is mandatory; `mask` defaults to omitted.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NuCorrectInputs {
    /// T1-weighted volume to correct
    pub t1: Option<PathBuf>,
    /// Optional region-of-interest mask restricting the field estimation
    pub mask: Option<PathBuf>,
}

impl NuCorrectInputs {
    pub fn new<P: Into<PathBuf>>(t1: P) -> Self {
        Self {
            t1: Some(t1.into()),
            mask: None,
        }
    }

    pub fn with_mask<P: Into<PathBuf>>(mut self, mask: P) -> Self {
        self.mask = Some(mask.into());
        self
    }
}

/// Output files of the brick. Both default to names derived from `t1`.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NuCorrectOutputs {
    /// Non-uniformity corrected volume
    pub t1_nu: OutputTarget,
    /// Intensity mapping estimated by the tool (`.imp`)
    pub t1_imp: OutputTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flags_prefers_omission() {
        assert_eq!(
            OutputTarget::from_flags(Some("/x.mnc".into()), true),
            OutputTarget::Omitted
        );
        assert_eq!(
            OutputTarget::from_flags(Some("/x.mnc".into()), false),
            OutputTarget::Path("/x.mnc".into())
        );
        assert_eq!(OutputTarget::from_flags(None, false), OutputTarget::Default);
    }

    #[test]
    fn empty_path_is_not_explicit() {
        assert!(OutputTarget::Path(PathBuf::new()).explicit_path().is_none());
        assert!(OutputTarget::Default.explicit_path().is_none());
        assert!(!OutputTarget::Default.is_omitted());
    }

    #[test]
    fn request_structures_merge_permissively() {
        let outputs: NuCorrectOutputs =
            serde_json::from_str(r#"{"t1_imp":"omitted","unknown":42}"#).unwrap();
        assert_eq!(outputs.t1_nu, OutputTarget::Default);
        assert_eq!(outputs.t1_imp, OutputTarget::Omitted);

        let inputs: NuCorrectInputs = serde_json::from_str(r#"{"mask":"/roi.mnc"}"#).unwrap();
        assert!(inputs.t1.is_none());
        assert_eq!(inputs.mask, Some(PathBuf::from("/roi.mnc")));

        let explicit: NuCorrectOutputs =
            serde_json::from_str(r#"{"t1_nu":{"path":"/out/a.mnc"}}"#).unwrap();
        assert_eq!(explicit.t1_nu, OutputTarget::Path("/out/a.mnc".into()));
    }
}
