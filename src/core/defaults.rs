//! Defaulting and validation of the brick's three request structures.
//!
//! `resolve` is pure: it reads no file and creates nothing, so planners can call it
//! (directly or through `flag_test`) to learn the final file names of a job.
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::naming::VolumeName;
use crate::core::params::{BrickConfig, NuCorrectOptions};
use crate::error::{Error, Result};
use crate::types::{NuCorrectInputs, NuCorrectOutputs, OutputTarget};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInputs {
    pub t1: PathBuf,
    pub mask: Option<PathBuf>,
}

/// Output destinations after defaulting; `None` means omitted, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOutputs {
    pub t1_nu: Option<PathBuf>,
    pub t1_imp: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOptions {
    pub arg: String,
    pub flag_verbose: bool,
    pub flag_test: bool,
    pub folder_out: PathBuf,
    pub timeout_secs: Option<u64>,
}

impl ResolvedOptions {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Fully defaulted job, ready to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuCorrectJob {
    pub inputs: ResolvedInputs,
    pub outputs: ResolvedOutputs,
    pub options: ResolvedOptions,
}

impl NuCorrectJob {
    /// Name parts of the input volume
    pub fn volume_name(&self, config: &BrickConfig) -> VolumeName {
        VolumeName::parse(&self.inputs.t1, &config.zip_ext)
    }
}

fn resolve_target(target: &OutputTarget, derived: impl FnOnce() -> PathBuf) -> Option<PathBuf> {
    if target.is_omitted() {
        return None;
    }
    Some(
        target
            .explicit_path()
            .map(PathBuf::from)
            .unwrap_or_else(derived),
    )
}

/// Fill every unset field with its default.
///
/// Fails with [`Error::InvalidArgument`] on a config naming a blank executable, and
/// with [`Error::MissingArgument`] when `t1` is absent or empty.
pub fn resolve(
    inputs: &NuCorrectInputs,
    outputs: &NuCorrectOutputs,
    options: &NuCorrectOptions,
    config: &BrickConfig,
) -> Result<NuCorrectJob> {
    config.validate()?;
    let t1 = inputs
        .t1
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::missing("t1"))?;
    let mask = inputs.mask.clone().filter(|p| !p.as_os_str().is_empty());

    let name = VolumeName::parse(&t1, &config.zip_ext);
    let folder_out = options
        .folder_out
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| name.dir.clone());

    let t1_nu = resolve_target(&outputs.t1_nu, || name.nu_path(&folder_out));
    let t1_imp = resolve_target(&outputs.t1_imp, || name.imp_path(&folder_out));

    debug!(
        "Resolved outputs for {:?}: t1_nu={:?} t1_imp={:?}",
        t1, t1_nu, t1_imp
    );

    Ok(NuCorrectJob {
        inputs: ResolvedInputs { t1, mask },
        outputs: ResolvedOutputs { t1_nu, t1_imp },
        options: ResolvedOptions {
            arg: options.arg.clone(),
            flag_verbose: options.flag_verbose,
            flag_test: options.flag_test,
            folder_out,
            timeout_secs: options.timeout_secs,
        },
    })
}
