//! High-level library API: resolve a job's file names and run the correction.
//! Prefer these entrypoints over the lower-level `core` and `io` modules.
use std::path::Path;

use tracing::{debug, info};

use crate::core::command::ExternalCommand;
use crate::core::defaults::{NuCorrectJob, resolve};
use crate::core::naming::VolumeName;
use crate::core::params::{BrickConfig, NuCorrectOptions};
use crate::error::{Error, Result};
use crate::io::{ScratchDir, compress, relocate, run_external};
use crate::types::{NuCorrectInputs, NuCorrectOutputs};

/// Default, then (unless `flag_test`) run the correction and place the outputs.
///
/// Returns the fully defaulted job. With `flag_test` nothing is spawned or written.
pub fn process(
    inputs: &NuCorrectInputs,
    outputs: &NuCorrectOutputs,
    options: &NuCorrectOptions,
    config: &BrickConfig,
) -> Result<NuCorrectJob> {
    let job = resolve(inputs, outputs, options, config)?;
    if job.options.flag_test {
        info!("Test mode: resolved outputs for {:?}, nothing run", job.inputs.t1);
        return Ok(job);
    }
    run_job(&job, config)?;
    Ok(job)
}

/// Run an already resolved job. The scratch directory is removed on every path.
pub fn run_job(job: &NuCorrectJob, config: &BrickConfig) -> Result<()> {
    if job.options.flag_test {
        return Ok(());
    }
    let name = job.volume_name(config);
    info!("Non-uniformity correction of {:?}", job.inputs.t1);

    let scratch = ScratchDir::create(config, &name.nu_stem())?;
    let result = execute(job, config, &name, scratch.path());
    let cleanup = scratch.close();
    result?;
    cleanup?;

    info!("Done: {:?}", job.inputs.t1);
    Ok(())
}

fn execute(
    job: &NuCorrectJob,
    config: &BrickConfig,
    name: &VolumeName,
    scratch: &Path,
) -> Result<()> {
    let scratch_nu = name.scratch_nu_path(scratch);
    let scratch_imp = name.imp_path(scratch);

    let cmd = ExternalCommand::nu_correct(&config.tool, job, scratch, &scratch_nu);
    let output = run_external(&cmd, job.options.flag_verbose, job.options.timeout())?;
    if !output.is_empty() {
        debug!("{} output:\n{}", config.tool, output.trim_end());
    }

    // Nothing is published unless every requested artifact was produced.
    let requested = [
        (job.outputs.t1_nu.is_some(), &scratch_nu),
        (job.outputs.t1_imp.is_some(), &scratch_imp),
    ];
    if let Some((_, missing)) = requested.iter().find(|(wanted, p)| *wanted && !p.exists()) {
        return Err(Error::MissingArtifact {
            path: missing.to_path_buf(),
        });
    }

    match &job.outputs.t1_nu {
        Some(target) if config.is_compressed(target) => {
            let archived = compress(&scratch_nu, config)?;
            relocate(&archived, target)?;
        }
        Some(target) => relocate(&scratch_nu, target)?,
        None => debug!("t1_nu omitted, discarding {:?}", scratch_nu),
    }

    match &job.outputs.t1_imp {
        Some(target) => relocate(&scratch_imp, target)?,
        None => debug!("t1_imp omitted, discarding {:?}", scratch_imp),
    }
    Ok(())
}
