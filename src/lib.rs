#![doc = r#"
nucorrect — a thin wrapper around the `nu_correct` non-uniformity correction tool.

This crate runs N3 bias-field correction on T1-weighted MRI volumes through the external
`nu_correct` executable (MINC tools). The correction itself is entirely delegated; the
crate owns the conventions around it: default output names derived from the input,
a side-effect-free test mode, a private scratch workspace, optional compression of the
corrected volume, and cleanup.

Requirements
------------
- `nu_correct` (or a compatible tool) on `PATH`, or configured in [`BrickConfig`].
- `gzip` (or the configured compressor) for `.gz` outputs.

Quick start: correct a volume
-----------------------------
```rust,no_run
use nucorrect::{process, BrickConfig, NuCorrectInputs, NuCorrectOptions, NuCorrectOutputs};

fn main() -> nucorrect::Result<()> {
    let job = process(
        &NuCorrectInputs::new("/data/subj01.mnc.gz").with_mask("/data/subj01_mask.mnc"),
        &NuCorrectOutputs::default(),
        &NuCorrectOptions { flag_verbose: false, ..Default::default() },
        &BrickConfig::default(),
    )?;

    // /data/subj01_nu.mnc.gz and /data/subj01_nu.imp now exist
    println!("{:?}", job.outputs.t1_nu);
    Ok(())
}
```

Plan without running
--------------------
```rust
use nucorrect::{
    process, BrickConfig, NuCorrectInputs, NuCorrectOptions, NuCorrectOutputs, OutputTarget,
};

fn main() -> nucorrect::Result<()> {
    let job = process(
        &NuCorrectInputs::new("/data/subj01.mnc"),
        &NuCorrectOutputs { t1_imp: OutputTarget::Omitted, ..Default::default() },
        &NuCorrectOptions {
            flag_test: true,
            folder_out: Some("/out".into()),
            ..Default::default()
        },
        &BrickConfig::default(),
    )?;

    assert_eq!(job.outputs.t1_nu.as_deref(), Some(std::path::Path::new("/out/subj01_nu.mnc")));
    assert!(job.outputs.t1_imp.is_none());
    Ok(())
}
```

Error handling
--------------
All public functions return `nucorrect::Result<T>`; match on `nucorrect::Error` to handle
specific cases.

```rust,no_run
use nucorrect::{process, BrickConfig, Error, NuCorrectInputs, NuCorrectOptions, NuCorrectOutputs};

fn main() {
    let options = NuCorrectOptions { flag_verbose: false, ..Default::default() };
    match process(
        &NuCorrectInputs::new("/data/subj01.mnc"),
        &NuCorrectOutputs::default(),
        &options,
        &BrickConfig::default(),
    ) {
        Ok(_) => {}
        Err(Error::ExternalTool { command, output, .. }) => {
            eprintln!("{command} failed:\n{output}")
        }
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points (`process`, `run_job`).
- [`types`] — request structures and [`OutputTarget`].
- [`core`] — defaulting, name derivation, command construction, configuration.
- [`io`] — external process execution and filesystem operations.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::command::ExternalCommand;
pub use crate::core::defaults::{
    NuCorrectJob, ResolvedInputs, ResolvedOptions, ResolvedOutputs, resolve,
};
pub use crate::core::naming::VolumeName;
pub use crate::core::params::{BrickConfig, NuCorrectOptions};
pub use error::{Error, Result};
pub use types::{NuCorrectInputs, NuCorrectOutputs, OutputTarget};

pub use api::{process, run_job};
