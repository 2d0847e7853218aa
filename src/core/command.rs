use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::core::defaults::NuCorrectJob;

/// Structured invocation of an external executable, run without a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new<S: Into<OsString>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: Into<OsString>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Build the `nu_correct` invocation for a resolved job.
    ///
    /// Order: tool, `-tmpdir <scratch>`, extra args, `-mask <mask>`, input, scratch output.
    pub fn nu_correct(
        tool: &str,
        job: &NuCorrectJob,
        scratch_dir: &Path,
        scratch_nu: &Path,
    ) -> Self {
        let mut cmd = Self::new(tool).arg("-tmpdir").arg(scratch_dir);
        for extra in job.options.arg.split_whitespace() {
            cmd = cmd.arg(extra);
        }
        if let Some(mask) = &job.inputs.mask {
            cmd = cmd.arg("-mask").arg(mask);
        }
        cmd.arg(&job.inputs.t1).arg(scratch_nu)
    }

    #[cfg(test)]
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl std::fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for a in &self.args {
            let a = a.to_string_lossy();
            if a.is_empty() || a.contains(char::is_whitespace) {
                write!(f, " {:?}", a)?;
            } else {
                write!(f, " {}", a)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::defaults::resolve;
    use crate::core::params::{BrickConfig, NuCorrectOptions};
    use crate::types::{NuCorrectInputs, NuCorrectOutputs};

    fn job(inputs: NuCorrectInputs, arg: &str) -> NuCorrectJob {
        let options = NuCorrectOptions {
            arg: arg.to_string(),
            ..Default::default()
        };
        resolve(
            &inputs,
            &NuCorrectOutputs::default(),
            &options,
            &BrickConfig::default(),
        )
        .unwrap()
    }

    fn rendered(cmd: &ExternalCommand) -> Vec<String> {
        cmd.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn argument_order_without_mask() {
        let job = job(NuCorrectInputs::new("/data/s.mnc"), "");
        let cmd = ExternalCommand::nu_correct(
            "nu_correct",
            &job,
            Path::new("/tmp/w"),
            Path::new("/tmp/w/s_nu.mnc"),
        );
        assert_eq!(cmd.program, OsString::from("nu_correct"));
        assert_eq!(
            rendered(&cmd),
            ["-tmpdir", "/tmp/w", "/data/s.mnc", "/tmp/w/s_nu.mnc"]
        );
        assert!(!cmd.has_arg("-mask"));
    }

    #[test]
    fn extra_args_and_mask_are_inserted_in_order() {
        let job = job(
            NuCorrectInputs::new("/data/s.mnc").with_mask("/data/roi.mnc"),
            "  -iterations 100   -distance 50 ",
        );
        let cmd = ExternalCommand::nu_correct(
            "nu_correct",
            &job,
            Path::new("/tmp/w"),
            Path::new("/tmp/w/s_nu.mnc"),
        );
        assert_eq!(
            rendered(&cmd),
            [
                "-tmpdir",
                "/tmp/w",
                "-iterations",
                "100",
                "-distance",
                "50",
                "-mask",
                "/data/roi.mnc",
                "/data/s.mnc",
                "/tmp/w/s_nu.mnc",
            ]
        );
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let cmd = ExternalCommand::new("nu_correct")
            .arg("-tmpdir")
            .arg("/tmp/my scratch");
        assert_eq!(cmd.to_string(), "nu_correct -tmpdir \"/tmp/my scratch\"");
    }
}
