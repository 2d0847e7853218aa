use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nucorrect",
    version,
    about = "Non-uniformity correction of T1 volumes via nu_correct"
)]
pub struct CliArgs {
    /// T1 volume to correct (required)
    #[arg(long)]
    pub t1: Option<PathBuf>,

    /// Optional mask restricting the bias field estimation
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Corrected volume (default: <folder-out>/<base>_nu<ext>)
    #[arg(long)]
    pub t1_nu: Option<PathBuf>,

    /// Do not keep the corrected volume
    #[arg(long, default_value_t = false, conflicts_with = "t1_nu")]
    pub no_t1_nu: bool,

    /// Intensity mapping file (default: <folder-out>/<base>_nu.imp)
    #[arg(long)]
    pub t1_imp: Option<PathBuf>,

    /// Do not keep the intensity mapping file
    #[arg(long, default_value_t = false, conflicts_with = "t1_imp")]
    pub no_t1_imp: bool,

    /// Output directory (default: directory of the T1 volume)
    #[arg(long)]
    pub folder_out: Option<PathBuf>,

    /// Extra arguments passed to the tool, e.g. "-iterations 100 -distance 50"
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub arg: String,

    /// Capture the tool's output instead of streaming it
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Resolve output names only; run nothing
    #[arg(long, default_value_t = false)]
    pub test: bool,

    /// Kill the tool after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// JSON configuration file (tool, zip_command, zip_ext, tmp_root)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the correction executable
    #[arg(long)]
    pub tool: Option<String>,

    /// Print the resolved job as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
