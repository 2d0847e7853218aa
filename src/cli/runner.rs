use tracing::info;
use tracing_subscriber::EnvFilter;

use nucorrect::{
    BrickConfig, NuCorrectInputs, NuCorrectJob, NuCorrectOptions, NuCorrectOutputs, OutputTarget,
    process,
};

use super::args::CliArgs;
use super::errors::AppError;

fn load_config(args: &CliArgs) -> Result<BrickConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => BrickConfig::from_json_file(path)?,
        None => BrickConfig::default(),
    };
    if let Some(tool) = &args.tool {
        config.tool = tool.clone();
    }
    config.validate()?;
    Ok(config)
}

fn report(job: &NuCorrectJob, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(job)?);
        return Ok(());
    }
    let show = |p: &Option<std::path::PathBuf>| match p {
        Some(p) => p.display().to_string(),
        None => "<omitted>".to_string(),
    };
    info!("t1_nu:  {}", show(&job.outputs.t1_nu));
    info!("t1_imp: {}", show(&job.outputs.t1_imp));
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = load_config(&args)?;

    let inputs = NuCorrectInputs {
        t1: args.t1.clone(),
        mask: args.mask.clone(),
    };
    let outputs = NuCorrectOutputs {
        t1_nu: OutputTarget::from_flags(args.t1_nu.clone(), args.no_t1_nu),
        t1_imp: OutputTarget::from_flags(args.t1_imp.clone(), args.no_t1_imp),
    };
    let options = NuCorrectOptions {
        arg: args.arg.clone(),
        flag_verbose: !args.quiet,
        flag_test: args.test,
        folder_out: args.folder_out.clone(),
        timeout_secs: args.timeout,
    };

    let job = process(&inputs, &outputs, &options, &config).map_err(AppError::from)?;
    report(&job, args.json)?;
    if !job.options.flag_test {
        info!("Successfully corrected: {:?}", job.inputs.t1);
    }
    Ok(())
}
