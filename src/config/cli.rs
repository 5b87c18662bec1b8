use crate::app::RunOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "plan-describer")]
#[command(about = "Rewrite plan descriptions to list the APIs each plan includes")]
pub struct CliConfig {
    /// Package UUID (required if Plan UUID is specified)
    #[arg(short = 'g', long = "package")]
    pub package: Option<String>,

    /// Plan UUID
    #[arg(short = 'n', long = "plan")]
    pub plan: Option<String>,

    /// Target area UUID for the token request
    #[arg(short = 'a', long = "area")]
    pub area: Option<String>,

    /// Print verbose progress and debugging information
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "plan-describer.toml")]
    pub config: PathBuf,

    /// Compute descriptions without updating any plan
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl From<CliConfig> for RunOptions {
    fn from(cli: CliConfig) -> Self {
        Self {
            config_path: cli.config,
            package: cli.package,
            plan: cli.plan,
            area: cli.area,
            verbose: cli.verbose,
            dry_run: cli.dry_run,
            json_logs: cli.json_logs,
        }
    }
}
