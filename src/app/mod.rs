use crate::adapters::{ApiClient, Authenticator, ClientConfig};
use crate::config::AppConfig;
use crate::core::{RunReport, TraversalDriver, TraversalMode};
use crate::utils::error::{DescriberError, Result};
use crate::utils::progress::PackageProgress;
use crate::utils::validation::Validate;
use std::path::PathBuf;

/// 執行參數，與 CLI 解析器無關
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub package: Option<String>,
    pub plan: Option<String>,
    pub area: Option<String>,
    pub verbose: bool,
    pub dry_run: bool,
    pub json_logs: bool,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Invalid flag combination; the caller prints usage and exits cleanly.
    Usage(String),
    Completed(RunReport),
}

/// 進度條只在走訪全部 package、且輸出不是 debug 或 JSON log 時顯示
pub fn show_progress(options: &RunOptions, mode: &TraversalMode) -> bool {
    !options.verbose && !options.json_logs && *mode == TraversalMode::AllPackages
}

pub fn banner(options: &RunOptions, area: &str) -> String {
    let mut lines = vec![
        "Update Plan Description".to_string(),
        "-----------------------".to_string(),
        format!(
            "Verbose: .............. {}",
            if options.verbose { "on" } else { "off" }
        ),
        format!("Area UUID: ............ {}", area),
        format!(
            "Package UUID: ......... {}",
            options.package.as_deref().unwrap_or("all")
        ),
        format!(
            "Plan UUID: ............ {}",
            options.plan.as_deref().unwrap_or("all")
        ),
    ];
    if options.dry_run {
        lines.push("Dry run: .............. on".to_string());
    }
    lines.join("\n")
}

/// Usage problems are detected before any network call is made.
pub async fn run(options: &RunOptions) -> Result<RunOutcome> {
    let mode = match TraversalMode::select(options.package.as_deref(), options.plan.as_deref()) {
        Ok(mode) => mode,
        Err(DescriberError::UsageError { message }) => return Ok(RunOutcome::Usage(message)),
        Err(e) => return Err(e),
    };

    tracing::debug!("📁 Loading configuration from {}", options.config_path.display());
    let config = AppConfig::from_file(&options.config_path)?;
    config.validate()?;
    tracing::debug!("Configuration: {:?}", config);

    let Some(area) = config.resolve_area(options.area.as_deref()) else {
        return Ok(RunOutcome::Usage(
            "no --area given and account.area_uuid is not configured".to_string(),
        ));
    };

    println!("{}\n", banner(options, &area));

    let token = Authenticator::new(config.token_url()?)?
        .authenticate(&config.credentials(), &area)
        .await?;
    tracing::info!("🔑 Authenticated as {}", config.account.user_id);

    let client_config = ClientConfig::new(config.base_url()?, token).with_page_size(config.page_size());
    let client = ApiClient::new(client_config)?;

    let report = TraversalDriver::new(&client)
        .with_dry_run(options.dry_run)
        .with_progress(PackageProgress::new(show_progress(options, &mode)))
        .run(&mode)
        .await?;

    tracing::info!(
        "✅ Visited {} plans, updated {}, {} failures",
        report.plans_visited(),
        report.plans_updated(),
        report.failures.len()
    );
    Ok(RunOutcome::Completed(report))
}
