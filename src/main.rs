use clap::{CommandFactory, Parser};
use plan_describer::utils::logger;
use plan_describer::{run, CliConfig, RunOptions, RunOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let options = RunOptions::from(config);

    match run(&options).await {
        Ok(RunOutcome::Usage(reason)) => {
            tracing::debug!("Usage error: {}", reason);
            eprintln!("{}\n", reason);
            CliConfig::command().print_help()?;
            println!();
        }
        Ok(RunOutcome::Completed(report)) => {
            println!("\n{}", report);
            if report.has_failures() {
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
