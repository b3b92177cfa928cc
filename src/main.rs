use std::process::ExitCode;

use anyhow::Context;
use bookstore_queries::QueryRunner;
use bookstore_queries::config::ConfigManager;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let target = ConfigManager::new()?.load_target()?;
    log::info!("Running queries against {} on {}", target.namespace(), target.uri);

    let runner = QueryRunner::new(target).context("Failed to start Tokio runtime")?;
    runner.run(std::io::stdout().lock())?;
    Ok(())
}
