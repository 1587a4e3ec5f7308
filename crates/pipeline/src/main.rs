use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use battmon_pipeline::{run, PipelineConfig};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "battmon_pipeline=info,battmon_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PipelineConfig::from_env();

    match run(&config) {
        Ok(summary) => {
            println!("Rule anomalies : {}", summary.rule_anomalies);
            println!("ML anomalies   : {}", summary.ml_anomalies);
            println!("Final anomalies: {}", summary.final_anomalies);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Classification failed");
            ExitCode::FAILURE
        }
    }
}
