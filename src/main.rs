use std::process::ExitCode;
use storyspoil::configuration::get_configuration;
use storyspoil::scenario::run_suite;
use storyspoil::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let subscriber = get_subscriber("storyspoil".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let report = match run_suite(&configuration).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Suite setup failed, no step was run"
            );
            eprintln!("{:?}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", report);
    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
