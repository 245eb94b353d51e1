use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use trail_audit_lambda::adapters::aws::S3ObjectLister;
use trail_audit_lambda::config::{parse_time_zone, DEFAULT_TIMEZONE, TIMEZONE_VAR};
use trail_audit_lambda::error::AuditError;
use trail_audit_lambda::handlers::check::{
    run_check, CheckOptions, CheckReport, OutputFormat, EXIT_FAILURE,
};
use trail_audit_lambda::telemetry::init_cli_tracing;

#[derive(Parser)]
#[command(
    name = "trail_audit",
    about = "Find AWS accounts that stopped delivering CloudTrail logs to a bucket",
    long_about = "Lists every object in the bucket, finds the latest CloudTrail upload per\n\
                  account and region, and exits 1 when an account has no activity since\n\
                  the start of yesterday."
)]
struct Cli {
    /// Bucket that receives the CloudTrail logs
    bucket: String,
    /// IANA time zone whose calendar defines "yesterday"
    #[arg(long, env = TIMEZONE_VAR, default_value = DEFAULT_TIMEZONE)]
    time_zone: String,
    /// Output format
    #[arg(value_enum, long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Also print individual stale regions
    #[arg(long)]
    show_regions: bool,
}

async fn check(cli: Cli) -> Result<CheckReport, AuditError> {
    let options = CheckOptions {
        bucket: cli.bucket,
        time_zone: parse_time_zone(&cli.time_zone)?,
        format: cli.format,
        show_regions: cli.show_regions,
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let lister = S3ObjectLister::new(aws_sdk_s3::Client::new(&aws_config));

    run_check(&options, Utc::now(), &lister)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_cli_tracing();
    let cli = Cli::parse();

    match check(cli).await {
        Ok(report) => {
            print!("{}", report.output);
            ExitCode::from(report.exit_code)
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
