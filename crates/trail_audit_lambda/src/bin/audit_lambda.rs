use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use trail_audit_lambda::adapters::aws::{S3ObjectLister, SnsAlertPublisher};
use trail_audit_lambda::config::AuditConfig;
use trail_audit_lambda::handlers::audit::handle_audit_event;
use trail_audit_lambda::telemetry::init_lambda_tracing;

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    tracing::info!(
        component = "audit_lambda",
        request_id = %event.context.request_id,
        function_arn = %event.context.invoked_function_arn,
        "invocation received"
    );

    let config = AuditConfig::from_env()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let lister = S3ObjectLister::new(aws_sdk_s3::Client::new(&aws_config));
    let publisher = SnsAlertPublisher::new(aws_sdk_sns::Client::new(&aws_config));

    let summary = handle_audit_event(&event.payload, &config, Utc::now(), &lister, &publisher)?;
    serde_json::to_value(summary)
        .map_err(|error| Error::from(format!("failed to serialize audit summary: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_lambda_tracing();
    lambda_runtime::run(service_fn(handle_request)).await
}
