use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to list objects in bucket '{bucket}': {message}")]
    ListingFailure { bucket: String, message: String },

    #[error("failed to publish alert to '{destination}': {message}")]
    NotificationFailure {
        destination: String,
        message: String,
    },

    #[error("{0} must be configured")]
    ConfigurationMissing(&'static str),

    #[error("{key} is invalid: {message}")]
    ConfigurationInvalid { key: &'static str, message: String },

    #[error("unknown time zone '{0}'")]
    InvalidTimeZone(String),
}
