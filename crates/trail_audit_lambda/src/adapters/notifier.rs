use crate::runtime::alert::AlertMessage;

/// Delivers an alert once and returns the delivery id reported by the channel.
pub trait AlertPublisher {
    fn publish(&self, destination: &str, message: &AlertMessage) -> Result<String, String>;
}
