pub mod aws;
pub mod notifier;
pub mod object_listing;
