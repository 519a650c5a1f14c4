pub mod client;
pub mod intervention;
pub mod invoice;
pub mod types;
