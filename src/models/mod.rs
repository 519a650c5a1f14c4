pub mod client;
pub mod config;
pub mod intervention;
pub mod invoice;
