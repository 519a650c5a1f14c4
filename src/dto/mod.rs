pub mod api;
pub mod client;
pub mod intervention;
pub mod invoice;
