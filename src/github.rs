pub mod client;
pub mod pulls;
pub mod repo;
