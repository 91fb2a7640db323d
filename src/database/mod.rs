pub mod connection;
pub mod stores;
