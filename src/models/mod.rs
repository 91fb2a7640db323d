pub mod employee;
pub mod message;
pub mod settings;
