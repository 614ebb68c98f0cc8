//! Backend communication

pub mod backend;
pub mod client;
