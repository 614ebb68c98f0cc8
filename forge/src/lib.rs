//! HostForge client library
//!
//! Validates static-site deployment parameters and submits them to a
//! HostForge backend: health check first, then the multipart deploy.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod form;
pub mod http;
pub mod logs;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;
