//! Application layer: options, the form controller and the CLI entry points

pub mod controller;
pub mod options;
pub mod run;
