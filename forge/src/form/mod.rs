//! Deploy form building blocks: region selection, validation, file acquisition

pub mod file;
pub mod location;
pub mod validate;
