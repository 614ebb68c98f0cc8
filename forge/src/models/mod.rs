//! Data models exchanged with the deploy backend

pub mod attachment;
pub mod deploy;
pub mod region;
