//! Presentation: the presenter seam, notifications and the terminal renderer

pub mod notify;
pub mod presenter;
pub mod terminal;
