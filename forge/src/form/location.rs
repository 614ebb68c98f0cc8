//! Region selector

use crate::models::region::{DEFAULT_REGION, REGIONS};

/// Selectable deployment regions with the current choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSelector {
    selected: &'static str,
}

impl LocationSelector {
    /// Selector populated with every region, `eastus` selected
    pub fn new() -> Self {
        Self {
            selected: DEFAULT_REGION,
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        &REGIONS
    }

    pub fn selected(&self) -> &'static str {
        self.selected
    }

    /// Select `code` if it is a listed region. Returns whether it was accepted.
    pub fn select(&mut self, code: &str) -> bool {
        match REGIONS.iter().find(|region| **region == code) {
            Some(region) => {
                self.selected = *region;
                true
            }
            None => false,
        }
    }
}

impl Default for LocationSelector {
    fn default() -> Self {
        Self::new()
    }
}
