//! File picker and drag-and-drop acquisition

use crate::form::validate::ZIP_WRONG_TYPE;
use crate::models::attachment::ZipAttachment;

/// Accept a picked or dropped file only if it is named like a ZIP archive
pub fn accept_file(candidate: ZipAttachment) -> Result<ZipAttachment, String> {
    if candidate.has_zip_suffix() {
        Ok(candidate)
    } else {
        Err(format!("{}.", ZIP_WRONG_TYPE))
    }
}

/// Drop target highlight. Nothing about a drag is remembered once it ends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DropZone {
    highlighted: bool,
}

impl DropZone {
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Returns true if the highlight changed
    pub fn drag_over(&mut self) -> bool {
        !std::mem::replace(&mut self.highlighted, true)
    }

    /// Returns true if the highlight changed
    pub fn drag_leave(&mut self) -> bool {
        std::mem::replace(&mut self.highlighted, false)
    }

    /// End the drag and hand back the first dropped file, if any
    pub fn drop_files(&mut self, files: Vec<ZipAttachment>) -> Option<ZipAttachment> {
        self.highlighted = false;
        files.into_iter().next()
    }
}
