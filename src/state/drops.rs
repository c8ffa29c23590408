//! File drops onto the window.
//!
//! winit reports a multi-file drop as consecutive `DroppedFile` events, one per
//! file. Only the first file of a drop is considered, and the decision is taken
//! synchronously in the event hook so that the order of the later async reads
//! cannot change which file wins.

use crate::file_utils;
use log::debug;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct DropFilter {
    /// The current drop already produced its first file.
    claimed: bool,
}

impl DropFilter {
    /// Any window event other than a dropped file ends the current drop.
    pub fn end_drop(&mut self) {
        self.claimed = false;
    }

    /// Decides whether a dropped file should be uploaded.
    ///
    /// Returns the path only for the first file of a drop, and only if the
    /// upload screen is active and that file is a supported image. An
    /// unsupported first file rejects the whole drop.
    pub fn accept(&mut self, path: &Path, accepts_upload: bool) -> Option<PathBuf> {
        if std::mem::replace(&mut self.claimed, true) {
            debug!("Ignoring {}: only the first dropped file is used", path.display());
            return None;
        }
        if !accepts_upload {
            debug!("Ignoring {}: an image is already loaded", path.display());
            return None;
        }
        if !file_utils::is_supported_image(path) {
            debug!("Ignoring drop: {} is not a supported image", path.display());
            return None;
        }
        Some(path.to_path_buf())
    }
}
