//! Image decoding and display logic.
//!
//! Uses `rayon::spawn` for decoding, then `slint::invoke_from_event_loop` to
//! update the UI from the background thread.

use crate::image_loader;
use crate::resource::ImageResource;
use crate::services::processing_service::lock;
use crate::state::ScreenSession;
use log::{debug, warn};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Original,
    Processed,
}

/// Decodes a session resource in the background and shows it in `slot`.
///
/// The result is dropped if the resource was revoked while decoding.
pub fn display_resource(
    ui: slint::Weak<crate::AppWindow>,
    session: Arc<Mutex<ScreenSession>>,
    resource: ImageResource,
    slot: ImageSlot,
) {
    if resource.is_empty() {
        debug!("{:?} resource is empty, nothing to show", slot);
        return;
    }
    let Some(bytes) = lock(&session).fetch(&resource) else {
        debug!("{:?} resource already released", slot);
        return;
    };

    rayon::spawn(move || {
        let decoded = image_loader::decode_image(&bytes);

        let _ = slint::invoke_from_event_loop(move || {
            let Some(ui) = ui.upgrade() else {
                return;
            };
            if !lock(&session).is_live(resource.id()) {
                debug!("Dropping stale {:?} image", slot);
                return;
            }

            match decoded {
                Ok(decoded) => {
                    let image = image_loader::create_slint_image(decoded);
                    match slot {
                        ImageSlot::Original => crate::ui::set_original_image(&ui, Some(image)),
                        ImageSlot::Processed => crate::ui::set_processed_image(&ui, Some(image)),
                    }
                }
                // not strictly an image; the upload still goes ahead
                Err(e) => warn!("Cannot preview {:?} image ({}): {}", slot, resource.mime(), e),
            }
        });
    });
}
