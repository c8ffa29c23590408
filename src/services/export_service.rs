//! Download and share actions for a completed result.

use crate::config::{DOWNLOAD_FILE_PREFIX, ShareMode};
use crate::error::ExportError;
use crate::file_utils;
use crate::image_loader;
use crate::services::clipboard_service::ClipboardService;
use crate::services::notification_service::{Notice, Notifier};
use crate::services::processing_service::lock;
use crate::state::ScreenSession;
use chrono::{DateTime, Utc};
use log::{info, warn};
use rfd::AsyncFileDialog;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const SHARED_FILE_NAME: &str = "eraser-result.png";

/// Destination for downloaded files.
pub trait FileSaver {
    /// Saves `bytes`, returning where they went or `None` if the user cancelled.
    fn save(
        &self,
        suggested_name: &str,
        bytes: &[u8],
    ) -> impl Future<Output = Result<Option<PathBuf>, ExportError>>;
}

/// Asks for the destination with a native save dialog.
///
/// Must be driven from the UI thread (`slint::spawn_local`).
pub struct DialogFileSaver;

impl FileSaver for DialogFileSaver {
    async fn save(&self, suggested_name: &str, bytes: &[u8]) -> Result<Option<PathBuf>, ExportError> {
        let extension = suggested_name.rsplit('.').next().unwrap_or("png");
        let Some(handle) = AsyncFileDialog::new()
            .set_file_name(suggested_name)
            .add_filter("Image", &[extension])
            .save_file()
            .await
        else {
            return Ok(None);
        };

        handle.write(bytes).await?;
        Ok(Some(handle.path().to_path_buf()))
    }
}

/// Platform sharing capability.
pub trait ShareTarget {
    /// Whether the image itself can be handed to the platform.
    fn can_share_image(&self) -> bool;
    fn share_image(&self, file_name: &str, bytes: &[u8]) -> Result<(), ExportError>;
    fn copy_link(&self, url: &str) -> Result<(), ExportError>;
}

/// Shares through the system clipboard.
pub struct ClipboardShareTarget {
    clipboard: ClipboardService,
    mode: ShareMode,
}

impl ClipboardShareTarget {
    pub fn new(mode: ShareMode) -> Self {
        Self {
            clipboard: ClipboardService::new(),
            mode,
        }
    }
}

impl ShareTarget for ClipboardShareTarget {
    fn can_share_image(&self) -> bool {
        self.mode == ShareMode::Image
    }

    fn share_image(&self, file_name: &str, bytes: &[u8]) -> Result<(), ExportError> {
        let decoded = image_loader::decode_image(bytes)?;
        info!("Sharing {} as clipboard image", file_name);
        self.clipboard.copy_image(decoded)?;
        Ok(())
    }

    fn copy_link(&self, url: &str) -> Result<(), ExportError> {
        self.clipboard.copy_text(url)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    SharedImage,
    LinkCopied,
}

/// File name for a download made at `now`, e.g. `eraser-1700000000000.png`.
pub fn download_file_name(bytes: &[u8], now: DateTime<Utc>) -> String {
    format!(
        "{}-{}.{}",
        DOWNLOAD_FILE_PREFIX,
        now.timestamp_millis(),
        file_utils::extension_for(bytes)
    )
}

pub struct ExportService {
    session: Arc<Mutex<ScreenSession>>,
    page_url: String,
}

impl ExportService {
    pub fn new(session: Arc<Mutex<ScreenSession>>, page_url: impl Into<String>) -> Self {
        Self {
            session,
            page_url: page_url.into(),
        }
    }

    /// Saves the processed image. Only valid on the complete screen.
    ///
    /// A cancelled save dialog is not reported to the user.
    pub async fn download<S: FileSaver>(
        &self,
        saver: &S,
        notifier: &dyn Notifier,
    ) -> Result<Option<PathBuf>, ExportError> {
        let (bytes, _) = lock(&self.session).processed_bytes()?;
        let file_name = download_file_name(&bytes, Utc::now());

        match saver.save(&file_name, &bytes).await {
            Ok(Some(path)) => {
                info!("Saved result to {}", path.display());
                notifier.notify(Notice::DownloadSaved);
                Ok(Some(path))
            }
            Ok(None) => {
                info!("Download cancelled");
                Ok(None)
            }
            Err(e) => {
                warn!("Download failed: {}", e);
                notifier.notify(Notice::DownloadFailed);
                Err(e)
            }
        }
    }

    /// Shares the processed image, or copies the page link when the target
    /// cannot take images. Only valid on the complete screen.
    pub fn share<T: ShareTarget>(
        &self,
        target: &T,
        notifier: &dyn Notifier,
    ) -> Result<ShareOutcome, ExportError> {
        let (bytes, _) = lock(&self.session).processed_bytes()?;

        let result = if target.can_share_image() {
            target
                .share_image(SHARED_FILE_NAME, &bytes)
                .map(|()| ShareOutcome::SharedImage)
        } else {
            target
                .copy_link(&self.page_url)
                .map(|()| ShareOutcome::LinkCopied)
        };

        match result {
            Ok(ShareOutcome::SharedImage) => notifier.notify(Notice::ShareCompleted),
            Ok(ShareOutcome::LinkCopied) => notifier.notify(Notice::LinkCopied),
            Err(ref e) => {
                warn!("Share failed: {}", e);
                notifier.notify(Notice::ShareFailed);
            }
        }
        result
    }
}
