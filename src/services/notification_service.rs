//! User-facing notifications.

use log::{info, warn};

/// Events the user is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    BackgroundRemoved,
    ProcessingFailed,
    DownloadSaved,
    DownloadFailed,
    ShareCompleted,
    LinkCopied,
    ShareFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::BackgroundRemoved => "Background removed beautifully",
            Notice::ProcessingFailed => "Something went wrong",
            Notice::DownloadSaved => "Image saved successfully",
            Notice::DownloadFailed => "Download failed",
            Notice::ShareCompleted => "Image copied, ready to paste",
            Notice::LinkCopied => "Link copied",
            Notice::ShareFailed => "Share failed",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            Notice::ProcessingFailed | Notice::DownloadFailed | Notice::ShareFailed
        )
    }
}

/// Sink for notices (a toast in the UI).
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Notifier that only writes to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            warn!("{}", notice.message());
        } else {
            info!("{}", notice.message());
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_errors() {
        assert!(Notice::ProcessingFailed.is_error());
        assert!(Notice::DownloadFailed.is_error());
        assert!(Notice::ShareFailed.is_error());
        assert!(!Notice::BackgroundRemoved.is_error());
        assert!(!Notice::LinkCopied.is_error());
    }
}
