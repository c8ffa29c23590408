//! Drives one image through the removal service and the screen transitions.

use crate::error::{RemovalError, TransitionError};
use crate::file_utils::{self, ImageFile};
use crate::resource::ImageResource;
use crate::services::notification_service::{Notice, Notifier};
use crate::services::removal_service::BackgroundRemover;
use crate::state::{ProcessingTicket, ScreenSession};
use log::{debug, error};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A request that has entered `Processing` and waits for the service.
#[derive(Debug)]
pub struct PendingRemoval {
    ticket: ProcessingTicket,
    file: ImageFile,
    original: ImageResource,
}

impl PendingRemoval {
    pub fn original(&self) -> &ImageResource {
        &self.original
    }
}

#[derive(Debug)]
pub enum ProcessOutcome {
    Completed { processed: ImageResource },
    Failed(RemovalError),
    /// The session moved on (teardown) before the service answered.
    Discarded,
}

pub struct ProcessingService<R> {
    remover: Arc<R>,
    session: Arc<Mutex<ScreenSession>>,
}

impl<R> Clone for ProcessingService<R> {
    fn clone(&self) -> Self {
        Self {
            remover: self.remover.clone(),
            session: self.session.clone(),
        }
    }
}

pub(crate) fn lock(session: &Mutex<ScreenSession>) -> MutexGuard<'_, ScreenSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<R: BackgroundRemover> ProcessingService<R> {
    pub fn new(remover: R, session: Arc<Mutex<ScreenSession>>) -> Self {
        Self {
            remover: Arc::new(remover),
            session,
        }
    }

    /// Enters `Processing` and creates the original preview.
    pub fn start(&self, file: ImageFile) -> Result<PendingRemoval, TransitionError> {
        let (ticket, original) = lock(&self.session).select_file(&file)?;
        Ok(PendingRemoval {
            ticket,
            file,
            original,
        })
    }

    /// Waits for the service and applies success or failure.
    ///
    /// Exactly one notice is sent for a current request; none for a discarded one.
    pub async fn finish(&self, pending: PendingRemoval, notifier: &dyn Notifier) -> ProcessOutcome {
        let PendingRemoval { ticket, file, .. } = pending;

        let result = self.remover.remove_background(&file).await;

        let mut session = lock(&self.session);
        if !session.is_current(ticket) {
            debug!("Discarding result for {}: session moved on", file.name());
            return ProcessOutcome::Discarded;
        }

        match result {
            Ok(bytes) => {
                let mime = file_utils::sniff_mime(&bytes, Path::new("result.png"));
                match session.complete(ticket, bytes, mime) {
                    Ok(processed) => {
                        drop(session);
                        notifier.notify(Notice::BackgroundRemoved);
                        ProcessOutcome::Completed { processed }
                    }
                    Err(_) => ProcessOutcome::Discarded,
                }
            }
            Err(e) => {
                error!("Background removal failed for {}: {}", file.name(), e);
                if session.fail(ticket).is_err() {
                    return ProcessOutcome::Discarded;
                }
                drop(session);
                notifier.notify(Notice::ProcessingFailed);
                ProcessOutcome::Failed(e)
            }
        }
    }

    /// `start` followed by `finish`.
    #[cfg(test)]
    pub async fn process(
        &self,
        file: ImageFile,
        notifier: &dyn Notifier,
    ) -> Result<ProcessOutcome, TransitionError> {
        let pending = self.start(file)?;
        Ok(self.finish(pending, notifier).await)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::Cell;
    use std::future::{self, Future};

    /// Answers every request with a fixed result.
    pub struct StubRemover {
        pub response: Result<Vec<u8>, u16>,
        pub calls: Cell<usize>,
    }

    impl StubRemover {
        pub fn ok(bytes: Vec<u8>) -> Self {
            Self {
                response: Ok(bytes),
                calls: Cell::new(0),
            }
        }

        pub fn status(code: u16) -> Self {
            Self {
                response: Err(code),
                calls: Cell::new(0),
            }
        }
    }

    impl BackgroundRemover for StubRemover {
        fn remove_background(
            &self,
            _file: &ImageFile,
        ) -> impl Future<Output = Result<Vec<u8>, RemovalError>> {
            self.calls.set(self.calls.get() + 1);
            future::ready(match &self.response {
                Ok(bytes) if bytes.is_empty() => Err(RemovalError::EmptyBody),
                Ok(bytes) => Ok(bytes.clone()),
                Err(code) => Err(RemovalError::Status(*code)),
            })
        }
    }
}
