//! Screen lifecycle: `Idle → Processing → Complete`, failure back to `Idle`.

use crate::error::TransitionError;
use crate::file_utils::ImageFile;
use crate::resource::{ImageResource, ResourceId, ResourceStore};
use log::{debug, info};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    Idle,
    Processing,
    Complete,
}

/// Identifies one removal request. Results carrying an outdated ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingTicket(u64);

/// Top-level view state: the active screen plus the two image resources.
///
/// The session is the only owner of the resources and the only place that
/// revokes them.
#[derive(Default)]
pub struct ScreenSession {
    state: ScreenState,
    original: Option<ImageResource>,
    processed: Option<ImageResource>,
    generation: u64,
    store: ResourceStore,
}

impl ScreenSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> ScreenState {
        self.state
    }

    #[cfg(test)]
    pub fn original(&self) -> Option<&ImageResource> {
        self.original.as_ref()
    }

    #[cfg(test)]
    pub fn processed(&self) -> Option<&ImageResource> {
        self.processed.as_ref()
    }

    /// Whether the upload control should be enabled.
    pub fn accepts_upload(&self) -> bool {
        self.state == ScreenState::Idle
    }

    /// `Idle --select--> Processing`. Creates the original preview resource.
    pub fn select_file(
        &mut self,
        file: &ImageFile,
    ) -> Result<(ProcessingTicket, ImageResource), TransitionError> {
        match self.state {
            ScreenState::Idle => {}
            ScreenState::Processing => return Err(TransitionError::Busy),
            ScreenState::Complete => return Err(TransitionError::NotIdle),
        }

        self.generation += 1;
        let original = self.store.create(file.bytes().to_vec(), file.mime());
        self.original = Some(original.clone());
        self.state = ScreenState::Processing;
        info!("Processing {} ({} bytes)", file.name(), file.len());

        Ok((ProcessingTicket(self.generation), original))
    }

    /// `Processing --success--> Complete`. Creates the processed resource.
    pub fn complete(
        &mut self,
        ticket: ProcessingTicket,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<ImageResource, TransitionError> {
        self.check_ticket(ticket)?;

        let processed = self.store.create(bytes, mime);
        self.processed = Some(processed.clone());
        self.state = ScreenState::Complete;
        info!("Background removed ({} bytes)", processed.len());

        Ok(processed)
    }

    /// `Processing --failure--> Idle`. Revokes the original preview.
    pub fn fail(&mut self, ticket: ProcessingTicket) -> Result<(), TransitionError> {
        self.check_ticket(ticket)?;

        self.release_all();
        self.state = ScreenState::Idle;
        Ok(())
    }

    /// `Complete --reset--> Idle`. Rejected from any other state.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.state != ScreenState::Complete {
            return Err(TransitionError::NotComplete);
        }

        self.release_all();
        self.state = ScreenState::Idle;
        debug!("Session reset");
        Ok(())
    }

    /// Releases everything and invalidates any in-flight request.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.release_all();
        self.state = ScreenState::Idle;
        debug!("Session torn down");
    }

    /// Bytes behind one of this session's resources.
    pub fn fetch(&self, resource: &ImageResource) -> Option<Arc<[u8]>> {
        self.store.fetch(resource)
    }

    /// Processed result, only available on the complete screen.
    pub fn processed_bytes(&self) -> Result<(Arc<[u8]>, ImageResource), TransitionError> {
        if self.state != ScreenState::Complete {
            return Err(TransitionError::NotComplete);
        }
        let processed = self.processed.as_ref().ok_or(TransitionError::NotComplete)?;
        let bytes = self.store.fetch(processed).ok_or(TransitionError::Stale)?;
        Ok((bytes, processed.clone()))
    }

    pub fn is_live(&self, id: ResourceId) -> bool {
        self.store.is_live(id)
    }

    pub fn is_current(&self, ticket: ProcessingTicket) -> bool {
        self.state == ScreenState::Processing && ticket.0 == self.generation
    }

    fn check_ticket(&self, ticket: ProcessingTicket) -> Result<(), TransitionError> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(TransitionError::Stale)
        }
    }

    fn release_all(&mut self) {
        for resource in [self.original.take(), self.processed.take()].into_iter().flatten() {
            self.store.revoke(&resource);
        }
    }

    #[cfg(test)]
    pub(crate) fn live_resources(&self) -> usize {
        self.store.live_count()
    }
}
