//! State management for the application.

use crate::config::AppConfig;
use crate::services::{ExportService, HttpBackgroundRemover, ProcessingService};
use crate::theme::{ThemeContext, ThemeMode};
use crate::widgets::{ComparisonSlider, PointerHub};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

pub mod drops;
pub mod screen;

pub use drops::DropFilter;
pub use screen::{ProcessingTicket, ScreenSession, ScreenState};

/// Application-wide state container.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<Mutex<ScreenSession>>,
    pub processing: ProcessingService<HttpBackgroundRemover>,
    pub exports: Rc<ExportService>,
    /// Window-scoped pointer listeners, fed by the winit event hook.
    pub pointer_hub: PointerHub,
    /// Mounted only while the complete screen is shown.
    pub slider: Rc<RefCell<Option<ComparisonSlider>>>,
    /// Sample comparison on the upload screen, mounted for the whole run.
    pub demo_slider: Rc<RefCell<Option<ComparisonSlider>>>,
    pub drops: Rc<RefCell<DropFilter>>,
    pub theme: ThemeContext,
    /// Task waiting for the removal service.
    pub in_flight: Rc<RefCell<Option<slint::JoinHandle<()>>>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let session = Arc::new(Mutex::new(ScreenSession::new()));
        Self {
            processing: ProcessingService::new(HttpBackgroundRemover::new(&config), session.clone()),
            exports: Rc::new(ExportService::new(session.clone(), config.page_url.clone())),
            session,
            config,
            pointer_hub: PointerHub::new(),
            slider: Rc::new(RefCell::new(None)),
            demo_slider: Rc::new(RefCell::new(None)),
            drops: Rc::new(RefCell::new(DropFilter::default())),
            theme: ThemeContext::new(ThemeMode::default()),
            in_flight: Rc::new(RefCell::new(None)),
        }
    }

    /// Unmounts the slider.
    pub fn unmount_slider(&self) {
        self.slider.borrow_mut().take();
    }

    /// Cancels the in-flight request and releases every resource.
    pub fn teardown(&self) {
        if let Some(task) = self.in_flight.borrow_mut().take() {
            task.abort();
        }
        self.unmount_slider();
        self.demo_slider.borrow_mut().take();
        crate::services::processing_service::lock(&self.session).teardown();
    }
}
