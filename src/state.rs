use crate::config::Config;
use crate::models::Report;
use std::sync::{Arc, Mutex};

/// Session-scoped store for the report derived from the latest upload.
///
/// A new upload rebuilds and replaces the whole value; nothing persists
/// across restarts.
#[derive(Clone, Default)]
pub struct ReportStore(Arc<Mutex<Option<Arc<Report>>>>);

impl ReportStore {
    pub fn current(&self) -> Option<Arc<Report>> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn replace(&self, report: Report) -> Arc<Report> {
        let report = Arc::new(report);
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = Some(Arc::clone(&report));
        report
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reports: ReportStore,
}
