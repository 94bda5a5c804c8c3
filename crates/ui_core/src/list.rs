use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Visibility of the collapsible job list panel.
pub trait ListService: Send + Sync {
    fn toggle(&self);
    fn close(&self);
    fn is_open(&self) -> bool;
}

pub struct SidenavListService {
    component_id: String,
    open: AtomicBool,
}

impl SidenavListService {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            open: AtomicBool::new(false),
        }
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }
}

impl Default for SidenavListService {
    fn default() -> Self {
        Self::new("left")
    }
}

impl ListService for SidenavListService {
    fn toggle(&self) {
        let was_open = self.open.fetch_xor(true, Ordering::SeqCst);
        debug!(component = %self.component_id, open = !was_open, "toggled list panel");
    }

    fn close(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            debug!(component = %self.component_id, "closed list panel");
        }
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}
