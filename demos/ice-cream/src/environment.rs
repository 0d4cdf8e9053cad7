//! Dependencies injected into the parlour reducers

use parlour_client::MenuApi;
use std::sync::Arc;

/// Environment shared by the menu, stock and editor reducers
#[derive(Clone)]
pub struct ParlourEnvironment {
    /// Backend the reducers' effects talk to
    pub api: Arc<dyn MenuApi>,
}

impl ParlourEnvironment {
    /// Wrap any [`MenuApi`] implementation
    pub fn new(api: impl MenuApi + 'static) -> Self {
        Self { api: Arc::new(api) }
    }

    /// Share an existing handle, e.g. a mock the test keeps inspecting
    #[must_use]
    pub fn from_arc(api: Arc<dyn MenuApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for ParlourEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParlourEnvironment").finish_non_exhaustive()
    }
}
