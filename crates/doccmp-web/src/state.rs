use std::sync::Arc;

use doccmp_core::{Comparator, Config, Result};

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub comparator: Arc<Comparator>,
    pub documents: Config,
}

impl AppState {
    /// Loads the linguistic resources once; a missing resource stops startup.
    pub fn new(documents: Config) -> Result<Self> {
        let comparator = Comparator::new(&documents)?;
        Ok(Self {
            comparator: Arc::new(comparator),
            documents,
        })
    }
}
