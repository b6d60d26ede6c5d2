use serde::Serialize;

use crate::errors::StoreError;
use crate::store::Store;

/// Headline numbers shown above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub candidates: usize,
    pub open_openings: usize,
}

impl DashboardMetrics {
    /// Query both counters concurrently.
    pub async fn collect(store: &dyn Store) -> Result<Self, StoreError> {
        let (candidates, open_openings) =
            tokio::try_join!(store.count_candidates(), store.count_open_openings())?;
        Ok(Self {
            candidates,
            open_openings,
        })
    }
}
