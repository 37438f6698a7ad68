use std::sync::Arc;

use tokio::sync::Mutex;

use crate::board::state::BoardState;
use crate::error::AppResult;
use crate::services::{fetcher::PageFetcher, store::SnapshotStore};
use crate::usecases::board::SharedBoard;

#[derive(Clone)]
pub struct AppState {
    pub board: SharedBoard,
    pub store: SnapshotStore,
    pub fetcher: PageFetcher,
}

impl AppState {
    pub fn new(initial: BoardState, store: SnapshotStore) -> AppResult<Self> {
        Ok(Self {
            board: Arc::new(Mutex::new(initial)),
            store,
            fetcher: PageFetcher::from_env()?,
        })
    }
}
