use std::{sync::Arc, time::Duration};

use api_types::{budget::Budget, page::PaginatedCollection};
use tokio::{sync::Mutex, time::Instant};

/// The last budget page fetched, with the request that produced it.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub data: PaginatedCollection<Budget>,
    pub fetched_at: Instant,
    pub page: u32,
    pub size: u32,
}

impl CacheEntry {
    fn serves(&self, page: u32, size: u32, ttl: Duration) -> bool {
        self.page == page && self.size == size && self.fetched_at.elapsed() < ttl
    }
}

/// Single-slot budget list cache shared by every clone of a client.
///
/// The lock is only held while reading or replacing the slot, never across a
/// request.
#[derive(Clone, Debug)]
pub(crate) struct BudgetCache {
    ttl: Duration,
    slot: Arc<Mutex<Option<CacheEntry>>>,
}

impl BudgetCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) async fn lookup(&self, page: u32, size: u32) -> Option<PaginatedCollection<Budget>> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|entry| entry.serves(page, size, self.ttl))
            .map(|entry| entry.data.clone())
    }

    pub(crate) async fn store(&self, page: u32, size: u32, data: PaginatedCollection<Budget>) {
        *self.slot.lock().await = Some(CacheEntry {
            data,
            fetched_at: Instant::now(),
            page,
            size,
        });
    }

    pub(crate) async fn clear(&self) {
        self.slot.lock().await.take();
    }

    pub(crate) async fn snapshot(&self) -> Option<CacheEntry> {
        self.slot.lock().await.clone()
    }
}
