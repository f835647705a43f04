use crate::domain::cart::PhotographerId;
use crate::domain::catalog::{EventId, EventPhoto, Photographer, SportEvent};
use crate::domain::checkout::{PaymentAck, PaymentSubmission};
use crate::domain::ports::{Clipboard, EventCatalog, PaymentGateway, PhotographerDirectory};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory photographer directory.
///
/// Uses `Arc<RwLock<HashMap>>` to allow shared concurrent access. Ideal for
/// tests and for seeding the CLI from a CSV file.
#[derive(Default, Clone)]
pub struct InMemoryDirectory {
    photographers: Arc<RwLock<HashMap<PhotographerId, Photographer>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(photographers: Vec<Photographer>) -> Self {
        let map = photographers
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self {
            photographers: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn insert(&self, photographer: Photographer) {
        let mut photographers = self.photographers.write().await;
        photographers.insert(photographer.id.clone(), photographer);
    }
}

#[async_trait]
impl PhotographerDirectory for InMemoryDirectory {
    async fn get(&self, id: &PhotographerId) -> Result<Option<Photographer>> {
        let photographers = self.photographers.read().await;
        Ok(photographers.get(id).cloned())
    }
}

/// In-memory event gallery catalog.
#[derive(Default, Clone)]
pub struct InMemoryEventCatalog {
    events: Arc<RwLock<HashMap<EventId, SportEvent>>>,
    photos: Arc<RwLock<Vec<EventPhoto>>>,
}

impl InMemoryEventCatalog {
    pub fn seed(events: Vec<SportEvent>, photos: Vec<EventPhoto>) -> Self {
        let events = events.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            events: Arc::new(RwLock::new(events)),
            photos: Arc::new(RwLock::new(photos)),
        }
    }
}

#[async_trait]
impl EventCatalog for InMemoryEventCatalog {
    async fn event(&self, id: &EventId) -> Result<Option<SportEvent>> {
        let events = self.events.read().await;
        Ok(events.get(id).cloned())
    }

    async fn photos_by_event(&self, event: &EventId) -> Result<Vec<EventPhoto>> {
        let photos = self.photos.read().await;
        Ok(photos.iter().filter(|p| &p.event == event).cloned().collect())
    }

    async fn photos_by_event_and_photographer(
        &self,
        event: &EventId,
        photographer: &PhotographerId,
    ) -> Result<Vec<EventPhoto>> {
        let photos = self.photos.read().await;
        Ok(photos
            .iter()
            .filter(|p| &p.event == event && &p.photographer == photographer)
            .cloned()
            .collect())
    }
}

/// Payment gateway stand-in that acknowledges every submission after a
/// configurable delay. The delay models backend latency; it never blocks
/// the runtime.
#[derive(Default, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn submit(&self, submission: &PaymentSubmission) -> Result<PaymentAck> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(PaymentAck {
            photographer: submission.photographer.clone(),
        })
    }
}

/// Clipboard that appends every write to a buffer.
#[derive(Default)]
pub struct BufferClipboard {
    writes: Vec<String>,
}

impl BufferClipboard {
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl Clipboard for BufferClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.writes.push(text.to_string());
        Ok(())
    }
}
