use super::cart::PhotographerId;
use super::catalog::{EventId, EventPhoto, Photographer, SportEvent};
use super::checkout::{PaymentAck, PaymentSubmission};
use crate::error::Result;
use async_trait::async_trait;

/// Lookup of photographer profiles and bank details.
///
/// `Ok(None)` means the photographer is unknown; callers drop that group
/// from the checkout rather than failing.
#[async_trait]
pub trait PhotographerDirectory: Send + Sync {
    async fn get(&self, id: &PhotographerId) -> Result<Option<Photographer>>;
}

/// Browse queries over event galleries.
#[async_trait]
pub trait EventCatalog: Send + Sync {
    async fn event(&self, id: &EventId) -> Result<Option<SportEvent>>;
    async fn photos_by_event(&self, event: &EventId) -> Result<Vec<EventPhoto>>;
    async fn photos_by_event_and_photographer(
        &self,
        event: &EventId,
        photographer: &PhotographerId,
    ) -> Result<Vec<EventPhoto>>;
}

/// Registers one payment submission with the backend. Single attempt, no
/// retry; the session treats the submission as recorded only once the ack
/// comes back.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit(&self, submission: &PaymentSubmission) -> Result<PaymentAck>;
}

/// One-way text sink for the "copy bank details" affordance.
pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub type DirectoryBox = Box<dyn PhotographerDirectory>;
pub type GatewayBox = Box<dyn PaymentGateway>;
