use super::cart::PhotographerId;
use serde::{Deserialize, Serialize};

/// Bank details a buyer needs to pay one photographer by transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub bank: String,
    pub tax_id: String,
    pub phone: String,
    pub account_holder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photographer {
    pub id: PhotographerId,
    pub name: String,
    pub logo_url: Option<String>,
    pub payment: PaymentDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A sporting event whose galleries are on sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportEvent {
    pub id: EventId,
    pub name: String,
    pub date: String,
    pub photographers: Vec<PhotographerId>,
}

/// One gallery photo, browsable before it becomes a cart line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPhoto {
    pub id: String,
    pub photographer: PhotographerId,
    pub event: EventId,
    pub url: String,
    pub thumbnail: String,
}
