use super::cart::PhotographerId;
use super::money::Money;
use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};

/// Accepted proof-of-payment image formats. Anything else is refused at
/// selection time and the previously attached proof (if any) is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofKind {
    Png,
    Jpeg,
}

impl ProofKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())?;
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofImage {
    pub file_name: String,
    pub kind: ProofKind,
}

/// A buyer's claim of having paid one photographer.
///
/// The reference is stored trimmed; construction rejects blank or
/// whitespace-only references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSubmission {
    pub photographer: PhotographerId,
    pub reference: String,
    pub proof: Option<ProofImage>,
}

impl PaymentSubmission {
    pub fn new(
        photographer: PhotographerId,
        reference: &str,
        proof: Option<ProofImage>,
    ) -> Result<Self, CheckoutError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(CheckoutError::Validation(
                "Payment reference must not be empty".to_string(),
            ));
        }
        Ok(Self {
            photographer,
            reference: reference.to_string(),
            proof,
        })
    }
}

/// Acknowledgement returned by the payment gateway for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAck {
    pub photographer: PhotographerId,
}

/// Where the buyer is within one checkout dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    /// Listing the unpaid photographers with their bank details.
    Summary,
    /// Entering the payment reference for one photographer.
    PaymentEntry {
        photographer: PhotographerId,
        reference: String,
        proof: Option<ProofImage>,
        submitting: bool,
    },
    /// Every photographer in the cart has a recorded submission.
    AllPaid,
}

/// Everything the owner needs when the unpaid set empties: the full set of
/// submissions (for notifying each photographer) and the order total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedOrder {
    pub submissions: Vec<PaymentSubmission>,
    pub total: Money,
}
