use super::checkout::CompletedOrder;
use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};

/// Contact details the buyer fills in before checkout. All three fields are
/// required and stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl BuyerInfo {
    pub fn new(name: &str, email: &str, phone: &str) -> Result<Self, CheckoutError> {
        let (name, email, phone) = (name.trim(), email.trim(), phone.trim());
        if name.is_empty() || email.is_empty() || phone.is_empty() {
            return Err(CheckoutError::Validation(
                "Buyer name, email and phone are all required".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

/// A placed order awaiting the photographer's review. Each order is
/// approved or rejected exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer: BuyerInfo,
    #[serde(flatten)]
    pub payment: CompletedOrder,
    pub status: OrderStatus,
}

impl Order {
    pub fn place(id: &str, buyer: BuyerInfo, payment: CompletedOrder) -> Self {
        Self {
            id: id.to_string(),
            buyer,
            payment,
            status: OrderStatus::Pending,
        }
    }

    pub fn approve(&mut self) -> Result<(), CheckoutError> {
        self.review(OrderStatus::Approved)
    }

    pub fn reject(&mut self) -> Result<(), CheckoutError> {
        self.review(OrderStatus::Rejected)
    }

    fn review(&mut self, status: OrderStatus) -> Result<(), CheckoutError> {
        if self.status != OrderStatus::Pending {
            return Err(CheckoutError::Validation(format!(
                "Order {} has already been reviewed",
                self.id
            )));
        }
        self.status = status;
        Ok(())
    }
}
