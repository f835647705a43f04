use super::money::{Money, Price};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhotographerId(pub String);

impl fmt::Display for PhotographerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PhotographerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoId(pub String);

impl From<&str> for PhotoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One purchasable photo in the cart.
///
/// Duplicate photo ids are kept as distinct entries; the cart never
/// deduplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub photo: PhotoId,
    pub photographer: PhotographerId,
    pub price: Price,
}

/// The buyer's current selection of photos.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: CartLineItem) {
        self.items.push(item);
    }

    /// Removes the first entry for the given photo, if present.
    pub fn remove(&mut self, photo: &PhotoId) -> Option<CartLineItem> {
        let pos = self.items.iter().position(|item| &item.photo == photo)?;
        Some(self.items.remove(pos))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, photo: &PhotoId) -> bool {
        self.items.iter().any(|item| &item.photo == photo)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::ZERO, |mut acc, item| {
                acc += item.price;
                acc
            })
    }
}

/// The slice of a cart owed to one photographer.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotographerGroup {
    pub items: Vec<CartLineItem>,
    pub subtotal: Money,
}

/// Partitions line items by photographer, summing each bucket.
///
/// Pure: no side effects, input order preserved within each bucket.
pub fn group_by_photographer(
    items: &[CartLineItem],
) -> BTreeMap<PhotographerId, PhotographerGroup> {
    let mut groups: BTreeMap<PhotographerId, PhotographerGroup> = BTreeMap::new();
    for item in items {
        let group = groups
            .entry(item.photographer.clone())
            .or_insert_with(|| PhotographerGroup {
                items: Vec::new(),
                subtotal: Money::ZERO,
            });
        group.subtotal += item.price;
        group.items.push(item.clone());
    }
    groups
}
