use crate::domain::cart::PhotographerId;
use crate::domain::catalog::{PaymentDetails, Photographer};
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct PhotographerRecord {
    id: PhotographerId,
    name: String,
    bank: String,
    tax_id: String,
    phone: String,
    account_holder: String,
}

impl From<PhotographerRecord> for Photographer {
    fn from(record: PhotographerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            logo_url: None,
            payment: PaymentDetails {
                bank: record.bank,
                tax_id: record.tax_id,
                phone: record.phone,
                account_holder: record.account_holder,
            },
        }
    }
}

/// Reads photographer profiles from a CSV source with header
/// `id, name, bank, tax_id, phone, account_holder`.
pub struct DirectoryReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DirectoryReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn photographers(self) -> impl Iterator<Item = Result<Photographer>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map(|record: PhotographerRecord| record.into())
                .map_err(CheckoutError::from)
        })
    }
}
