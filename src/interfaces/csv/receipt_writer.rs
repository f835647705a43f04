use crate::domain::cart::{PhotographerGroup, PhotographerId};
use crate::domain::checkout::PaymentSubmission;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One per-photographer line of the checkout receipt.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReceiptRow {
    pub photographer: String,
    pub photos: usize,
    pub subtotal: String,
    pub status: String,
    pub reference: String,
}

impl ReceiptRow {
    pub fn new(
        id: &PhotographerId,
        group: &PhotographerGroup,
        submission: Option<&PaymentSubmission>,
    ) -> Self {
        Self {
            photographer: id.to_string(),
            photos: group.items.len(),
            subtotal: group.subtotal.to_string(),
            status: if submission.is_some() { "paid" } else { "unpaid" }.to_string(),
            reference: submission.map(|s| s.reference.clone()).unwrap_or_default(),
        }
    }
}

/// Writes receipt rows as CSV to any `Write` sink.
pub struct ReceiptWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReceiptWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(sink),
        }
    }

    pub fn write_rows(&mut self, rows: impl IntoIterator<Item = ReceiptRow>) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
