use crate::domain::cart::PhotographerId;
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

/// One row of a payment replay file: which photographer to pay, the
/// reference the buyer entered, and an optional proof image file name.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentInstruction {
    pub photographer: PhotographerId,
    pub reference: String,
    pub proof: Option<String>,
}

/// Reads payment instructions from a CSV source with header
/// `photographer, reference, proof`.
pub struct PaymentInstructionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentInstructionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn instructions(self) -> impl Iterator<Item = Result<PaymentInstruction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
