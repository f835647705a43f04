use crate::domain::cart::CartLineItem;
use crate::error::{CheckoutError, Result};
use std::io::Read;

/// Reads cart line items from a CSV source with header
/// `photo, photographer, price`.
///
/// Wraps `csv::Reader` and yields `Result<CartLineItem>` lazily, so large
/// carts stream without loading everything up front. Whitespace is trimmed
/// and record lengths are flexible.
pub struct LineItemReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LineItemReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn line_items(self) -> impl Iterator<Item = Result<CartLineItem>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
