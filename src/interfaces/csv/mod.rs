pub mod directory_reader;
pub mod line_item_reader;
pub mod payment_reader;
pub mod receipt_writer;
