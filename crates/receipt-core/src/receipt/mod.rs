//! Receipt field extraction: amount and spending category.

mod parser;
pub mod rules;

pub use parser::{ParsedReceipt, ReceiptParser};
