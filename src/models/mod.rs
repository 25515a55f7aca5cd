pub mod record;
pub mod schema;
pub mod table;

pub use record::Record;
pub use schema::{Column, Schema, Variant};
pub use table::Table;
