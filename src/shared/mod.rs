pub mod error;
pub mod result;

pub use error::InventoryError;
pub use result::Result;
