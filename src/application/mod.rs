// Application layer: the session ledger and the reports derived from it.

pub mod error;
pub mod reporting;
mod store;

pub use error::*;
pub use reporting::*;
pub use store::*;
