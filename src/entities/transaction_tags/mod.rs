//! Tags applied to transactions

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;
pub mod usecases;

pub use descriptor::TransactionTagDescriptor;
pub use handlers::TransactionTagAppState;
pub use model::{TransactionTag, TransactionTagCreate, TransactionTagPublic, TransactionTagUpdate};
pub use service::TransactionTagService;
