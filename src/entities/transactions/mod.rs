//! Statement transactions

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;
pub mod summary;
pub mod usecases;

pub use descriptor::TransactionDescriptor;
pub use handlers::TransactionAppState;
pub use model::{Transaction, TransactionCreate, TransactionPublic, TransactionUpdate};
pub use service::TransactionService;
pub use summary::{SpendingQuery, SpendingSummary, SummaryGroupBy};
