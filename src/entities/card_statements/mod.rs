//! Monthly card statements

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;
pub mod usecases;

pub use descriptor::CardStatementDescriptor;
pub use handlers::CardStatementAppState;
pub use model::{CardStatement, CardStatementCreate, CardStatementPublic, CardStatementUpdate};
pub use service::CardStatementService;
