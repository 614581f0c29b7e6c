//! Credit cards

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;
pub mod usecases;

pub use descriptor::CardDescriptor;
pub use handlers::CardAppState;
pub use model::{CardBrand, CardSummary, CreditCard, CreditCardCreate, CreditCardPublic, CreditCardUpdate};
pub use service::CardService;
