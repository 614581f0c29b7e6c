//! User-defined transaction tags

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;
pub mod usecases;

pub use descriptor::TagDescriptor;
pub use handlers::TagAppState;
pub use model::{Tag, TagCreate, TagCreateIn, TagPublic, TagUpdate};
pub use service::TagService;
