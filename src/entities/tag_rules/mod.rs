//! Tag rules and the rule engine

pub mod descriptor;
pub mod engine;
pub mod handlers;
pub mod model;
pub mod service;
pub mod usecases;

pub use descriptor::TagRuleDescriptor;
pub use handlers::TagRuleAppState;
pub use model::{ApplyRulesRequest, ApplyRulesResponse, TagRule, TagRuleCreate, TagRulePublic, TagRuleUpdate};
pub use service::TagRuleService;
