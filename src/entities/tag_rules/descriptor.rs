//! Entity descriptor for TagRule

use super::handlers::{
    TagRuleAppState, apply_tag_rules, create_tag_rule, delete_tag_rule, get_tag_rule,
    list_tag_rules, update_tag_rule,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, post},
};

pub struct TagRuleDescriptor {
    pub state: TagRuleAppState,
}

impl TagRuleDescriptor {
    pub fn new(state: TagRuleAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for TagRuleDescriptor {
    fn entity_type(&self) -> &str {
        "tag_rule"
    }

    fn path(&self) -> &str {
        "tag-rules"
    }

    fn build_routes(&self) -> Router {
        // static segment takes precedence over `/{id}` in axum's router
        Router::new()
            .route("/", get(list_tag_rules).post(create_tag_rule))
            .route("/apply", post(apply_tag_rules))
            .route(
                "/{id}",
                get(get_tag_rule)
                    .patch(update_tag_rule)
                    .delete(delete_tag_rule),
            )
            .with_state(self.state.clone())
    }
}
