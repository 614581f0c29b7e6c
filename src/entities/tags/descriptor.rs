//! Entity descriptor for Tag

use super::handlers::{TagAppState, create_tag, delete_tag, get_tag, list_tags, update_tag};
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

pub struct TagDescriptor {
    pub state: TagAppState,
}

impl TagDescriptor {
    pub fn new(state: TagAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for TagDescriptor {
    fn entity_type(&self) -> &str {
        "tag"
    }

    fn path(&self) -> &str {
        "tags"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/", get(list_tags).post(create_tag))
            .route("/{id}", get(get_tag).patch(update_tag).delete(delete_tag))
            .with_state(self.state.clone())
    }
}
