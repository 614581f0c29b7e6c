//! Entity descriptor for CardStatement

use super::handlers::{
    CardStatementAppState, create_card_statement, delete_card_statement, get_card_statement,
    list_card_statements, update_card_statement,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

pub struct CardStatementDescriptor {
    pub state: CardStatementAppState,
}

impl CardStatementDescriptor {
    pub fn new(state: CardStatementAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CardStatementDescriptor {
    fn entity_type(&self) -> &str {
        "card_statement"
    }

    fn path(&self) -> &str {
        "card-statements"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/", get(list_card_statements).post(create_card_statement))
            .route(
                "/{id}",
                get(get_card_statement)
                    .patch(update_card_statement)
                    .delete(delete_card_statement),
            )
            .with_state(self.state.clone())
    }
}
