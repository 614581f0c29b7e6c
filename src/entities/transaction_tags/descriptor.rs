//! Entity descriptor for TransactionTag

use super::handlers::{
    TransactionTagAppState, create_transaction_tag, delete_transaction_tag, get_transaction_tag,
    list_transaction_tags, update_transaction_tag,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

pub struct TransactionTagDescriptor {
    pub state: TransactionTagAppState,
}

impl TransactionTagDescriptor {
    pub fn new(state: TransactionTagAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for TransactionTagDescriptor {
    fn entity_type(&self) -> &str {
        "transaction_tag"
    }

    fn path(&self) -> &str {
        "transaction-tags"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/", get(list_transaction_tags).post(create_transaction_tag))
            .route(
                "/{id}",
                get(get_transaction_tag)
                    .patch(update_transaction_tag)
                    .delete(delete_transaction_tag),
            )
            .with_state(self.state.clone())
    }
}
