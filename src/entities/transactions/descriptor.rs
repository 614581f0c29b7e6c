//! Entity descriptor for Transaction

use super::handlers::{
    TransactionAppState, create_transaction, delete_transaction, get_transaction,
    list_transaction_tags, list_transactions, spending_summary, tag_transaction,
    untag_transaction, update_transaction,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, post},
};

pub struct TransactionDescriptor {
    pub state: TransactionAppState,
}

impl TransactionDescriptor {
    pub fn new(state: TransactionAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for TransactionDescriptor {
    fn entity_type(&self) -> &str {
        "transaction"
    }

    fn path(&self) -> &str {
        "transactions"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/", get(list_transactions).post(create_transaction))
            .route("/summary", get(spending_summary))
            .route(
                "/{id}",
                get(get_transaction)
                    .patch(update_transaction)
                    .delete(delete_transaction),
            )
            .route("/{id}/tags", get(list_transaction_tags))
            .route(
                "/{id}/tags/{tag_id}",
                post(tag_transaction).delete(untag_transaction),
            )
            .with_state(self.state.clone())
    }
}
