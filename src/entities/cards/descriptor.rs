//! Entity descriptor for CreditCard

use super::handlers::{
    CardAppState, card_summary, create_card, delete_card, get_card, list_cards, update_card,
};
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

pub struct CardDescriptor {
    pub state: CardAppState,
}

impl CardDescriptor {
    pub fn new(state: CardAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CardDescriptor {
    fn entity_type(&self) -> &str {
        "card"
    }

    fn path(&self) -> &str {
        "cards"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/", get(list_cards).post(create_card))
            .route(
                "/{id}",
                get(get_card).patch(update_card).delete(delete_card),
            )
            .route("/{id}/summary", get(card_summary))
            .with_state(self.state.clone())
    }
}
