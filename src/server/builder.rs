//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::router::{api_routes, with_layers};
use crate::config::AppConfig;
use crate::entities::Repositories;
use crate::entities::card_statements::{CardStatementAppState, CardStatementDescriptor, CardStatementService};
use crate::entities::cards::{CardAppState, CardDescriptor, CardService};
use crate::entities::tag_rules::{TagRuleAppState, TagRuleDescriptor, TagRuleService};
use crate::entities::tags::{TagAppState, TagDescriptor, TagService};
use crate::entities::transaction_tags::{
    TransactionTagAppState, TransactionTagDescriptor, TransactionTagService,
};
use crate::entities::transactions::{TransactionAppState, TransactionDescriptor, TransactionService};
use crate::storage::Database;
use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

/// Builder wiring configuration, storage and every domain into a router
///
/// Construction order is config, database, repositories, services, use
/// cases, router. Nothing is global: each built router owns its own graph.
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::load()?;
/// let addr = config.bind_addr();
/// ServerBuilder::new()
///     .with_config(config)
///     .serve(&addr)
///     .await?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    config: AppConfig,
    database: Option<Database>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing database instead of starting from an empty one
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Merge extra routes at the top level, outside the API prefix
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Register one descriptor per domain
    fn registry(&self, database: &Database) -> EntityRegistry {
        let repos = Repositories::in_memory(database, self.config.filters.unknown_fields);
        let limits = self.config.page_limits();
        let tagging = TransactionTagService::new(&repos);

        let mut registry = EntityRegistry::new();
        registry.register(Box::new(CardDescriptor::new(CardAppState::new(
            CardService::new(&repos),
            limits,
        ))));
        registry.register(Box::new(CardStatementDescriptor::new(
            CardStatementAppState::new(CardStatementService::new(&repos), limits),
        )));
        registry.register(Box::new(TransactionDescriptor::new(TransactionAppState::new(
            TransactionService::new(&repos),
            tagging.clone(),
            limits,
        ))));
        registry.register(Box::new(TagDescriptor::new(TagAppState::new(
            TagService::new(&repos),
            limits,
        ))));
        registry.register(Box::new(TagRuleDescriptor::new(TagRuleAppState::new(
            TagRuleService::new(&repos),
            limits,
        ))));
        registry.register(Box::new(TransactionTagDescriptor::new(
            TransactionTagAppState::new(tagging, limits),
        )));
        registry
    }

    /// Build the application router
    pub fn build(mut self) -> Result<Router> {
        self.config.validate()?;

        let database = self.database.take().unwrap_or_default();
        let registry = self.registry(&database);
        tracing::info!(
            entities = ?registry.entity_types(),
            prefix = %self.config.server.api_prefix,
            "registered API routes"
        );

        let routes = self
            .custom_routes
            .into_iter()
            .fold(api_routes(&registry, &self.config.server.api_prefix), |router, routes| {
                router.merge(routes)
            });
        Ok(with_layers(routes, &self.config.cors))
    }

    /// Serve the application with graceful shutdown on SIGTERM or Ctrl+C
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
