//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a route group per enabled module
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and serve until shutdown

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::canonical::UrlCanonicalizer;
use crate::config::{validation::RESERVED_PREFIXES, QuickSearchConfig};
use crate::http::handlers;
use crate::http::request::{make_span, MakeRequestUuid, X_REQUEST_ID};
use crate::intel::NetworkIntelResolver;
use crate::journey::TrainJourneyResolver;
use crate::lifecycle::shutdown;
use crate::lifecycle::Services;
use crate::oui::MacVendorResolver;
use crate::search::{IndexEntry, SearchProvider};

/// HTTP server for the quicksearch service.
pub struct HttpServer {
    router: Router,
    config: QuickSearchConfig,
}

impl HttpServer {
    /// Create a server, building resolvers from the configuration.
    pub fn new(config: QuickSearchConfig) -> Self {
        let services = Services::from_config(&config);
        Self::with_services(config, services)
    }

    /// Create a server around already-built resolvers.
    pub fn with_services(config: QuickSearchConfig, services: Services) -> Self {
        let router = Self::build_router(&config, services);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &QuickSearchConfig, services: Services) -> Router {
        let mut index = Vec::new();
        let mut router = Router::new();

        if let Some(resolver) = services.mac_vendor {
            index.push(IndexEntry::new("mac_vendor", "/mac/"));
            router = router.merge(mac_routes(resolver));
        }

        if let Some(canonicalizer) = services.canonical_url {
            index.push(IndexEntry::new("canonical_url", "/url/"));
            index.push(IndexEntry::new("canonical_url_go", "/url-go/"));
            router = router.merge(canonical_routes(canonicalizer));
        }

        if let Some(resolver) = services.network_intel {
            index.push(IndexEntry::new("network_intel", "/ip/"));
            router = router.merge(intel_routes(resolver));
        }

        if let Some(resolver) = services.train_journey {
            index.push(IndexEntry::new("train_journey", "/train/"));
            router = router.merge(train_routes(resolver));
        }

        let mut taken: HashSet<&str> = RESERVED_PREFIXES.iter().copied().collect();
        for provider in &services.providers {
            let state = Arc::new(SearchProvider::from(provider));
            for path in &provider.paths {
                if !taken.insert(path.as_str()) {
                    tracing::warn!(provider = %provider.name, path = %path, "Path already routed, skipping");
                    continue;
                }
                index.push(IndexEntry::new(provider.name.clone(), format!("{path}/")));
                router = router.merge(search_routes(path, state.clone()));
            }
        }

        let x_request_id = HeaderName::from_static(X_REQUEST_ID);

        router
            .merge(index_routes(index.into()))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
    }

    /// The router, for driving the service without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &QuickSearchConfig {
        &self.config
    }
}

fn mac_routes(resolver: MacVendorResolver) -> Router {
    Router::new()
        .route("/mac/{query}", get(handlers::mac_vendor))
        .with_state(resolver)
}

fn canonical_routes(canonicalizer: UrlCanonicalizer) -> Router {
    Router::new()
        .route("/url/{*url}", get(handlers::canonical_url))
        .route("/url-go/{*url}", get(handlers::canonical_url_go))
        .with_state(canonicalizer)
}

fn intel_routes(resolver: NetworkIntelResolver) -> Router {
    Router::new()
        .route("/ip/{address}", get(handlers::network_intel))
        .with_state(resolver)
}

fn train_routes(resolver: TrainJourneyResolver) -> Router {
    Router::new()
        .route("/train/{number}", get(handlers::train_journey))
        .route("/train/{number}/{date}", get(handlers::train_journey))
        .route("/train/{number}/{date}/{country}", get(handlers::train_journey))
        .with_state(resolver)
}

fn search_routes(path: &str, provider: Arc<SearchProvider>) -> Router {
    Router::new()
        .route(&format!("{path}/{{*query}}"), get(handlers::search))
        .with_state(provider)
}

fn index_routes(entries: Arc<[IndexEntry]>) -> Router {
    Router::new().route("/", get(handlers::index)).with_state(entries)
}
