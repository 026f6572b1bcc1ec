use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use voltmarket_core::{
    capabilities::{CapabilitySet, LetterOfIntentServiceTrait, UnavailableLetterOfIntentService},
    documents::{DocumentService, DocumentServiceTrait},
    events::DomainEventSink,
    listings::{ListingService, ListingServiceTrait},
    notifications::{NotificationService, NotificationServiceTrait},
    opportunities::{OpportunityScanner, OpportunityScannerTrait},
    portfolio::{PortfolioService, PortfolioServiceTrait},
    verification::{LoggingVerificationMailer, VerificationService, VerificationServiceTrait},
    watchlist::{WatchlistService, WatchlistServiceTrait},
};
use voltmarket_storage_sqlite::{
    db::{self, write_actor},
    DbPool, LocalDocumentStore, ListingRepository, NotificationRepository, OpportunitySourceRepository,
    PortfolioRepository, VerificationRepository, WatchlistRepository,
};

use crate::{
    config::Config,
    events::{BusDomainEventSink, EventBus, RecentEvents},
};

pub struct AppState {
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub opportunity_scanner: Arc<dyn OpportunityScannerTrait>,
    pub listing_service: Arc<dyn ListingServiceTrait>,
    pub watchlist_service: Arc<dyn WatchlistServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub document_service: Arc<dyn DocumentServiceTrait>,
    pub verification_service: Arc<dyn VerificationServiceTrait>,
    pub loi_service: Arc<dyn LetterOfIntentServiceTrait>,
    pub capabilities: CapabilitySet,
    pub mapbox_token: Option<String>,
    pub event_bus: EventBus,
    pub recent_events: RecentEvents,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("VM_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("text") {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    } else {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    tokio::fs::create_dir_all(&config.storage_dir)
        .await
        .with_context(|| format!("Cannot create storage dir {}", config.storage_dir))?;

    let event_bus = EventBus::new(config.event_bus_capacity);
    let recent_events = RecentEvents::new(config.realtime_history);
    let domain_event_sink: Arc<dyn DomainEventSink> = Arc::new(BusDomainEventSink::new(
        event_bus.clone(),
        recent_events.clone(),
    ));

    let portfolio_repository = Arc::new(PortfolioRepository::new(pool.clone(), writer.clone()));
    let portfolio_service: Arc<dyn PortfolioServiceTrait> = Arc::new(PortfolioService::new(
        portfolio_repository,
        domain_event_sink.clone(),
    ));

    let opportunity_sources = Arc::new(OpportunitySourceRepository::new(
        pool.clone(),
        writer.clone(),
    ));
    let opportunity_scanner: Arc<dyn OpportunityScannerTrait> =
        Arc::new(OpportunityScanner::new(opportunity_sources));

    let listing_repository = Arc::new(ListingRepository::new(pool.clone(), writer.clone()));
    let listing_service: Arc<dyn ListingServiceTrait> = Arc::new(ListingService::new(
        listing_repository.clone(),
        domain_event_sink.clone(),
    ));

    let watchlist_repository = Arc::new(WatchlistRepository::new(pool.clone(), writer.clone()));
    let watchlist_service: Arc<dyn WatchlistServiceTrait> = Arc::new(WatchlistService::new(
        watchlist_repository,
        listing_repository,
        domain_event_sink.clone(),
    ));

    let notification_repository =
        Arc::new(NotificationRepository::new(pool.clone(), writer.clone()));
    let notification_service: Arc<dyn NotificationServiceTrait> = Arc::new(
        NotificationService::new(notification_repository, domain_event_sink.clone()),
    );

    let document_store = Arc::new(LocalDocumentStore::new(
        &config.storage_dir,
        config.public_url.as_str(),
    ));
    let document_service: Arc<dyn DocumentServiceTrait> =
        Arc::new(DocumentService::new(document_store));

    let verification_repository =
        Arc::new(VerificationRepository::new(pool.clone(), writer.clone()));
    let verification_service: Arc<dyn VerificationServiceTrait> =
        Arc::new(VerificationService::new(
            verification_repository,
            Arc::new(LoggingVerificationMailer),
            domain_event_sink.clone(),
        ));

    // No letters-of-intent backend exists yet; enabling the capability only
    // lets requests reach the adapter.
    let loi_service: Arc<dyn LetterOfIntentServiceTrait> =
        Arc::new(UnavailableLetterOfIntentService);

    if config.mapbox_token.is_none() {
        tracing::warn!("MAPBOX_PUBLIC_TOKEN is not set; get-mapbox-config will fail");
    }

    Ok(Arc::new(AppState {
        portfolio_service,
        opportunity_scanner,
        listing_service,
        watchlist_service,
        notification_service,
        document_service,
        verification_service,
        loi_service,
        capabilities: config.capabilities.clone(),
        mapbox_token: config.mapbox_token.clone(),
        event_bus,
        recent_events,
        pool,
    }))
}
