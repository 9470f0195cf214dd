//!
//! PrimeGym console probe: signs in against the configured backend,
//! loads every console resource once and prints the dashboard summary.
//! Reads configuration from TOML file (~/.config/primegym-console/config.toml).

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Days, Utc};
use tracing::{error, info, warn};

use primegym_console::auth::is_administrator;
use primegym_console::domain::{
    compose, ClientAdapter, EmployeeAdapter, EnvironmentAdapter, OrderAdapter, ProductAdapter,
    ReportKind, ReportRange, ReportService,
};
use primegym_console::session::{FileStorage, SessionStore};
use primegym_console::sync::{ResourceAdapter, Synchronizer};
use primegym_console::{default_config_path, ApiClient, AppConfig, AuthService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PRIMEGYM_CONSOLE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting PrimeGym console probe...");
    info!("API base URL: {}", cfg.api.base_url);

    // ── Session store & API client ─────────────────────────────
    let storage = Arc::new(FileStorage::open(cfg.session_path()));
    let session = Arc::new(SessionStore::open(storage));
    let api = Arc::new(ApiClient::new(
        cfg.api.base_url.clone(),
        cfg.request_timeout(),
        session.clone(),
    )?);
    let auth = AuthService::new(api.clone(), session.clone());

    if session.is_authenticated() {
        // The persisted token may still be rejected server side; the
        // loads below will say so.
        info!("🔑 Resuming persisted session");
    } else {
        let identifier = std::env::var("PRIMEGYM_CONSOLE_USER");
        let password = std::env::var("PRIMEGYM_CONSOLE_PASSWORD");
        match (identifier, password) {
            (Ok(identifier), Ok(password)) => {
                let profile = auth.login(&identifier, &password).await?;
                info!("🔑 Signed in as {}", profile.username);
            }
            _ => {
                error!(
                    "No persisted session; set PRIMEGYM_CONSOLE_USER and \
                     PRIMEGYM_CONSOLE_PASSWORD to sign in"
                );
                return Err("no session".into());
            }
        }
    }

    let admin = is_administrator(session.profile().as_ref());
    info!("Administrator capabilities: {}", if admin { "yes" } else { "no" });

    // ── Load every console resource once ───────────────────────
    let environment = Synchronizer::shared(EnvironmentAdapter, api.clone());
    let clients = Synchronizer::shared(ClientAdapter, api.clone());
    let products = Synchronizer::shared(ProductAdapter, api.clone());
    let orders = Synchronizer::shared(OrderAdapter, api.clone());

    let mut failures = 0usize;
    let environment_ok = probe(&environment).await;
    failures += usize::from(!environment_ok);
    let products_ok = probe(&products).await;
    failures += usize::from(!products_ok);
    failures += usize::from(!probe(&clients).await);
    failures += usize::from(!probe(&orders).await);

    // The employee directory is reachable only for administrators.
    if admin {
        let employees = Synchronizer::shared(EmployeeAdapter, api.clone());
        failures += usize::from(!probe(&employees).await);
    } else {
        info!("Skipping employee directory (administrator only)");
    }

    // ── Dashboard summary ──────────────────────────────────────
    if environment_ok && products_ok {
        let ambient = environment.snapshot();
        let catalog = products.snapshot();
        let summary = compose(&ambient.aux, &ambient.records, &catalog.records);
        info!(
            "📊 Dashboard: {} inside, avg {:.1}°C / {:.1}% humidity, {} alert(s)",
            summary.occupancy,
            summary.average_temperature,
            summary.average_humidity,
            summary.alerts.len(),
        );
        for alert in &summary.alerts {
            warn!("⚠️  {}", alert);
        }
    }

    // ── Ambient report over the last week ──────────────────────
    let today = Utc::now().date_naive();
    let start = today.checked_sub_days(Days::new(7)).unwrap_or(today);
    let range = ReportRange::new(start, today);
    let reports = ReportService::new(api.clone());
    match reports.download(ReportKind::Ambient, &range).await {
        Ok(bytes) => {
            let path = std::env::temp_dir()
                .join(ReportService::suggested_filename(ReportKind::Ambient, &range));
            match std::fs::write(&path, &bytes) {
                Ok(()) => info!(
                    "📄 {}: {} bytes -> {}",
                    ReportKind::Ambient.title(),
                    bytes.len(),
                    path.display(),
                ),
                Err(e) => warn!("Report downloaded but not written: {}", e),
            }
        }
        Err(e) => {
            error!("❌ Report download failed: {}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(format!("{failures} check(s) failed").into());
    }
    info!("✅ All checks passed");
    Ok(())
}

/// Load one resource and report the outcome.
async fn probe<A: ResourceAdapter>(sync: &Synchronizer<A>) -> bool {
    match sync.load().await {
        Ok(()) => {
            let snapshot = sync.snapshot();
            info!("✅ {}: {} record(s)", sync.resource(), snapshot.records.len());
            true
        }
        Err(e) => {
            error!("❌ {}: {}", sync.resource(), e);
            false
        }
    }
}
