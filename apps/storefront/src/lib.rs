//! # AutoParts Storefront Library
//!
//! Application layer of the AutoParts PRO storefront: state holders, the
//! commands the browser UI invokes, and startup.
//!
//! ## Module Organization
//! ```text
//! autoparts_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront, startup & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state
//! │   ├── session.rs  ◄─── Current user + durable copy
//! │   ├── catalog.rs  ◄─── Storefront product grid
//! │   ├── admin.rs    ◄─── Durable admin catalog
//! │   └── config.rs   ◄─── Configuration
//! ├── commands/       ◄─── browse, cart, auth, admin, config
//! ├── notify.rs       ◄─── Toast and router collaborators
//! └── error.rs        ◄─── AppError, ApiError, StartupError
//! ```

pub mod commands;
pub mod error;
pub mod notify;
pub mod state;

use tokio::sync::OnceCell;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use autoparts_db::{Database, DbConfig, DbResult, KeyValueStore, ProductRepository, SessionRepository};

use error::{AppResult, StartupError};
use state::{AdminCatalog, CartState, CatalogState, SessionState, StorefrontConfig};

/// Every state holder of one storefront instance.
///
/// Commands take the individual fields; this struct only owns them.
#[derive(Debug)]
pub struct Storefront<S> {
    pub config: StorefrontConfig,
    pub cart: CartState,
    pub catalog: CatalogState,
    pub session: SessionState<S>,
    store: S,
    admin: OnceCell<AdminCatalog<S>>,
}

impl Storefront<Database> {
    /// Opens the SQLite database named by `config` and restores state.
    pub async fn open(config: StorefrontConfig) -> Result<Self, StartupError> {
        let path = config.resolve_database_path()?;
        info!(path = %path.display(), "Database path determined");

        let db = Database::new(DbConfig::new(path)).await?;
        Ok(Storefront::with_store(config, db).await?)
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        self.store.close().await;
    }
}

impl<S: KeyValueStore + Clone> Storefront<S> {
    /// Builds the storefront on `store`, restoring the persisted session.
    ///
    /// The cart starts empty. The admin catalog is loaded on first use.
    pub async fn with_store(config: StorefrontConfig, store: S) -> DbResult<Self> {
        let session =
            SessionState::restore(SessionRepository::new(store.clone()), config.login_delay())
                .await?;

        Ok(Storefront {
            config,
            cart: CartState::new(),
            catalog: CatalogState::seeded(),
            session,
            store,
            admin: OnceCell::new(),
        })
    }

    /// The admin catalog, loading (and seeding) it on first call.
    ///
    /// The session is checked first: without an administrator signed in
    /// nothing is read or written and `AuthenticationRequired` /
    /// `AdminRequired` is returned.
    pub async fn admin_catalog(&self) -> AppResult<&AdminCatalog<S>> {
        self.session.require_admin().await?;

        let catalog = self
            .admin
            .get_or_try_init(|| AdminCatalog::load(ProductRepository::new(self.store.clone())))
            .await?;
        Ok(catalog)
    }
}

/// Starts the storefront headless: loads configuration, opens storage,
/// restores the session and logs a summary.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,autoparts=debug,sqlx=warn (override with RUST_LOG)  │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • AUTOPARTS_STORE_NAME, AUTOPARTS_LOGIN_DELAY_MS, AUTOPARTS_DB_PATH │
/// │                                                                         │
/// │  3. Open Database ────────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  4. Restore State ────────────────────────────────────────────────────► │
/// │     • Session from key "user"; empty cart; seed product grid            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), StartupError> {
    init_tracing();

    let config = StorefrontConfig::from_env();
    info!(store = %config.store_name, "Starting storefront");

    let storefront = Storefront::open(config).await?;

    match storefront.session.current_user().await {
        Some(user) => info!(user_id = user.id, email = %user.email, role = ?user.role, "Session restored"),
        None => info!("No active session"),
    }

    for product in storefront.catalog.products() {
        info!(
            product_id = product.id,
            name = %product.name,
            price = %storefront.config.format_currency(product.effective_price()),
            in_stock = product.in_stock,
            "Catalog entry"
        );
    }

    if storefront.session.is_admin().await {
        match storefront.admin_catalog().await {
            Ok(admin) => info!(count = admin.products().await.len(), "Admin catalog ready"),
            Err(err) => warn!(error = %err, "Admin catalog unavailable"),
        }
    }

    storefront.close().await;
    info!("Storefront state verified");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=autoparts_db=trace` - Trace storage only
/// - Default: `info,autoparts=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,autoparts=debug,sqlx=warn"));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
