//! # Atelier Storefront Library
//!
//! The cart store, its persistence, the commands the storefront UI calls,
//! and a terminal shell that drives them.
//!
//! ## Module Organization
//! ```text
//! atelier_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore: state, dispatch, subscribers
//! │   ├── persist.rs  ◄─── Hydration and the background writer
//! │   ├── provider.rs ◄─── CartProvider scope, use_cart()
//! │   ├── rate.rs     ◄─── Cached USD→Bs rate
//! │   └── config.rs   ◄─── StorefrontConfig
//! ├── storage/        ◄─── memory, JSON file and SQLite backends
//! ├── commands/
//! │   ├── cart.rs     ◄─── Cart commands and checkout link
//! │   └── rate.rs     ◄─── Rate administration commands
//! ├── shell.rs        ◄─── Line-oriented front end
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use atelier_db::{Database, DbConfig};

use state::{CartProvider, CartStore, RateState, StorageKind, StorefrontConfig};
use storage::{FileStorage, MemoryStorage, SqliteStorage, StorageBackend};

/// Runs the storefront shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,atelier=debug,sqlx=warn; override with RUST_LOG     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → atelier.toml → ATELIER_* environment                   │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • memory storage: in-memory SQLite                                  │
/// │     • otherwise: data_dir/atelier.db, WAL mode, migrations              │
/// │                                                                         │
/// │  4. Open the Cart ────────────────────────────────────────────────────► │
/// │     • hydrate from the selected backend                                 │
/// │     • start the background writer                                       │
/// │                                                                         │
/// │  5. Load the USD Rate, run the shell inside CartProvider ─────────────► │
/// │                                                                         │
/// │  6. Flush pending cart writes, close the pool (also on shell errors)     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Atelier storefront");

    let config = StorefrontConfig::load_or_default(config_path);
    info!(storage = ?config.storage, data_dir = %config.data_dir.display(), "Configuration loaded");

    let db = open_database(&config).await?;
    info!("Database connected and migrations applied");

    let backend = storage_backend(&config, &db);
    info!(backend = backend.name(), key = %config.cart_storage_key, "Opening cart");
    let cart = Arc::new(CartStore::open(backend, &config.cart_storage_key).await);

    let rates = RateState::load(db.clone(), config.fallback_rate()).await;

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(cart, &db, &rates, &config, stdin, stdout).await?;

    info!("Storefront stopped");
    Ok(())
}

/// Runs the shell inside the cart's provider scope, then drains pending cart
/// writes and closes the pool.
///
/// The drain happens even when the shell stops on an I/O error; that error
/// is returned afterwards.
pub async fn serve<R, W>(
    cart: Arc<CartStore>,
    db: &Database,
    rates: &RateState,
    config: &StorefrontConfig,
    input: R,
    output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let result =
        CartProvider::scope(cart.clone(), shell::run_shell(input, output, rates, config)).await;
    if let Err(e) = &result {
        error!(error = %e, "Shell stopped on an I/O error");
    }

    cart.flush().await;
    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=atelier=trace` - Show trace for atelier crates only
/// - Default: info, debug for atelier crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,atelier=debug,sqlx=warn"));

    // stdout belongs to the shell
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_database(config: &StorefrontConfig) -> Result<Database, Box<dyn std::error::Error>> {
    let db_config = match config.storage {
        StorageKind::Memory => DbConfig::in_memory(),
        StorageKind::File | StorageKind::Sqlite => {
            std::fs::create_dir_all(&config.data_dir)?;
            DbConfig::new(config.database_path())
        }
    };

    Ok(Database::new(db_config).await?)
}

fn storage_backend(config: &StorefrontConfig, db: &Database) -> StorageBackend {
    match config.storage {
        StorageKind::Memory => StorageBackend::Memory(MemoryStorage::new()),
        StorageKind::File => StorageBackend::File(FileStorage::new(config.cart_dir())),
        StorageKind::Sqlite => StorageBackend::Sqlite(SqliteStorage::new(db.clone())),
    }
}
