//! Order server
//!
//! Order lifecycle and delivery-staff allocation for a multi-restaurant food
//! ordering platform.
//!
//! # Module layout
//!
//! ```text
//! order-server/src/
//! ├── core/          # config, shared state, background tasks, server
//! ├── auth/          # JWT bearer auth and role guards
//! ├── api/           # HTTP routes and handlers
//! ├── storage.rs     # redb persistence
//! ├── staff/         # allocation engine and staff roster
//! ├── orders/        # status state machine and pending-order reaper
//! ├── payments/      # gateway client and payment reconciliation
//! ├── reservations/  # dine-in capacity tracker
//! ├── restaurants/   # restaurant settings and provisioning
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod orders;
pub mod payments;
pub mod reservations;
pub mod restaurants;
pub mod staff;
pub mod storage;
pub mod utils;

// Re-exports
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use orders::{OrdersManager, PendingOrderReaper};
pub use storage::Storage;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    std::fs::create_dir_all(&config.work_dir)?;
    init_logger_with_file(&config.log_level, config.log_json, Some(config.log_dir().as_path()))?;

    if config.is_development() && std::env::var("JWT_SECRET").is_err() {
        tracing::warn!("JWT_SECRET not set, using a temporary key; tokens expire on restart");
    }
    Ok(config)
}
