use std::sync::Arc;
use std::time::Duration;

use crate::auth::JwtService;
use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, Result};
use crate::orders::{OrdersManager, PendingOrderReaper};
use crate::payments::{LocalGateway, PaymentGateway, PaymentService, RazorpayGateway};
use crate::reservations::ReservationTracker;
use crate::restaurants::RestaurantService;
use crate::staff::{StaffAllocator, StaffRoster};
use crate::storage::Storage;

/// Server state shared by every handler
///
/// Cheap to clone: every service holds the same [`Storage`] handle.
///
/// ```ignore
/// let state = ServerState::initialize(&config)?;
/// let tasks = state.start_background_tasks();
/// // ... serve ...
/// tasks.shutdown().await;
/// ```
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub storage: Storage,
    pub jwt_service: Arc<JwtService>,
    pub allocator: StaffAllocator,
    pub roster: StaffRoster,
    pub orders: OrdersManager,
    pub payments: PaymentService,
    pub reservations: ReservationTracker,
    pub restaurants: RestaurantService,
}

impl ServerState {
    /// Wire every service over one storage handle and gateway
    pub fn new(config: Config, storage: Storage, gateway: Arc<dyn PaymentGateway>) -> Self {
        let allocator = StaffAllocator::new(storage.clone());
        let orders = OrdersManager::new(storage.clone(), allocator.clone());
        let payments = PaymentService::new(
            storage.clone(),
            orders.clone(),
            gateway,
            config.payment_settings(),
        );

        Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            roster: StaffRoster::new(storage.clone()),
            reservations: ReservationTracker::new(storage.clone()),
            restaurants: RestaurantService::new(storage.clone()),
            allocator,
            orders,
            payments,
            storage,
            config,
        }
    }

    /// Initialize server state
    ///
    /// 1. Work directory
    /// 2. Database (`work_dir/orders.redb`)
    /// 3. Payment gateway (remote when `PAYMENT_GATEWAY_URL` is set, local otherwise)
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let storage = Storage::open(config.database_path())?;

        let gateway: Arc<dyn PaymentGateway> = match &config.payment.gateway_url {
            Some(url) => {
                tracing::info!(gateway_url = %url, "Using remote payment gateway");
                Arc::new(RazorpayGateway::new(
                    url.clone(),
                    config.payment.key_id.clone(),
                    config.payment.key_secret.clone(),
                    Duration::from_millis(config.payment.gateway_timeout_ms),
                )?)
            }
            None => {
                tracing::warn!("PAYMENT_GATEWAY_URL not set, using local payment gateway");
                Arc::new(LocalGateway::new())
            }
        };

        Ok(Self::new(config.clone(), storage, gateway))
    }

    /// Start background tasks
    ///
    /// - pending order reaper
    ///
    /// The caller owns the returned registry and shuts it down.
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let reaper = PendingOrderReaper::new(
            self.storage.clone(),
            self.config.reaper_interval(),
            self.config.pending_order_ttl(),
            tasks.shutdown_token(),
        );
        tasks.spawn("pending_order_reaper", reaper.run());

        tracing::info!(tasks = ?tasks.names(), "Background tasks started");
        tasks
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
