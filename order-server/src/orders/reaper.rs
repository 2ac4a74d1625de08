//! Stale pending-order reaper
//!
//! A `pending` order is an abandoned checkout: no payment was confirmed, so no
//! staff or seats were ever claimed, and the record can be deleted outright.
//!
//! Registered by `ServerState::start_background_tasks()`.

use crate::storage::{Storage, StorageResult};
use shared::order::Order;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct PendingOrderReaper {
    storage: Storage,
    interval: Duration,
    ttl: Duration,
    shutdown: CancellationToken,
}

impl PendingOrderReaper {
    pub fn new(
        storage: Storage,
        interval: Duration,
        ttl: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            storage,
            interval,
            ttl,
            shutdown,
        }
    }

    /// Delete every pending order older than the TTL as of `now_millis`
    ///
    /// Idempotent; a second sweep at the same instant removes nothing.
    pub fn sweep(&self, now_millis: i64) -> StorageResult<Vec<Order>> {
        let ttl_millis = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now_millis.saturating_sub(ttl_millis);
        let removed = self.storage.remove_pending_before(cutoff)?;

        for order in &removed {
            crate::audit_log!(
                "system",
                "order_reaped",
                format!("order:{}", order.id),
                format!("created_at={}", order.created_at)
            );
        }
        Ok(removed)
    }

    /// Main loop: sweep once per interval until shutdown
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            ttl_secs = self.ttl.as_secs(),
            "Pending order reaper started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    match self.sweep(shared::util::now_millis()) {
                        Ok(removed) if !removed.is_empty() => {
                            tracing::info!(count = removed.len(), "Reaped stale pending orders");
                        }
                        Ok(_) => tracing::debug!("No stale pending orders"),
                        Err(e) => tracing::error!(error = %e, "Pending order sweep failed"),
                    }
                }
            }
        }

        tracing::info!("Pending order reaper stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::order::{OrderItem, OrderStatus, PaymentStatus};

    const HOUR: i64 = 3_600_000;

    fn order(id: &str, status: OrderStatus, created_at: i64) -> Order {
        Order {
            id: id.to_string(),
            customer_id: "c-1".to_string(),
            restaurant_id: "r-1".to_string(),
            items: vec![OrderItem {
                menu_item_id: "m-1".to_string(),
                quantity: 1,
                unit_price: Decimal::from(500),
            }],
            total_amount: Decimal::from(500),
            status,
            payment_status: PaymentStatus::Pending,
            assigned_staff_id: None,
            delivery_address: "12 Park Street".to_string(),
            phone_number: "9000000000".to_string(),
            payment_intent_ref: format!("gw_{id}"),
            gateway_payment_ref: None,
            cancellation_reason: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn reaper(storage: Storage) -> PendingOrderReaper {
        PendingOrderReaper::new(
            storage,
            Duration::from_secs(3600),
            Duration::from_secs(7200),
            CancellationToken::new(),
        )
    }

    #[test]
    fn test_sweep_removes_only_stale_pending() {
        let storage = Storage::open_in_memory().unwrap();
        let now = 10 * HOUR;
        storage
            .insert_order(&order("stale", OrderStatus::Pending, now - 3 * HOUR))
            .unwrap();
        storage
            .insert_order(&order("paid", OrderStatus::Paid, now - 3 * HOUR))
            .unwrap();
        storage
            .insert_order(&order("fresh", OrderStatus::Pending, now - HOUR))
            .unwrap();

        let reaper = reaper(storage.clone());
        let removed = reaper.sweep(now).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, "stale");

        assert!(storage.get_order("stale").unwrap().is_none());
        assert!(storage.get_order("paid").unwrap().is_some());
        assert!(storage.get_order("fresh").unwrap().is_some());

        assert!(reaper.sweep(now).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let storage = Storage::open_in_memory().unwrap();
        let shutdown = CancellationToken::new();
        let reaper = PendingOrderReaper::new(
            storage,
            Duration::from_millis(10),
            Duration::from_secs(7200),
            shutdown.clone(),
        );

        let handle = tokio::spawn(reaper.run());
        tokio::time::sleep(Duration::from_millis(30)).await;
        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
