//! Background task that clears out stale pending reservations.
//!
//! Runs in a tokio::spawn loop, periodically declining pending reservations
//! whose window has already ended, so the operator queue only shows
//! reservations that can still be acted on. A window that has ended cannot
//! conflict with any future candidate, so the sweep never changes a booking
//! decision.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::{DomainResult, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;

/// Start the housekeeping background task.
///
/// Every `sweep_interval_secs` the task looks for pending reservations with
/// `window.end <= now` and declines them. A zero interval is treated as one
/// second.
pub fn start_housekeeping_task(
    repos: Arc<dyn RepositoryProvider>,
    shutdown: ShutdownSignal,
    sweep_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            sweep_interval = sweep_interval_secs,
            "📅 Housekeeping task started"
        );

        // tokio's interval panics on a zero period
        let period = Duration::from_secs(sweep_interval_secs.max(1));
        let mut interval = tokio::time::interval(period);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = decline_stale_pending(&repos, Utc::now()).await {
                        warn!(error = %e, "Housekeeping sweep error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("📅 Housekeeping task shutting down");
                    break;
                }
            }
        }

        info!("📅 Housekeeping task stopped");
    });
}

/// One sweep pass. Returns how many reservations were declined.
pub async fn decline_stale_pending(
    repos: &Arc<dyn RepositoryProvider>,
    now: DateTime<Utc>,
) -> DomainResult<usize> {
    let stale = repos.reservations().find_stale_pending(now).await?;

    if stale.is_empty() {
        return Ok(0);
    }

    info!(count = stale.len(), "Declining stale pending reservations");

    let mut declined = 0;
    for reservation in stale {
        // An operator may have decided it between the scan and this call;
        // that shows up as a conflict and is fine to skip
        match repos.reservations().decline(reservation.id, now).await {
            Ok(_) => declined += 1,
            Err(e) => warn!(
                error = %e,
                reservation_id = %reservation.id,
                "Failed to decline stale reservation"
            ),
        }
    }

    Ok(declined)
}

// ── Tests ──────────────────────────────────────────────────────
