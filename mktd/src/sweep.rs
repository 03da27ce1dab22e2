//! The periodic settlement sweep.
//!
//! The engine itself has no background threads; this module supplies the
//! external scheduling that drives [`SettlementRepository::due_rooms`] and
//! settles everything past its deadline. The schedule can be anchored to a
//! start time so sweeps land at predictable instants.

use mkt_core::models::SettleOutcome;
use mkt_core::ports::SettlementRepository;
use mkt_sqlite::{Db, types::DateTime};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{Instrument as _, Level, event, span};

/// How many due rooms one settle pass requests at a time.
const SWEEP_BATCH: usize = 64;

/// Configuration for the periodic settlement sweep.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SweepConfig {
    /// An RFC3339 timestamp to anchor the sweep schedule to (if omitted,
    /// defaults to now)
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub from: Option<OffsetDateTime>,
    /// How often to sweep; omitting this disables the sweep entirely
    #[serde(default, with = "humantime_serde::option")]
    pub every: Option<Duration>,
}

impl SweepConfig {
    /// Schedule and execute a function at regular intervals.
    ///
    /// Aligns the first execution with the configured anchor, then runs the
    /// provided function once per interval until it fails.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if sweeping is disabled (no interval configured)
    /// * `Err(E)` if the swept function returns an error
    pub async fn schedule<T, E>(
        &self,
        f: impl AsyncFn(OffsetDateTime) -> Result<T, E>,
    ) -> Result<(), E> {
        let Some(delta) = self.every else {
            return Ok(());
        };

        let now = OffsetDateTime::now_utc();

        // advance the anchor to the first scheduled instant not in the past
        let mut anchor = if let Some(mut from) = self.from {
            if from < now {
                let skipped = ((now - from) / delta).ceil() as u32;
                from += delta * skipped;
            }
            from
        } else {
            now
        };

        {
            let sleepy: Duration = (anchor - now)
                .try_into()
                .expect("anchor too far in the future");
            tokio::time::sleep(sleepy).await;
        }

        let mut interval = tokio::time::interval(delta);

        loop {
            interval.tick().await;

            let span = span!(Level::INFO, "settlement sweep");
            async {
                event!(
                    Level::DEBUG,
                    sweep_time = anchor.format(&Rfc3339).unwrap(),
                );
                f(anchor).await
            }
            .instrument(span)
            .await?;

            anchor += delta;
        }
    }
}

/// Drain every room due as of `as_of`, settling each in turn.
///
/// Settled rooms fall out of the due set, so the loop terminates once a
/// batch comes back empty.
pub async fn settle_due(db: &Db, as_of: DateTime) -> Result<(), mkt_sqlite::Error> {
    loop {
        let due = db.due_rooms(as_of, SWEEP_BATCH).await?;
        if due.is_empty() {
            return Ok(());
        }

        for room_id in due {
            match db.settle(room_id, as_of).await? {
                Some(SettleOutcome::Settled { buyer_id }) => {
                    event!(Level::INFO, %room_id, %buyer_id, "sweep settled room");
                }
                Some(SettleOutcome::Unsold) => {
                    event!(Level::INFO, %room_id, "sweep closed room unsold");
                }
                // raced with a concurrent settle or a vanished room
                _ => {}
            }
        }
    }
}
