//! Sweep scheduler - runs the completion sweep on a timetable.
//!
//! The default timetable is once a day at local midnight in the configured
//! timezone. A fixed interval can replace it. The loop stops when the
//! shutdown channel flips to `true`; a sweep already in progress finishes
//! first.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::sync::watch;
use tokio::time;

use crate::application::handlers::{CompleteOverdueSessionsHandler, SweepReport};
use crate::config::{SchedulerConfig, ValidationError};
use crate::domain::foundation::Timestamp;

/// When the next sweep should fire.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepSchedule {
    /// Every day at `at` local time in `tz`.
    Daily { at: NaiveTime, tz: Tz },
    /// Fixed period, measured from the end of the previous wait.
    Every(Duration),
}

impl SweepSchedule {
    /// Builds the schedule described by `config`.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self, ValidationError> {
        if let Some(interval) = config.interval() {
            if interval.is_zero() {
                return Err(ValidationError::InvalidInterval);
            }
            return Ok(SweepSchedule::Every(interval));
        }
        Ok(SweepSchedule::Daily {
            at: config.daily_time()?,
            tz: config.tz()?,
        })
    }

    /// First firing strictly after `now`.
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            SweepSchedule::Every(period) => {
                now + chrono::Duration::from_std(*period).unwrap_or_else(|_| chrono::Duration::days(1))
            }
            SweepSchedule::Daily { at, tz } => {
                let today = now.with_timezone(tz).date_naive();
                // Skips local times that do not exist (DST gaps).
                for date in today.iter_days().take(3) {
                    if let Some(local) = tz.from_local_datetime(&date.and_time(*at)).earliest() {
                        let candidate = local.with_timezone(&Utc);
                        if candidate > now {
                            return candidate;
                        }
                    }
                }
                now + chrono::Duration::days(1)
            }
        }
    }
}

/// Drives `CompleteOverdueSessionsHandler` from a `SweepSchedule`.
pub struct SweepScheduler {
    handler: Arc<CompleteOverdueSessionsHandler>,
    schedule: SweepSchedule,
    run_on_startup: bool,
}

impl SweepScheduler {
    pub fn new(handler: Arc<CompleteOverdueSessionsHandler>, schedule: SweepSchedule) -> Self {
        Self {
            handler,
            schedule,
            run_on_startup: false,
        }
    }

    /// Also sweep once before waiting for the first scheduled run.
    pub fn with_run_on_startup(mut self, enabled: bool) -> Self {
        self.run_on_startup = enabled;
        self
    }

    /// Run the scheduler loop until shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(schedule = ?self.schedule, "completion sweep scheduler started");

        if self.run_on_startup {
            self.run_once().await;
        }

        loop {
            let now = Utc::now();
            let next = self.schedule.next_run_after(now);
            let wait = (next - now).to_std().unwrap_or_default();
            tracing::debug!(next_run = %next, "next completion sweep scheduled");

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("completion sweep scheduler stopped");
                        return;
                    }
                }
                _ = time::sleep(wait) => {
                    self.run_once().await;
                }
            }
        }
    }

    /// Runs a single sweep now. Failures are logged, never propagated.
    pub async fn run_once(&self) -> Option<SweepReport> {
        match self.handler.handle(Timestamp::now()).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!(error = %e, "completion sweep failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::session::SessionState;
    use crate::ports::SessionRepository;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn midnight_bogota() -> SweepSchedule {
        SweepSchedule::Daily {
            at: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            tz: chrono_tz::America::Bogota,
        }
    }

    #[test]
    fn daily_schedule_fires_at_next_local_midnight() {
        let schedule = midnight_bogota();

        // 07:00 in Bogota (UTC-5)
        let next = schedule.next_run_after(utc("2024-03-10T12:00:00Z"));

        assert_eq!(next, utc("2024-03-11T05:00:00Z"));
    }

    #[test]
    fn daily_schedule_late_evening_fires_same_utc_day() {
        let schedule = midnight_bogota();

        let next = schedule.next_run_after(utc("2024-03-11T04:59:00Z"));

        assert_eq!(next, utc("2024-03-11T05:00:00Z"));
    }

    #[test]
    fn daily_schedule_exactly_at_run_time_moves_to_next_day() {
        let schedule = midnight_bogota();

        let next = schedule.next_run_after(utc("2024-03-11T05:00:00Z"));

        assert_eq!(next, utc("2024-03-12T05:00:00Z"));
    }

    #[test]
    fn interval_schedule_adds_period() {
        let schedule = SweepSchedule::Every(Duration::from_secs(90));

        let next = schedule.next_run_after(utc("2024-03-11T05:00:00Z"));

        assert_eq!(next, utc("2024-03-11T05:01:30Z"));
    }

    #[test]
    fn from_config_prefers_interval() {
        let config = SchedulerConfig {
            interval_secs: Some(30),
            ..Default::default()
        };

        assert_eq!(
            SweepSchedule::from_config(&config).unwrap(),
            SweepSchedule::Every(Duration::from_secs(30))
        );
    }

    #[test]
    fn from_config_defaults_to_midnight_bogota() {
        let schedule = SweepSchedule::from_config(&SchedulerConfig::default()).unwrap();
        assert_eq!(schedule, midnight_bogota());
    }

    #[tokio::test]
    async fn scheduler_completes_overdue_sessions_and_stops_on_shutdown() {
        let fixture = Fixture::new().await;
        let session = fixture
            .seed_session(SessionState::Accepted, Timestamp::now().minus_hours(2))
            .await;
        let handler = Arc::new(CompleteOverdueSessionsHandler::new(
            fixture.sessions.clone(),
            fixture.bus.clone(),
        ));
        let scheduler = Arc::new(SweepScheduler::new(
            handler,
            SweepSchedule::Every(Duration::from_millis(10)),
        ));
        let (tx, rx) = watch::channel(false);

        let task = {
            let scheduler = scheduler.clone();
            tokio::spawn(async move { scheduler.run(rx).await })
        };
        time::sleep(Duration::from_millis(100)).await;
        tx.send(true).unwrap();
        time::timeout(Duration::from_secs(1), task)
            .await
            .expect("scheduler did not stop")
            .unwrap();

        let stored = fixture.sessions.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.state(), SessionState::Completed);
    }

    #[tokio::test]
    async fn run_on_startup_sweeps_before_first_tick() {
        let fixture = Fixture::new().await;
        let session = fixture
            .seed_session(SessionState::Accepted, Timestamp::now().minus_hours(2))
            .await;
        let handler = Arc::new(CompleteOverdueSessionsHandler::new(
            fixture.sessions.clone(),
            fixture.bus.clone(),
        ));
        let scheduler = Arc::new(
            SweepScheduler::new(handler, midnight_bogota()).with_run_on_startup(true),
        );
        let (tx, rx) = watch::channel(false);

        let task = {
            let scheduler = scheduler.clone();
            tokio::spawn(async move { scheduler.run(rx).await })
        };
        time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();
        task.await.unwrap();

        let stored = fixture.sessions.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.state(), SessionState::Completed);
        assert!(fixture.bus.has_event("session.completed.v1"));
    }
}
