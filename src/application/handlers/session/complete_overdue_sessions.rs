//! CompleteOverdueSessionsHandler - the completion sweep.
//!
//! Moves every Accepted session whose time has passed to Completed. Rows
//! are applied independently: a row that fails is logged and left for the
//! next run. Runs never overlap; a run that finds another in progress
//! returns a skipped report without touching anything.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::application::handlers::events::publish_event;
use crate::domain::foundation::{CommandMetadata, Timestamp};
use crate::domain::session::{CompletionSource, Session, SessionCompleted, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

use super::persist_transition;

/// Outcome of one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Overdue sessions found.
    pub examined: usize,
    pub completed: usize,
    pub failed: usize,
    /// True when the run was skipped because another was in progress.
    pub skipped: bool,
}

impl SweepReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

pub struct CompleteOverdueSessionsHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    running: Mutex<()>,
}

impl CompleteOverdueSessionsHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            running: Mutex::new(()),
        }
    }

    /// Completes every Accepted session scheduled strictly before `now`.
    ///
    /// # Errors
    ///
    /// - `Infrastructure` if the overdue scan itself fails
    pub async fn handle(&self, now: Timestamp) -> Result<SweepReport, SessionError> {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::info!("completion sweep already running, skipping");
            return Ok(SweepReport::skipped());
        };

        let overdue = self.repository.find_accepted_scheduled_before(&now).await?;
        let metadata = CommandMetadata::scheduler();

        let mut report = SweepReport {
            examined: overdue.len(),
            ..SweepReport::default()
        };

        for session in overdue {
            let session_id = *session.id();
            match self.complete_one(session, now, &metadata).await {
                Ok(()) => report.completed += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        session_id = %session_id,
                        error = %e,
                        "failed to complete overdue session, will retry next run"
                    );
                }
            }
        }

        tracing::info!(
            examined = report.examined,
            completed = report.completed,
            failed = report.failed,
            correlation_id = metadata.correlation_id().unwrap_or_default(),
            "completion sweep finished"
        );

        Ok(report)
    }

    async fn complete_one(
        &self,
        mut session: Session,
        now: Timestamp,
        metadata: &CommandMetadata,
    ) -> Result<(), SessionError> {
        session.complete_by_sweep(now)?;
        persist_transition(self.repository.as_ref(), &session).await?;

        let event = SessionCompleted::from_session(&session, CompletionSource::Sweep);
        publish_event(self.event_publisher.as_ref(), &event, metadata).await;
        Ok(())
    }
}
