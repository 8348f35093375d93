//! ListSessionsHandler - a participant's sessions, enriched with names.
//!
//! One query covers the student and tutor listings; an optional state
//! narrows it to pending, active (accepted) or completed sessions.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Money, PersonId, SessionId, SubjectId, Timestamp, TutorId};
use crate::domain::session::{Session, SessionError, SessionState};
use crate::ports::{
    Participant, PersonDirectory, SessionFilter, SessionRepository, SubjectDirectory,
    TutorDirectory,
};

#[derive(Debug, Clone)]
pub struct ListSessionsQuery {
    pub participant: Participant,
    pub state: Option<SessionState>,
}

/// Session listing row with display names resolved.
///
/// Names are `None` when the directory no longer knows the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub subject_id: SubjectId,
    pub subject_name: Option<String>,
    pub student_id: PersonId,
    pub student_name: Option<String>,
    pub tutor_id: TutorId,
    pub tutor_name: Option<String>,
    pub requested_at: Timestamp,
    pub scheduled_at: Timestamp,
    pub description: String,
    pub offered_price: Money,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

pub struct ListSessionsHandler {
    repository: Arc<dyn SessionRepository>,
    subjects: Arc<dyn SubjectDirectory>,
    people: Arc<dyn PersonDirectory>,
    tutors: Arc<dyn TutorDirectory>,
}

impl ListSessionsHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        subjects: Arc<dyn SubjectDirectory>,
        people: Arc<dyn PersonDirectory>,
        tutors: Arc<dyn TutorDirectory>,
    ) -> Self {
        Self {
            repository,
            subjects,
            people,
            tutors,
        }
    }

    /// Sessions ordered by request time, oldest first.
    pub async fn handle(&self, query: ListSessionsQuery) -> Result<Vec<SessionSummary>, SessionError> {
        let filter = SessionFilter {
            participant: query.participant,
            state: query.state,
            scheduled_after: None,
        };
        let sessions = self.repository.find_by_filter(&filter).await?;

        let mut names = NameCache::default();
        let mut summaries = Vec::with_capacity(sessions.len());
        for session in sessions {
            let subject_name = self.subject_name(&mut names, session.subject_id()).await?;
            let student_name = self.person_name(&mut names, session.student_id()).await?;
            let tutor_name = self.tutor_name(&mut names, session.tutor_id()).await?;
            summaries.push(summarize(session, subject_name, student_name, tutor_name));
        }
        Ok(summaries)
    }

    async fn subject_name(
        &self,
        names: &mut NameCache,
        id: &SubjectId,
    ) -> Result<Option<String>, SessionError> {
        if let Some(name) = names.subjects.get(id) {
            return Ok(name.clone());
        }
        let name = self.subjects.find_subject(id).await?.map(|s| s.name);
        names.subjects.insert(*id, name.clone());
        Ok(name)
    }

    async fn person_name(
        &self,
        names: &mut NameCache,
        id: &PersonId,
    ) -> Result<Option<String>, SessionError> {
        if let Some(name) = names.people.get(id) {
            return Ok(name.clone());
        }
        let name = self.people.find_person(id).await?.map(|p| p.full_name);
        names.people.insert(*id, name.clone());
        Ok(name)
    }

    async fn tutor_name(
        &self,
        names: &mut NameCache,
        id: &TutorId,
    ) -> Result<Option<String>, SessionError> {
        if let Some(name) = names.tutors.get(id) {
            return Ok(name.clone());
        }
        let name = match self.tutors.find_tutor(id).await? {
            Some(profile) => self.person_name(names, profile.person_id()).await?,
            None => None,
        };
        names.tutors.insert(*id, name.clone());
        Ok(name)
    }
}

#[derive(Default)]
struct NameCache {
    subjects: HashMap<SubjectId, Option<String>>,
    people: HashMap<PersonId, Option<String>>,
    tutors: HashMap<TutorId, Option<String>>,
}

fn summarize(
    session: Session,
    subject_name: Option<String>,
    student_name: Option<String>,
    tutor_name: Option<String>,
) -> SessionSummary {
    SessionSummary {
        id: *session.id(),
        subject_id: *session.subject_id(),
        subject_name,
        student_id: *session.student_id(),
        student_name,
        tutor_id: *session.tutor_id(),
        tutor_name,
        requested_at: *session.requested_at(),
        scheduled_at: *session.scheduled_at(),
        description: session.description().to_string(),
        offered_price: session.offered_price(),
        state: session.state(),
        rejection_reason: session.rejection_reason().map(str::to_string),
        cancellation_reason: session.cancellation_reason().map(str::to_string),
    }
}
