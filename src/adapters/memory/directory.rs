//! In-memory directory of subjects, people and tutor profiles.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::directory::{Person, Subject, TutorProfile};
use crate::domain::foundation::{DomainError, ErrorCode, PersonId, SubjectId, TutorId};
use crate::ports::{PersonDirectory, SubjectDirectory, TutorDirectory};

/// One store implementing all three directory ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    subjects: Arc<RwLock<HashMap<SubjectId, Subject>>>,
    people: Arc<RwLock<HashMap<PersonId, Person>>>,
    tutors: Arc<RwLock<HashMap<TutorId, TutorProfile>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_subject(&self, subject: Subject) {
        self.subjects.write().await.insert(subject.id, subject);
    }

    pub async fn add_person(&self, person: Person) {
        self.people.write().await.insert(person.id, person);
    }

    pub async fn add_tutor(&self, profile: TutorProfile) {
        self.tutors.write().await.insert(*profile.id(), profile);
    }
}

#[async_trait]
impl SubjectDirectory for InMemoryDirectory {
    async fn find_subject(&self, id: &SubjectId) -> Result<Option<Subject>, DomainError> {
        Ok(self.subjects.read().await.get(id).cloned())
    }
}

#[async_trait]
impl PersonDirectory for InMemoryDirectory {
    async fn find_person(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        Ok(self.people.read().await.get(id).cloned())
    }
}

#[async_trait]
impl TutorDirectory for InMemoryDirectory {
    async fn find_tutor(&self, id: &TutorId) -> Result<Option<TutorProfile>, DomainError> {
        Ok(self.tutors.read().await.get(id).cloned())
    }

    async fn store_average_rating(
        &self,
        id: &TutorId,
        average: Decimal,
    ) -> Result<(), DomainError> {
        let mut tutors = self.tutors.write().await;
        match tutors.get_mut(id) {
            Some(stored) => {
                stored.record_average_rating(average);
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::TutorNotFound,
                format!("Tutor not found: {}", id),
            )),
        }
    }
}
