//! Directory records: subjects, people and tutor profiles.
//!
//! These are owned by other services. The booking core only reads them,
//! with one exception: the tutor's average rating, which the review
//! aggregator recomputes and writes back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, PersonId, SubjectId, TutorId};

/// A subject that sessions can be booked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub code: Option<i32>,
    pub name: String,
}

/// A registered person. Students are people; tutors are people with a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub full_name: String,
}

/// Tutor profile with its reputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorProfile {
    id: TutorId,
    person_id: PersonId,
    hourly_rate: Money,
    average_rating: Decimal,
    active: bool,
}

impl TutorProfile {
    /// Creates a profile with no reviews yet.
    pub fn new(id: TutorId, person_id: PersonId, hourly_rate: Money) -> Self {
        Self {
            id,
            person_id,
            hourly_rate,
            average_rating: Decimal::ZERO,
            active: true,
        }
    }

    /// Reconstitute a profile from persistence.
    pub fn reconstitute(
        id: TutorId,
        person_id: PersonId,
        hourly_rate: Money,
        average_rating: Decimal,
        active: bool,
    ) -> Self {
        Self {
            id,
            person_id,
            hourly_rate,
            average_rating,
            active,
        }
    }

    pub fn id(&self) -> &TutorId {
        &self.id
    }

    pub fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    pub fn hourly_rate(&self) -> Money {
        self.hourly_rate
    }

    pub fn average_rating(&self) -> Decimal {
        self.average_rating
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replaces the average rating. Only the review aggregator calls this.
    pub(crate) fn record_average_rating(&mut self, average: Decimal) {
        self.average_rating = average;
    }
}
