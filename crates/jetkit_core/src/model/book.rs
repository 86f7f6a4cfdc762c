//! Reading-tracker book record.
//!
//! # Invariants
//! - `id` is `None` only before the first insert; the store assigns it.
//! - `rating` stays within `0..=5` when set.
//! - `finished_reading >= started_reading` when both are set.

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BookId = Uuid;

/// Highest rating accepted by the tracker.
pub const MAX_RATING: u8 = 5;

/// Reading lifecycle derived from the two optional timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Unstarted,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<BookId>,
    pub title: String,
    pub authors: String,
    pub notes: Option<String>,
    pub rating: Option<u8>,
    /// Identifier of the volume in the remote book search service.
    pub google_book_id: Option<String>,
    /// Owner of the record; stats are scoped per owner.
    pub user_id: Option<String>,
    /// Unix epoch milliseconds.
    pub started_reading: Option<i64>,
    /// Unix epoch milliseconds.
    pub finished_reading: Option<i64>,
}

impl Book {
    /// Creates an unsaved, unstarted book.
    pub fn new(title: impl Into<String>, authors: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            ..Self::default()
        }
    }

    /// Classifies the book. A finish timestamp wins over a start timestamp.
    pub fn status(&self) -> ReadingStatus {
        match (self.started_reading, self.finished_reading) {
            (_, Some(_)) => ReadingStatus::Finished,
            (Some(_), None) => ReadingStatus::InProgress,
            (None, None) => ReadingStatus::Unstarted,
        }
    }

    /// Returns a copy carrying the given identity.
    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        if let Some(rating) = self.rating {
            if rating > MAX_RATING {
                return Err(ValidationError::RatingOutOfRange(rating));
            }
        }
        if let (Some(started), Some(finished)) = (self.started_reading, self.finished_reading) {
            if finished < started {
                return Err(ValidationError::FinishedBeforeStarted { started, finished });
            }
        }
        Ok(())
    }
}

/// Search/details item returned by the remote book service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookVolume {
    /// Remote identifier, also used as the details fetch key.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
}

impl BookVolume {
    /// Builds an unsaved, unstarted tracker record owned by `user_id`.
    pub fn to_book(&self, user_id: Option<&str>) -> Book {
        Book {
            title: self.title.clone(),
            authors: self.authors.join(", "),
            google_book_id: Some(self.id.clone()),
            user_id: user_id.map(str::to_string),
            ..Book::default()
        }
    }
}
