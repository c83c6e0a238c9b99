//! Client-side single-rating gate.
//!
//! The repository accepts any number of rating updates; this gate is owned by
//! whoever renders one recipe view and lives only as long as that view.

use crate::domain::validation::MAX_RATING;

#[derive(Debug, Default, Clone)]
pub struct RatingGate {
    submitted: Option<u8>,
}

impl RatingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rating to send, or `None` if this view already rated or the
    /// value is outside 1..=5.
    pub fn submit(&mut self, rating: u8) -> Option<u8> {
        if self.submitted.is_some() || rating == 0 || u64::from(rating) > MAX_RATING {
            return None;
        }
        self.submitted = Some(rating);
        Some(rating)
    }

    pub fn has_rated(&self) -> bool {
        self.submitted.is_some()
    }
}
