//! Review form: a five-star rating widget plus the text fields.

use serde::Serialize;

use crate::error::ValidationError;
use crate::products::Review;

const STAR_COUNT: u8 = 5;

/// Five star controls. Selecting star `n` lights stars `1..=n`; the value
/// is mirrored into a hidden numeric field, which is what gets submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarRating {
    value: u8,
    hidden_field: String,
}

impl Default for StarRating {
    fn default() -> Self {
        Self::new(STAR_COUNT)
    }
}

impl StarRating {
    fn new(value: u8) -> Self {
        Self {
            value,
            hidden_field: value.to_string(),
        }
    }

    /// Click on star `n`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RatingOutOfRange`] unless `1 <= n <= 5`.
    pub fn select(&mut self, n: u8) -> Result<(), ValidationError> {
        if !(1..=STAR_COUNT).contains(&n) {
            return Err(ValidationError::RatingOutOfRange(n));
        }
        *self = Self::new(n);
        Ok(())
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    #[must_use]
    pub fn hidden_field(&self) -> &str {
        &self.hidden_field
    }

    /// Highlight state of each star control, left to right.
    #[must_use]
    pub fn active_stars(&self) -> [bool; STAR_COUNT as usize] {
        std::array::from_fn(|i| i < usize::from(self.value))
    }
}

/// `★★★★☆` style rendering of a rating, clamped to 0–5.
#[must_use]
pub fn star_string(rating: u8) -> String {
    let filled = usize::from(rating.min(STAR_COUNT));
    let empty = usize::from(STAR_COUNT) - filled;
    format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(empty))
}

/// Review modal contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub author: String,
    pub title: String,
    pub content: String,
    pub verified: bool,
    pub rating: StarRating,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            author: String::new(),
            title: String::new(),
            content: String::new(),
            verified: true,
            rating: StarRating::default(),
        }
    }
}

impl ReviewDraft {
    /// Draft pre-filled from an existing review. Ratings outside 1–5 fall
    /// back to 5 stars.
    #[must_use]
    pub fn from_review(review: &Review) -> Self {
        let rating = if (1..=STAR_COUNT).contains(&review.rating) {
            StarRating::new(review.rating)
        } else {
            StarRating::default()
        };
        Self {
            author: review.author.clone(),
            title: review.title.clone().unwrap_or_default(),
            content: review.content.clone(),
            verified: review.verified,
            rating,
        }
    }

    /// Serialize and validate the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteReview`] when the author or the
    /// content is blank.
    pub fn to_payload(&self) -> Result<ReviewPayload, ValidationError> {
        let payload = ReviewPayload {
            author: self.author.trim().to_string(),
            rating: self
                .rating
                .hidden_field()
                .parse()
                .unwrap_or(STAR_COUNT),
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            verified: self.verified,
        };
        if payload.author.is_empty() || payload.content.is_empty() {
            return Err(ValidationError::IncompleteReview);
        }
        Ok(payload)
    }
}

/// Body of the review create/update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewPayload {
    pub author: String,
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub verified: bool,
}
