//! Reader reviews attached to articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A stored review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub article_id: String,

    /// 1 to 5
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A review as submitted, before it is assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub article_id: String,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(AppError::validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            )));
        }
        if self.article_id.trim().is_empty() {
            return Err(AppError::validation("review is missing an article id"));
        }
        Ok(())
    }
}

/// Reviews of one article with their average rating.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewSummary {
    pub reviews: Vec<Review>,

    /// Mean rating rounded to one decimal, 0 when there are no reviews
    pub avg: f64,
}

impl ReviewSummary {
    pub fn new(reviews: Vec<Review>) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        let mean = f64::from(sum) / reviews.len() as f64;
        Self {
            avg: (mean * 10.0).round() / 10.0,
            reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            id: format!("r{rating}"),
            user_id: "u1".into(),
            article_id: "a1".into(),
            rating,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_rounds_to_one_decimal() {
        let summary = ReviewSummary::new(vec![review(5), review(4), review(4)]);
        assert_eq!(summary.avg, 4.3);
        assert_eq!(summary.reviews.len(), 3);
    }

    #[test]
    fn test_empty_summary_has_zero_average() {
        let summary = ReviewSummary::new(Vec::new());
        assert_eq!(summary.avg, 0.0);
    }

    #[test]
    fn test_rating_bounds() {
        let mut new = NewReview {
            article_id: "a1".into(),
            rating: 0,
            comment: "meh".into(),
        };
        assert!(new.validate().is_err());
        new.rating = 6;
        assert!(new.validate().is_err());
        new.rating = 5;
        assert!(new.validate().is_ok());
    }
}
