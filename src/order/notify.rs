//! Submission outcome notifications
//!
//! The core never draws anything itself. It reports how a submission went
//! to an observer owned by the UI, which decides how to show it.

use log::info;
use serde::Serialize;
use uuid::Uuid;

use super::submit::OrderReceipt;
use crate::error::{PlateError, Result};

/// Receives the outcome of every submission attempt
pub trait SubmissionObserver {
    /// The order was accepted; `prompt` asks the user for a review
    fn on_success(&mut self, receipt: &OrderReceipt, prompt: ReviewPrompt);

    /// The order was not accepted; the plate is untouched and may be resubmitted
    fn on_failure(&mut self, error: &PlateError);
}

/// Feedback request shown after a successful order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewPrompt {
    pub submission_id: Uuid,
    pub title: &'static str,
    pub message: &'static str,
}

/// A review the user wrote for a submitted order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub submission_id: Uuid,
    pub text: String,
}

impl ReviewPrompt {
    pub fn for_receipt(receipt: &OrderReceipt) -> Self {
        Self {
            submission_id: receipt.submission_id,
            title: "Thank you for your order!",
            message: "We'd love to hear your feedback. Please leave a review below:",
        }
    }

    /// Accept a review; blank text is refused so the prompt can ask again
    pub fn respond(&self, text: &str) -> Result<Review> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PlateError::EmptyReview);
        }
        info!("Review submitted for order {}", self.submission_id);
        Ok(Review {
            submission_id: self.submission_id,
            text: text.to_string(),
        })
    }
}

/// Observer that keeps every notification, for headless runs and tests
#[derive(Debug, Default)]
pub struct CollectingObserver {
    pub prompts: Vec<ReviewPrompt>,
    pub notices: Vec<String>,
}

impl SubmissionObserver for CollectingObserver {
    fn on_success(&mut self, _receipt: &OrderReceipt, prompt: ReviewPrompt) {
        self.prompts.push(prompt);
    }

    fn on_failure(&mut self, error: &PlateError) {
        self.notices.push(error.friendly_message());
    }
}
