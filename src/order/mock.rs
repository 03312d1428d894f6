//! In-memory submitter
//!
//! Records every payload it receives instead of sending it anywhere. Used
//! by `--dry-run` and by tests; it can be told to fail the next attempts.

use std::cell::{Cell, RefCell};

use super::assembler::OrderPayload;
use super::submit::{OrderReceipt, OrderSubmitter};
use crate::error::{PlateError, Result};

#[derive(Debug, Default)]
pub struct MockSubmitter {
    received: RefCell<Vec<OrderPayload>>,
    failures_left: Cell<usize>,
    reject_status: Option<u16>,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` submissions with a transport error
    pub fn failing(count: usize) -> Self {
        let mock = Self::new();
        mock.failures_left.set(count);
        mock
    }

    /// Reject every submission with an HTTP status
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_status: Some(status),
            ..Self::default()
        }
    }

    /// Payloads accepted so far, oldest first
    pub fn received(&self) -> Vec<OrderPayload> {
        self.received.borrow().clone()
    }
}

impl OrderSubmitter for MockSubmitter {
    fn submit(&self, payload: &OrderPayload) -> Result<OrderReceipt> {
        if let Some(status) = self.reject_status {
            return Err(PlateError::SubmissionRejected { status });
        }
        let failures = self.failures_left.get();
        if failures > 0 {
            self.failures_left.set(failures - 1);
            return Err(PlateError::SubmissionFailed {
                reason: "simulated network failure".to_string(),
            });
        }
        self.received.borrow_mut().push(payload.clone());
        Ok(OrderReceipt::new(
            payload,
            serde_json::json!({ "status": "created" }),
        ))
    }
}
