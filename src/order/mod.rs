//! Order Module
//!
//! Turns a finished plate into an order, sends it, and reports the outcome.

mod assembler;
mod mock;
mod notify;
mod submit;

pub use assembler::{assemble, OrderLine, OrderPayload};
pub use mock::MockSubmitter;
pub use notify::{CollectingObserver, Review, ReviewPrompt, SubmissionObserver};
pub use submit::{HttpOrderSubmitter, OrderReceipt, OrderSubmitter};
