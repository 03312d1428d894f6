//! Error handling for Plated
//!
//! Nothing in the composition core is fatal to a session. Rejected user
//! actions leave state untouched, submission failures leave layers intact
//! for a retry. Every error carries a code and a user-facing message.

use thiserror::Error;

/// Result type alias for Plated operations
pub type Result<T> = std::result::Result<T, PlateError>;

/// Main error type for Plated operations
#[derive(Error, Debug)]
pub enum PlateError {
    // Wizard Errors
    #[error("Action '{action}' is not allowed while in state {state}")]
    InvalidTransition { state: String, action: String },

    #[error("Cell {cell} is already occupied")]
    CellOccupied { cell: usize },

    #[error("Cell index {index} is outside the plate (0-5)")]
    InvalidCell { index: usize },

    #[error("No room for this portion around cell {cell}")]
    NoRoom { cell: usize },

    #[error("'{value}' is not a valid choice for {step}")]
    UnknownOption { step: String, value: String },

    #[error("Selection is missing its {field}")]
    IncompleteSelection { field: &'static str },

    // Layer Errors
    #[error("Layer limit of {limit} reached")]
    CapacityExceeded { limit: usize },

    #[error("Layer {id} cannot be deleted")]
    ProtectedLayer { id: usize },

    #[error("Layer {id} not found")]
    LayerNotFound { id: usize },

    #[error("Component {index} not found in layer {layer}")]
    ComponentNotFound { layer: usize, index: usize },

    // Submission Errors
    #[error("Order submission failed: {reason}")]
    SubmissionFailed { reason: String },

    #[error("Order endpoint rejected the order with status {status}")]
    SubmissionRejected { status: u16 },

    #[error("Review text is empty")]
    EmptyReview,

    // Configuration Errors
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlateError {
    pub(crate) fn invalid_transition(state: impl ToString, action: impl Into<String>) -> Self {
        PlateError::InvalidTransition {
            state: state.to_string(),
            action: action.into(),
        }
    }

    pub(crate) fn unknown_option(step: impl ToString, value: impl Into<String>) -> Self {
        PlateError::UnknownOption {
            step: step.to_string(),
            value: value.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            PlateError::InvalidTransition { .. } => "INVALID_TRANSITION",
            PlateError::CellOccupied { .. } => "CELL_OCCUPIED",
            PlateError::InvalidCell { .. } => "INVALID_CELL",
            PlateError::NoRoom { .. } => "NO_ROOM",
            PlateError::UnknownOption { .. } => "UNKNOWN_OPTION",
            PlateError::IncompleteSelection { .. } => "INCOMPLETE_SELECTION",
            PlateError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            PlateError::ProtectedLayer { .. } => "PROTECTED_LAYER",
            PlateError::LayerNotFound { .. } => "LAYER_NOT_FOUND",
            PlateError::ComponentNotFound { .. } => "COMPONENT_NOT_FOUND",
            PlateError::SubmissionFailed { .. } => "SUBMISSION_FAILED",
            PlateError::SubmissionRejected { .. } => "SUBMISSION_REJECTED",
            PlateError::EmptyReview => "EMPTY_REVIEW",
            PlateError::Config { .. } => "CONFIG_ERROR",
            PlateError::Io(_) => "IO_ERROR",
            PlateError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the session absorbs this error silently.
    ///
    /// Rejected user actions are dropped without any notice; everything
    /// else is surfaced to the user.
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            PlateError::InvalidTransition { .. }
                | PlateError::CellOccupied { .. }
                | PlateError::InvalidCell { .. }
                | PlateError::NoRoom { .. }
                | PlateError::UnknownOption { .. }
                | PlateError::CapacityExceeded { .. }
                | PlateError::ProtectedLayer { .. }
                | PlateError::LayerNotFound { .. }
                | PlateError::ComponentNotFound { .. }
        )
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PlateError::Config { .. } | PlateError::Io(_))
    }

    /// Get a user-friendly message for this error
    pub fn friendly_message(&self) -> String {
        match self {
            PlateError::CellOccupied { cell } => {
                format!("Square {} already has something on it. Pick another spot.", cell + 1)
            }
            PlateError::CapacityExceeded { limit } => {
                format!("A plate can have at most {} layers.", limit)
            }
            PlateError::SubmissionFailed { .. } => {
                "An error occurred while submitting the order.".to_string()
            }
            PlateError::SubmissionRejected { .. } => "Failed to submit the order.".to_string(),
            PlateError::EmptyReview => "Please write a review before submitting.".to_string(),
            _ => self.to_string(),
        }
    }
}
