#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod split_processor;
pub mod validation;

pub use error::{InferenceError, SplitError, SplitValidationError};
pub use model::{InferredModifier, ParticipantProfile, SplitOutcome, SplitRequest};
pub use ports::{AuditRecord, AuditSink, InferenceContext, ModifierInference, NoopAuditSink};
pub use split_processor::SplitProcessor;
pub use validation::validate_request;
