#![warn(clippy::uninlined_format_args)]

pub mod audit;
pub mod eval_cases;
pub mod request;
pub mod tag_rules;

pub use audit::TracingAuditSink;
pub use eval_cases::{EVAL_CASES, EvalCase, EvalError, EvalOutcome, run_eval_suite};
pub use request::{DecodeError, SplitRequestDto};
pub use tag_rules::{TagRule, TagRuleInference};
