pub mod interpreter;
pub mod session;

pub use interpreter::angle::AngleMode;
pub use interpreter::error::EvaluationError;
pub use session::{Key, PreviewResult, Session};
