//! Question aggregate and lifecycle.
//!
//! A question moves through a small closed state machine from submission
//! to resolution. Ambiguous questions detour through the clarification
//! sub-protocol before entering the analysis queue.

mod aggregate;
mod brief;
mod clarification;
mod errors;
mod events;
mod result;
mod status;

pub use aggregate::Question;
pub use brief::AnalysisBrief;
pub use clarification::{ClarificationAnswers, ClarifyingQuestion, QuestionAnswer};
pub use errors::QuestionError;
pub use events::{
    QuestionCancelled, QuestionClarified, QuestionCompleted, QuestionSubmitted, WeightsUpdated,
};
pub use result::AnalysisResult;
pub use status::{QuestionSource, QuestionStatus};
