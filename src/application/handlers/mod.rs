//! Command and query handlers.

mod answer_clarifications;
mod cancel_question;
mod complete_question;
mod generate_digest;
mod get_weights;
mod list_questions;
mod submit_question;

pub use answer_clarifications::{
    AnswerClarificationsCommand, AnswerClarificationsHandler, AnswerClarificationsResult,
};
pub use cancel_question::{CancelQuestionCommand, CancelQuestionHandler};
pub use complete_question::{CompleteQuestionCommand, CompleteQuestionHandler};
pub use generate_digest::GenerateDigestHandler;
pub use get_weights::GetWeightsHandler;
pub use list_questions::ListActiveQuestionsHandler;
pub use submit_question::{SubmitQuestionCommand, SubmitQuestionHandler, SubmitQuestionResult};
