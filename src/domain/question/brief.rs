//! Analysis brief: the structured statement of what a well-formed
//! question will investigate.

use serde::{Deserialize, Serialize};

/// Immutable once generated; produced by the external setup generator and
/// cached on the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisBrief {
    /// Short title of the planned analysis.
    pub heading: String,

    /// What the analysis will look at.
    pub description: String,

    /// The hypothesis under test.
    pub hypothesis: String,

    /// Statistical test the downstream pipeline should run.
    pub statistical_test: String,

    /// Which users the analysis covers.
    pub user_cohort: String,

    /// Time window of the analysis.
    pub time_frame: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_fields() {
        let brief = AnalysisBrief {
            heading: "Churn drivers".to_string(),
            description: "Retention drop in week two".to_string(),
            hypothesis: "Hard onboarding causes early churn".to_string(),
            statistical_test: "chi-squared".to_string(),
            user_cohort: "new installs".to_string(),
            time_frame: "last 30 days".to_string(),
        };

        let json = serde_json::to_string(&brief).unwrap();
        assert!(json.contains("statistical_test"));
        assert!(json.contains("user_cohort"));
    }
}
