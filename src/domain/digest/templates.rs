//! Static insight copy, keyed by pillar and trend.
//!
//! The table is finite and enumerable; any combination it does not cover
//! falls back to a generic templated string, never an error.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::pillar::Pillar;

use super::Trend;

/// Canned summary/recommendation pair for one pillar/trend combination.
pub(super) struct InsightCopy {
    pub summary: &'static str,
    pub recommendation: &'static str,
}

static INSIGHT_TABLE: Lazy<HashMap<(Pillar, Trend), InsightCopy>> = Lazy::new(|| {
    use Pillar::*;
    use Trend::*;

    let mut table = HashMap::new();
    table.insert(
        (Retention, Up),
        InsightCopy {
            summary: "Retention questions picked up noticeably through the week.",
            recommendation: "Run a cohort retention analysis before the spike cools off.",
        },
    );
    table.insert(
        (Retention, Down),
        InsightCopy {
            summary: "Retention questions tapered off in the back half of the week.",
            recommendation: "Check whether the churn concerns from earlier were resolved or just dropped.",
        },
    );
    table.insert(
        (Retention, Stable),
        InsightCopy {
            summary: "Retention stayed a steady presence in this week's questions.",
            recommendation: "Keep the weekly retention snapshot on the dashboard front page.",
        },
    );
    table.insert(
        (Engagement, Up),
        InsightCopy {
            summary: "Engagement questions accelerated as the week went on.",
            recommendation: "Break engagement down by feature to find what is drawing attention.",
        },
    );
    table.insert(
        (Engagement, Stable),
        InsightCopy {
            summary: "Engagement held its usual share of questions.",
            recommendation: "Consider a session-length deep dive to move beyond surface metrics.",
        },
    );
    table.insert(
        (Monetization, Up),
        InsightCopy {
            summary: "Monetization moved up the question list this week.",
            recommendation: "Pair revenue questions with conversion funnel data before acting.",
        },
    );
    table.insert(
        (Monetization, Down),
        InsightCopy {
            summary: "Monetization questions fell away during the week.",
            recommendation: "Revisit the open revenue analyses so they do not go stale.",
        },
    );
    table.insert(
        (Store, Stable),
        InsightCopy {
            summary: "Store performance questions arrived at a steady clip.",
            recommendation: "A conversion-rate benchmark would answer most of these at once.",
        },
    );
    table.insert(
        (UserAcquisition, Up),
        InsightCopy {
            summary: "Acquisition questions surged in the second half of the week.",
            recommendation: "Compare channel-level CAC while the campaign data is fresh.",
        },
    );
    table.insert(
        (TechHealth, Up),
        InsightCopy {
            summary: "Tech health questions climbed, usually a sign of a rough release.",
            recommendation: "Cross-reference crash rates with the latest build before the next push.",
        },
    );
    table.insert(
        (Social, Stable),
        InsightCopy {
            summary: "Social feature questions kept their usual cadence.",
            recommendation: "A referral-loop analysis would consolidate the recurring asks.",
        },
    );
    table
});

/// Returns the summary and recommendation for a pillar/trend combination.
pub(super) fn insight_copy(pillar: Pillar, trend: Trend) -> (String, String) {
    match INSIGHT_TABLE.get(&(pillar, trend)) {
        Some(copy) => (copy.summary.to_string(), copy.recommendation.to_string()),
        None => (
            format!(
                "{} questions trended {} this week.",
                pillar.display_name(),
                trend
            ),
            format!(
                "Review the week's {} questions and schedule follow-up analyses.",
                pillar.display_name()
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_hit_returns_canned_copy() {
        let (summary, recommendation) = insight_copy(Pillar::Retention, Trend::Up);
        assert!(summary.contains("Retention questions picked up"));
        assert!(recommendation.contains("cohort retention"));
    }

    #[test]
    fn table_miss_falls_back_to_template() {
        let (summary, recommendation) = insight_copy(Pillar::Social, Trend::Down);
        assert!(summary.contains("Social"));
        assert!(summary.contains("down"));
        assert!(recommendation.contains("Social"));
    }

    #[test]
    fn every_combination_produces_copy() {
        for pillar in Pillar::ALL {
            for trend in [Trend::Up, Trend::Down, Trend::Stable] {
                let (summary, recommendation) = insight_copy(pillar, trend);
                assert!(!summary.is_empty());
                assert!(!recommendation.is_empty());
            }
        }
    }
}
