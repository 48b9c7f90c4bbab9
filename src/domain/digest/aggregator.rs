//! Digest generation over a week of question history.

use std::collections::BTreeMap;

use crate::domain::foundation::Timestamp;
use crate::domain::pillar::{Pillar, PillarWeights};
use crate::domain::question::Question;

use super::templates::insight_copy;
use super::{DigestReport, PillarInsight, TopPillar, Trend};

/// Maximum number of top pillars in a digest.
const MAX_TOP_PILLARS: usize = 3;

/// Maximum number of action items in a digest.
const MAX_ACTION_ITEMS: usize = 3;

/// Maximum number of next-week focus suggestions.
const MAX_FOCUS_ITEMS: usize = 2;

/// Maximum number of supporting questions per insight.
const MAX_SUPPORTING_QUESTIONS: usize = 3;

/// Share above which the digest suggests diversifying.
const DIVERSIFY_SHARE_PERCENT: f64 = 60.0;

/// Builds the weekly digest from committed state.
///
/// Pure function of its inputs: the caller's questions, a weight store
/// snapshot, and the clock. Cancelled questions are excluded; the weight
/// paired with each top pillar is the store value, not the share.
pub fn generate_digest(
    questions: &[Question],
    weights: &PillarWeights,
    now: Timestamp,
    window_days: i64,
) -> DigestReport {
    let week_start = now.minus_days(window_days);

    // Window selection: created within [now - window, now), still active.
    let mut in_window: Vec<&Question> = questions
        .iter()
        .filter(|q| q.is_active())
        .filter(|q| !q.created_at().is_before(&week_start) && q.created_at().is_before(&now))
        .collect();
    in_window.sort_by_key(|q| *q.created_at());

    let total_questions = in_window.len();

    // Group by primary pillar, chronological order preserved.
    let mut by_pillar: BTreeMap<Pillar, Vec<&Question>> = BTreeMap::new();
    for question in &in_window {
        if let Some(intent) = question.intent() {
            by_pillar
                .entry(intent.primary_pillar)
                .or_default()
                .push(question);
        }
    }

    // Rank by count descending; BTreeMap iteration plus stable sort keeps
    // taxonomy order as the tie-break.
    let mut ranked: Vec<(Pillar, &Vec<&Question>)> =
        by_pillar.iter().map(|(p, qs)| (*p, qs)).collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked.truncate(MAX_TOP_PILLARS);

    let top_pillars: Vec<TopPillar> = ranked
        .iter()
        .map(|(pillar, qs)| TopPillar {
            pillar: *pillar,
            weight: weights.get(*pillar),
            share_percent: qs.len() as f64 / total_questions as f64 * 100.0,
        })
        .collect();

    let insights: Vec<PillarInsight> = ranked
        .iter()
        .map(|(pillar, qs)| build_insight(*pillar, qs))
        .collect();

    let action_items = build_action_items(&top_pillars, &insights);
    let next_week_focus = build_next_week_focus(&top_pillars, weights);

    DigestReport {
        week_start,
        week_end: now,
        total_questions,
        top_pillars,
        insights,
        action_items,
        next_week_focus,
    }
}

/// Computes the trend of a pillar's chronological question list.
///
/// The list is split at its midpoint; a back half more than 1.2x the
/// front half reads as rising interest, below 0.8x as fading.
fn trend_of(questions: &[&Question]) -> Trend {
    if questions.len() < 2 {
        return Trend::Stable;
    }
    let mid = questions.len() / 2;
    let first = mid as f64;
    let second = (questions.len() - mid) as f64;

    if second > 1.2 * first {
        Trend::Up
    } else if second < 0.8 * first {
        Trend::Down
    } else {
        Trend::Stable
    }
}

fn build_insight(pillar: Pillar, questions: &[&Question]) -> PillarInsight {
    let trend = trend_of(questions);
    let (summary, recommendation) = insight_copy(pillar, trend);

    let trend_label = match trend {
        Trend::Up => "rising",
        Trend::Down => "fading",
        Trend::Stable => "steady",
    };

    // Most recent questions, kept in chronological order.
    let supporting_questions = questions
        .iter()
        .rev()
        .take(MAX_SUPPORTING_QUESTIONS)
        .rev()
        .map(|q| q.text().to_string())
        .collect();

    PillarInsight {
        title: format!("{}: {}", pillar.display_name(), trend_label),
        summary,
        trend,
        recommendation,
        supporting_questions,
    }
}

/// Action items in priority order: focus on the top pillar, scale up
/// rising pillars, re-engage fading ones, then diversify if the top
/// pillar dominates. Truncated to three.
fn build_action_items(top_pillars: &[TopPillar], insights: &[PillarInsight]) -> Vec<String> {
    let mut items = Vec::new();

    let Some(top) = top_pillars.first() else {
        return items;
    };

    items.push(format!(
        "Focus on {} ({:.1}% of this week's questions)",
        top.pillar.display_name(),
        top.share_percent
    ));

    for (insight, ranked) in insights.iter().zip(top_pillars) {
        if insight.trend == Trend::Up {
            items.push(format!(
                "Scale up {} analyses while interest is rising",
                ranked.pillar.display_name()
            ));
        }
    }
    for (insight, ranked) in insights.iter().zip(top_pillars) {
        if insight.trend == Trend::Down {
            items.push(format!(
                "Re-engage with {} before interest disappears",
                ranked.pillar.display_name()
            ));
        }
    }

    if top.share_percent > DIVERSIFY_SHARE_PERCENT {
        items.push(format!(
            "Diversify beyond {}; it dominates this week's questions",
            top.pillar.display_name()
        ));
    }

    items.truncate(MAX_ACTION_ITEMS);
    items
}

/// Next-week focus: an unexplored pillar first, then a deep dive on the
/// top pillar, and a cross-pillar correlation only when the first two
/// slots stayed empty. Truncated to two.
fn build_next_week_focus(top_pillars: &[TopPillar], weights: &PillarWeights) -> Vec<String> {
    let mut focus = Vec::new();

    // Lowest-weight pillar absent from the top list counts as the most
    // underexplored.
    let unexplored = Pillar::ALL
        .iter()
        .filter(|p| !top_pillars.iter().any(|t| t.pillar == **p))
        .min_by(|a, b| {
            weights
                .get(**a)
                .value()
                .partial_cmp(&weights.get(**b).value())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(pillar) = unexplored {
        focus.push(format!(
            "Explore {}; no questions touched it this week",
            pillar.display_name()
        ));
    }

    if let Some(top) = top_pillars.first() {
        focus.push(format!(
            "Deep-dive into {} with a dedicated analysis",
            top.pillar.display_name()
        ));
    }

    if focus.is_empty() && top_pillars.len() >= 2 {
        focus.push(format!(
            "Correlate {} with {} across the same cohorts",
            top_pillars[0].pillar.display_name(),
            top_pillars[1].pillar.display_name()
        ));
    }

    focus.truncate(MAX_FOCUS_ITEMS);
    focus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{QuestionId, UserId};
    use crate::domain::intent::{Confidence, IntentClassification};
    use crate::domain::pillar::Weight;
    use crate::domain::question::QuestionSource;

    fn user() -> UserId {
        UserId::new("player-1").unwrap()
    }

    fn question_about(pillar: Pillar, text: &str, days_ago: i64) -> Question {
        let q = Question::queued(
            QuestionId::new(),
            user(),
            text.to_string(),
            QuestionSource::Web,
        )
        .unwrap()
        .with_intent(Some(IntentClassification::new(
            vec![pillar],
            Confidence::new(0.9),
            pillar,
        )));

        // Backdate via reconstitution to keep the aggregate constructor honest.
        let created = Timestamp::now().minus_days(days_ago);
        Question::reconstitute(
            *q.id(),
            q.user_id().clone(),
            q.text().to_string(),
            q.source(),
            q.status(),
            q.intent().cloned(),
            None,
            false,
            None,
            None,
            created,
            created,
        )
    }

    #[test]
    fn empty_history_produces_empty_digest() {
        let report = generate_digest(&[], &PillarWeights::default_vector(), Timestamp::now(), 7);
        assert_eq!(report.total_questions, 0);
        assert!(report.top_pillars.is_empty());
        assert!(report.insights.is_empty());
        assert!(report.action_items.is_empty());
        // An unexplored pillar is still worth suggesting.
        assert_eq!(report.next_week_focus.len(), 1);
    }

    #[test]
    fn two_retention_one_monetization_ranks_retention_first() {
        let questions = vec![
            question_about(Pillar::Retention, "Why are players churning?", 5),
            question_about(Pillar::Retention, "Is day-7 retention down?", 3),
            question_about(Pillar::Monetization, "How is ARPU trending?", 2),
        ];

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );

        assert_eq!(report.total_questions, 3);
        assert_eq!(report.top_pillars[0].pillar, Pillar::Retention);
        assert!((report.top_pillars[0].share_percent - 66.7).abs() < 0.1);
        assert_eq!(report.top_pillars[1].pillar, Pillar::Monetization);
    }

    #[test]
    fn top_pillar_weight_comes_from_the_store_not_the_share() {
        let mut weights = PillarWeights::default_vector();
        weights.set(Pillar::Retention, Weight::new(0.81));
        let questions = vec![question_about(Pillar::Retention, "Churn?", 1)];

        let report = generate_digest(&questions, &weights, Timestamp::now(), 7);
        assert_eq!(report.top_pillars[0].weight.value(), 0.81);
    }

    #[test]
    fn questions_outside_window_are_ignored() {
        let questions = vec![
            question_about(Pillar::Retention, "Old question", 10),
            question_about(Pillar::Social, "Fresh question", 1),
        ];

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.top_pillars[0].pillar, Pillar::Social);
    }

    #[test]
    fn cancelled_questions_are_excluded() {
        let mut cancelled = question_about(Pillar::Retention, "Never mind", 1);
        cancelled.cancel().unwrap();
        let questions = vec![cancelled, question_about(Pillar::Store, "Store conversion?", 1)];

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.top_pillars[0].pillar, Pillar::Store);
    }

    #[test]
    fn unclassified_questions_count_toward_total_but_not_shares() {
        let unclassified = Question::queued(
            QuestionId::new(),
            user(),
            "Mystery question".to_string(),
            QuestionSource::Web,
        )
        .unwrap();
        let questions = vec![
            unclassified,
            question_about(Pillar::Retention, "Churn?", 1),
        ];

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );
        assert_eq!(report.total_questions, 2);
        assert_eq!(report.top_pillars.len(), 1);
        assert!((report.top_pillars[0].share_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trend_is_stable_below_two_questions() {
        let q = question_about(Pillar::Retention, "Churn?", 1);
        assert_eq!(trend_of(&[&q]), Trend::Stable);
        assert_eq!(trend_of(&[]), Trend::Stable);
    }

    #[test]
    fn trend_rises_when_back_half_outweighs_front() {
        // Three questions: front half 1, back half 2, 2 > 1.2.
        let a = question_about(Pillar::Retention, "q1", 6);
        let b = question_about(Pillar::Retention, "q2", 2);
        let c = question_about(Pillar::Retention, "q3", 1);
        assert_eq!(trend_of(&[&a, &b, &c]), Trend::Up);
    }

    #[test]
    fn trend_is_stable_for_even_split() {
        let a = question_about(Pillar::Retention, "q1", 6);
        let b = question_about(Pillar::Retention, "q2", 1);
        assert_eq!(trend_of(&[&a, &b]), Trend::Stable);
    }

    #[test]
    fn insights_cap_supporting_questions_at_three() {
        let questions: Vec<Question> = (0..5)
            .map(|i| question_about(Pillar::Retention, &format!("q{}", i), 6 - i))
            .collect();

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );
        assert_eq!(report.insights[0].supporting_questions.len(), 3);
        // Most recent three, still chronological.
        assert_eq!(report.insights[0].supporting_questions, vec!["q2", "q3", "q4"]);
    }

    #[test]
    fn action_items_lead_with_top_pillar_focus() {
        let questions = vec![
            question_about(Pillar::Retention, "q1", 5),
            question_about(Pillar::Retention, "q2", 2),
            question_about(Pillar::Monetization, "q3", 1),
        ];

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );
        assert!(report.action_items[0].starts_with("Focus on Retention"));
        assert!(report.action_items.len() <= 3);
    }

    #[test]
    fn dominant_pillar_triggers_diversification_item() {
        // 100% share, stable trend: focus item plus diversify item.
        let questions = vec![
            question_about(Pillar::Retention, "q1", 5),
            question_about(Pillar::Retention, "q2", 1),
        ];

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );
        assert!(report
            .action_items
            .iter()
            .any(|item| item.starts_with("Diversify beyond Retention")));
    }

    #[test]
    fn action_items_never_exceed_three() {
        // Three pillars all trending up would produce four candidates.
        let questions = vec![
            question_about(Pillar::Retention, "r1", 6),
            question_about(Pillar::Retention, "r2", 2),
            question_about(Pillar::Retention, "r3", 1),
            question_about(Pillar::Monetization, "m1", 6),
            question_about(Pillar::Monetization, "m2", 2),
            question_about(Pillar::Monetization, "m3", 1),
            question_about(Pillar::Social, "s1", 6),
            question_about(Pillar::Social, "s2", 2),
            question_about(Pillar::Social, "s3", 1),
        ];

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );
        assert_eq!(report.action_items.len(), 3);
    }

    #[test]
    fn next_week_focus_suggests_absent_pillar_and_deep_dive() {
        let questions = vec![
            question_about(Pillar::Retention, "q1", 5),
            question_about(Pillar::Monetization, "q2", 1),
        ];
        let mut weights = PillarWeights::default_vector();
        weights.set(Pillar::TechHealth, Weight::new(0.1));

        let report = generate_digest(&questions, &weights, Timestamp::now(), 7);

        assert_eq!(report.next_week_focus.len(), 2);
        // Lowest-weight absent pillar is the exploration target.
        assert!(report.next_week_focus[0].contains("Tech Health"));
        assert!(report.next_week_focus[1].contains("Deep-dive into Retention"));
    }

    #[test]
    fn digest_bounds_hold() {
        let questions: Vec<Question> = Pillar::ALL
            .iter()
            .flat_map(|p| {
                (0..4).map(move |i| question_about(*p, &format!("{} q{}", p, i), (i + 1) as i64))
            })
            .collect();

        let report = generate_digest(
            &questions,
            &PillarWeights::default_vector(),
            Timestamp::now(),
            7,
        );

        assert!(report.top_pillars.len() <= 3);
        assert!(report.action_items.len() <= 3);
        assert!(report.next_week_focus.len() <= 2);
        assert_eq!(report.insights.len(), report.top_pillars.len());
    }
}
