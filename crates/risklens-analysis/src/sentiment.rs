//! Tone classification of free text
//!
//! A lexicon scan plus a few punctuation and casing signals. Deterministic and
//! local, so it can run over a whole register on every render.

use risklens_domain::{Risk, RiskId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tone bucket, from most alarmed to most reassured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    /// Alarmist language
    Panic,
    /// Demands for immediate attention
    Urgent,
    /// Worry or hedging
    Concerned,
    /// Nothing notable
    Neutral,
    /// Language indicating the situation is handled
    Confident,
}

impl SentimentCategory {
    /// All categories, most alarmed first
    pub const ALL: [SentimentCategory; 5] = [
        SentimentCategory::Panic,
        SentimentCategory::Urgent,
        SentimentCategory::Concerned,
        SentimentCategory::Neutral,
        SentimentCategory::Confident,
    ];

    /// Map a clamped score to its category
    pub fn from_score(score: f64) -> Self {
        if score <= -0.6 {
            SentimentCategory::Panic
        } else if score <= -0.3 {
            SentimentCategory::Urgent
        } else if score <= -0.1 {
            SentimentCategory::Concerned
        } else if score >= 0.2 {
            SentimentCategory::Confident
        } else {
            SentimentCategory::Neutral
        }
    }

    /// Get the category as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Panic => "panic",
            SentimentCategory::Urgent => "urgent",
            SentimentCategory::Concerned => "concerned",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Confident => "confident",
        }
    }

    /// What the risk team should do about a record in this category
    pub fn recommended_action(&self) -> &'static str {
        match self {
            SentimentCategory::Panic => {
                "Contact the risk owner immediately; may need escalation to the CEO"
            }
            SentimentCategory::Urgent => "Schedule a meeting within 24 hours to plan the response",
            SentimentCategory::Concerned => "Monitor closely and request weekly updates",
            SentimentCategory::Neutral => "Routine follow-up",
            SentimentCategory::Confident => "Log it; no frequent follow-up needed",
        }
    }
}

impl std::fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct Lexicon {
    delta: f64,
    words: &'static [&'static str],
}

const LEXICONS: [Lexicon; 4] = [
    Lexicon {
        delta: -0.4,
        words: &[
            "แน่นอน",
            "จะต้อง",
            "หนักมาก",
            "วิกฤต",
            "เสียหายมหาศาล",
            "พัง",
            "ล่มสลาย",
            "catastrophic",
            "crisis",
            "collapse",
            "disaster",
            "devastating",
        ],
    },
    Lexicon {
        delta: -0.3,
        words: &[
            "ด่วน",
            "เร่งด่วน",
            "ต้องการ",
            "ขาดแคลน",
            "ปัญหาใหญ่",
            "กระทบหนัก",
            "urgent",
            "asap",
            "immediately",
            "shortage",
            "severe impact",
        ],
    },
    Lexicon {
        delta: -0.15,
        words: &[
            "กังวล",
            "ไม่แน่ใจ",
            "อาจจะ",
            "เสี่ยง",
            "น่าเป็นห่วง",
            "ระวัง",
            "worried",
            "uncertain",
            "might",
            "at risk",
            "watch out",
        ],
    },
    Lexicon {
        delta: 0.2,
        words: &[
            "รับมือได้",
            "มีแผน",
            "ควบคุมได้",
            "ปกติ",
            "ไม่น่ากังวล",
            "จัดการแล้ว",
            "under control",
            "mitigated",
            "have a plan",
            "manageable",
            "handled",
            "on track",
        ],
    },
];

/// Words that cancel a Latin-script term directly after them
const NEGATIONS: [&str; 10] = [
    "not", "no", "never", "isn't", "aren't", "wasn't", "weren't", "don't", "doesn't", "hardly",
];

const MAX_KEYWORDS: usize = 5;
const EXPLAINED_KEYWORDS: usize = 3;

/// Outcome of classifying one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    /// Tone bucket
    pub category: SentimentCategory,

    /// Raw score in [-1, 1]
    pub score: f64,

    /// Lexicon hits in lexicon order, at most five
    pub keywords: Vec<String>,

    /// Human-readable summary of the hits
    pub explanation: String,

    /// Fixed follow-up advice for the category
    pub recommended_action: String,
}

/// Classify the tone of a text
///
/// # Examples
///
/// ```
/// use risklens_analysis::sentiment::{classify, SentimentCategory};
///
/// assert_eq!(classify("Vendor slip is under control").category, SentimentCategory::Confident);
/// assert_eq!(classify("").category, SentimentCategory::Neutral);
/// ```
pub fn classify(text: &str) -> SentimentResult {
    let lower = text.to_lowercase();
    let tokens = latin_tokens(&lower);

    let mut score = 0.0;
    let mut hits: Vec<&'static str> = Vec::new();
    for lexicon in &LEXICONS {
        for &word in lexicon.words {
            if mentions(&lower, &tokens, word) {
                score += lexicon.delta;
                if !hits.contains(&word) {
                    hits.push(word);
                }
            }
        }
    }

    let exclamations = text.matches('!').count();
    if exclamations > 2 {
        score -= 0.1 * exclamations as f64;
    }

    let questions = text.matches('?').count();
    score -= 0.05 * questions as f64;

    if uppercase_ratio(text) > 0.3 {
        score -= 0.2;
    }

    let score = score.clamp(-1.0, 1.0);
    let category = SentimentCategory::from_score(score);

    SentimentResult {
        category,
        score,
        explanation: explain(&hits),
        keywords: hits.iter().take(MAX_KEYWORDS).map(|w| w.to_string()).collect(),
        recommended_action: category.recommended_action().to_string(),
    }
}

/// ASCII word tokens; apostrophes stay inside a token so `isn't` is one word
fn latin_tokens(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Thai has no word separators, so Thai terms match as substrings. Latin
/// terms must match whole tokens and not follow a negation.
fn mentions(lower: &str, tokens: &[&str], word: &str) -> bool {
    if !word.is_ascii() {
        return lower.contains(word);
    }

    let phrase: Vec<&str> = word.split(' ').collect();
    tokens
        .windows(phrase.len())
        .enumerate()
        .any(|(i, window)| window == phrase.as_slice() && !(i > 0 && NEGATIONS.contains(&tokens[i - 1])))
}

/// Share of characters that are uppercase letters; 0 for empty text
fn uppercase_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / total as f64
}

fn explain(hits: &[&str]) -> String {
    if hits.is_empty() {
        return "No tone keywords found".to_string();
    }

    let named = hits
        .iter()
        .take(EXPLAINED_KEYWORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    if hits.len() > EXPLAINED_KEYWORDS {
        format!("Found \"{}\" and more", named)
    } else {
        format!("Found \"{}\"", named)
    }
}

/// Classify every record's title and description, keyed by id
pub fn classify_batch(records: &[Risk]) -> BTreeMap<RiskId, SentimentResult> {
    records
        .iter()
        .map(|r| (r.id().clone(), classify(&r.text())))
        .collect()
}

/// Organisation-wide mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Any panic, or more than a fifth urgent
    Critical,
    /// Any urgent, or more than 30% concerned
    Warning,
    /// Nothing alarming and a mean score above 0.1
    Healthy,
    /// Everything else
    Stable,
}

impl OverallStatus {
    /// Get the status as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Critical => "critical",
            OverallStatus::Warning => "warning",
            OverallStatus::Healthy => "healthy",
            OverallStatus::Stable => "stable",
        }
    }
}

/// Aggregate of a batch of classifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSummary {
    /// Records per category
    pub distribution: BTreeMap<SentimentCategory, usize>,

    /// Mean score; 0 for an empty batch
    pub average_score: f64,

    /// Overall status
    pub overall_status: OverallStatus,

    /// Number of classified records
    pub total: usize,
}

impl OrganizationSummary {
    /// Records in one category
    pub fn count(&self, category: SentimentCategory) -> usize {
        self.distribution.get(&category).copied().unwrap_or(0)
    }
}

/// Summarise a batch of classifications
pub fn organization_summary<'a, I>(results: I) -> OrganizationSummary
where
    I: IntoIterator<Item = &'a SentimentResult>,
{
    let mut distribution: BTreeMap<SentimentCategory, usize> =
        SentimentCategory::ALL.iter().map(|c| (*c, 0)).collect();
    let mut total = 0usize;
    let mut sum = 0.0;

    for result in results {
        *distribution.entry(result.category).or_insert(0) += 1;
        total += 1;
        sum += result.score;
    }

    let average_score = if total == 0 { 0.0 } else { sum / total as f64 };
    let count = |c: SentimentCategory| distribution.get(&c).copied().unwrap_or(0);
    let total_f = total as f64;

    let overall_status = if count(SentimentCategory::Panic) > 0
        || count(SentimentCategory::Urgent) as f64 > total_f * 0.2
    {
        OverallStatus::Critical
    } else if count(SentimentCategory::Urgent) > 0
        || count(SentimentCategory::Concerned) as f64 > total_f * 0.3
    {
        OverallStatus::Warning
    } else if average_score > 0.1 {
        OverallStatus::Healthy
    } else {
        OverallStatus::Stable
    };

    OrganizationSummary {
        distribution,
        average_score,
        overall_status,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risklens_domain::{BusinessUnit, RiskKind, Severity};

    #[test]
    fn test_crisis_with_exclamations_is_panic() {
        let result = classify("สถานการณ์วิกฤต!!!");
        assert_eq!(result.category, SentimentCategory::Panic);
        assert!(result.score <= -0.6);
        assert_eq!(result.keywords, vec!["วิกฤต"]);
    }

    #[test]
    fn test_have_a_plan_is_confident() {
        let result = classify("มีแผน");
        assert_eq!(result.category, SentimentCategory::Confident);
        assert!(result.score > 0.0);
        assert_eq!(result.recommended_action, SentimentCategory::Confident.recommended_action());
    }

    #[test]
    fn test_english_lexicon() {
        assert_eq!(classify("Budget is under control").category, SentimentCategory::Confident);
        assert_eq!(classify("We are worried about churn").category, SentimentCategory::Concerned);
        assert_eq!(classify("Parts shortage, need help").category, SentimentCategory::Urgent);
    }

    #[test]
    fn test_negated_reassurance_is_not_confident() {
        let result = classify("The outage is not under control");
        assert_eq!(result.category, SentimentCategory::Neutral);
        assert!(result.keywords.is_empty());

        assert_ne!(classify("Project is not on track").category, SentimentCategory::Confident);
        assert_ne!(classify("We don't have a plan").category, SentimentCategory::Confident);
    }

    #[test]
    fn test_latin_terms_match_whole_words() {
        let mishandled = classify("Vendor mishandled the shipment");
        assert_eq!(mishandled.category, SentimentCategory::Neutral);
        assert!(mishandled.keywords.is_empty());

        assert_eq!(classify("mighty good").score, 0.0);

        let unmitigated = classify("An unmitigated disaster");
        assert_eq!(unmitigated.keywords, vec!["disaster"]);
        assert_eq!(unmitigated.category, SentimentCategory::Urgent);
    }

    #[test]
    fn test_thai_terms_match_inside_words() {
        // No spaces around the term
        let result = classify("ระบบล่มสลายทั้งหมด");
        assert_eq!(result.keywords, vec!["ล่มสลาย"]);
    }

    #[test]
    fn test_two_exclamations_are_free() {
        assert_eq!(classify("done!!").score, 0.0);
        assert!(classify("done!!!").score < 0.0);
    }

    #[test]
    fn test_questions_subtract() {
        let result = classify("is it late??");
        assert!((result.score + 0.1).abs() < 1e-9);
        assert_eq!(result.category, SentimentCategory::Concerned);
    }

    #[test]
    fn test_shouting_penalty() {
        let result = classify("SERVER DOWN");
        assert!((result.score + 0.2).abs() < 1e-9);
        assert_eq!(result.category, SentimentCategory::Concerned);
    }

    #[test]
    fn test_score_is_clamped() {
        let result = classify("crisis disaster collapse catastrophic devastating!!!!!");
        assert_eq!(result.score, -1.0);
        assert_eq!(result.keywords.len(), 5);
        assert!(result.explanation.ends_with("and more"));
    }

    #[test]
    fn test_neutral_explanation() {
        let result = classify("quarterly review");
        assert_eq!(result.category, SentimentCategory::Neutral);
        assert!(result.keywords.is_empty());
        assert_eq!(result.explanation, "No tone keywords found");
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(SentimentCategory::from_score(-0.6), SentimentCategory::Panic);
        assert_eq!(SentimentCategory::from_score(-0.3), SentimentCategory::Urgent);
        assert_eq!(SentimentCategory::from_score(-0.1), SentimentCategory::Concerned);
        assert_eq!(SentimentCategory::from_score(0.0), SentimentCategory::Neutral);
        assert_eq!(SentimentCategory::from_score(0.19), SentimentCategory::Neutral);
        assert_eq!(SentimentCategory::from_score(0.2), SentimentCategory::Confident);
    }

    #[test]
    fn test_batch_keyed_by_id() {
        let records = vec![
            Risk::new("r1", RiskKind::Risk, "Plant", "under control", BusinessUnit::Operations, Severity::new(1, 1).unwrap()),
            Risk::new("r2", RiskKind::Risk, "Plant", "crisis!!!", BusinessUnit::Operations, Severity::new(5, 5).unwrap()),
        ];
        let batch = classify_batch(&records);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[&RiskId::from("r1")].category, SentimentCategory::Confident);
        assert_eq!(batch[&RiskId::from("r2")].category, SentimentCategory::Panic);
    }

    #[test]
    fn test_summary_empty() {
        let summary = organization_summary(std::iter::empty::<&SentimentResult>());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.overall_status, OverallStatus::Stable);
        assert_eq!(summary.count(SentimentCategory::Panic), 0);
    }

    #[test]
    fn test_summary_statuses() {
        let panic = classify("crisis!!!");
        let urgent = classify("urgent");
        let concerned = classify("worried");
        let neutral = classify("fine");
        let confident = classify("under control");

        assert_eq!(organization_summary([&panic, &neutral]).overall_status, OverallStatus::Critical);

        // One urgent of ten is not above a fifth, but still a warning
        let mut results = vec![urgent.clone()];
        results.extend(std::iter::repeat(neutral.clone()).take(9));
        assert_eq!(organization_summary(&results).overall_status, OverallStatus::Warning);

        assert_eq!(
            organization_summary([&concerned, &neutral]).overall_status,
            OverallStatus::Warning
        );
        assert_eq!(
            organization_summary([&confident, &confident, &neutral]).overall_status,
            OverallStatus::Healthy
        );
        assert_eq!(organization_summary([&neutral]).overall_status, OverallStatus::Stable);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: scores stay within [-1, 1]
        #[test]
        fn test_bounds(text in "\\PC{0,80}") {
            let result = classify(&text);
            prop_assert!((-1.0..=1.0).contains(&result.score));
            prop_assert!(result.keywords.len() <= 5);
        }

        /// Property: the category always agrees with the score
        #[test]
        fn test_category_matches_score(text in "[a-zA-Z!? ]{0,60}") {
            let result = classify(&text);
            prop_assert_eq!(result.category, SentimentCategory::from_score(result.score));
        }
    }
}
