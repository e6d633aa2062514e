//! Text shingling and Jaccard similarity
//!
//! Text is lowercased and reduced to alphanumerics plus the Thai block before
//! being cut into overlapping k-character shingles. Thai vowel and tone marks
//! are combining characters rather than alphanumerics, so the whole block is
//! kept explicitly; dropping them would collapse Thai text to a handful of
//! consonants.

use std::collections::HashSet;

/// Characters per shingle used by the dashboard
pub const DEFAULT_SHINGLE_SIZE: usize = 3;

const THAI_BLOCK: std::ops::RangeInclusive<char> = '\u{0E00}'..='\u{0E7F}';

/// Lowercase `text` and keep only characters that carry meaning
///
/// # Examples
///
/// ```
/// use risklens_analysis::similarity::normalize;
///
/// assert_eq!(normalize("Server-Outage #42!"), "serveroutage42");
/// assert_eq!(normalize("ระบบ ล่ม"), "ระบบล่ม");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || THAI_BLOCK.contains(c))
        .collect()
}

/// The set of k-character shingles of a normalized text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShingleSet {
    shingles: HashSet<String>,
}

impl ShingleSet {
    /// Shingle `text` with the given window size
    ///
    /// Text shorter than `k` after normalization (and any `k` of zero) yields
    /// an empty set.
    pub fn from_text(text: &str, k: usize) -> Self {
        let chars: Vec<char> = normalize(text).chars().collect();
        if k == 0 || chars.len() < k {
            return Self::default();
        }

        let shingles = chars.windows(k).map(|w| w.iter().collect()).collect();
        Self { shingles }
    }

    /// Number of distinct shingles
    pub fn len(&self) -> usize {
        self.shingles.len()
    }

    /// Whether no shingles were produced
    pub fn is_empty(&self) -> bool {
        self.shingles.is_empty()
    }

    /// Whether a given shingle is present
    pub fn contains(&self, shingle: &str) -> bool {
        self.shingles.contains(shingle)
    }

    /// |A ∩ B| / |A ∪ B|, or 0.0 when both sets are empty
    pub fn jaccard(&self, other: &ShingleSet) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (&self.shingles, &other.shingles)
        } else {
            (&other.shingles, &self.shingles)
        };

        let intersection = small.iter().filter(|s| large.contains(*s)).count();
        let union = self.len() + other.len() - intersection;

        if union == 0 {
            0.0
        } else {
            intersection as f64 / union as f64
        }
    }
}

/// Jaccard similarity of two texts using 3-character shingles
///
/// # Examples
///
/// ```
/// use risklens_analysis::similarity::similarity;
///
/// assert_eq!(similarity("", ""), 0.0);
/// assert_eq!(similarity("budget overrun", "budget overrun"), 1.0);
/// assert!(similarity("server outage", "server outages") > 0.8);
/// ```
pub fn similarity(text_a: &str, text_b: &str) -> f64 {
    similarity_with(text_a, text_b, DEFAULT_SHINGLE_SIZE)
}

/// Jaccard similarity with an explicit shingle size
pub fn similarity_with(text_a: &str, text_b: &str, shingle_size: usize) -> f64 {
    ShingleSet::from_text(text_a, shingle_size).jaccard(&ShingleSet::from_text(text_b, shingle_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Hello, World!  "), "helloworld");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_normalize_keeps_thai_marks() {
        // สิ่ง has a combining vowel above and a tone mark
        assert_eq!(normalize("สิ่ง"), "สิ่ง");
        assert_eq!(normalize("สิ่ง").chars().count(), 4);
    }

    #[test]
    fn test_shingles() {
        let set = ShingleSet::from_text("abcd", 3);
        assert_eq!(set.len(), 2);
        assert!(set.contains("abc"));
        assert!(set.contains("bcd"));
    }

    #[test]
    fn test_short_text_yields_empty_set() {
        assert!(ShingleSet::from_text("ab", 3).is_empty());
        assert!(ShingleSet::from_text("!!", 3).is_empty());
        assert!(ShingleSet::from_text("abc", 0).is_empty());
    }

    #[test]
    fn test_empty_inputs_are_not_a_match() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("ab", "ab"), 0.0);
        assert_eq!(similarity("abcdef", ""), 0.0);
    }

    #[test]
    fn test_exact_ratio() {
        // abcdefgh: abc bcd cde def efg fgh
        // defghijkl: def efg fgh ghi hij ijk jkl
        // 3 shared of 10 distinct
        assert_eq!(similarity("abcdefgh", "defghijkl"), 0.3);
    }

    #[test]
    fn test_thai_text_compares() {
        let a = "เซิร์ฟเวอร์ล่มที่ศูนย์ข้อมูล";
        let b = "เซิร์ฟเวอร์ล่มที่ศูนย์ข้อมูลกรุงเทพ";
        let sim = similarity(a, b);
        assert!(sim > 0.6, "Thai texts should overlap, got {}", sim);
    }

    #[test]
    fn test_disjoint_texts() {
        assert_eq!(similarity("alpha", "zulu"), 0.0);
    }
}
