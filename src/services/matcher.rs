//! Approximate string matching for ranking candidates against a query.
//!
//! Every field yields a distance in `0.0..=1.0` (0 is a perfect match): an
//! exact substring scores 0, otherwise the best normalized Damerau-Levenshtein
//! distance against the whole text, each word, or each word's prefix of the
//! query's length. Field weights scale how much of the remaining similarity a
//! field can claim, so a hit in a heavier field always ranks better.

use strsim::normalized_damerau_levenshtein;

/// One searchable field of a candidate
pub struct MatchField<T> {
    pub weight: f64,
    pub get: fn(&T) -> &str,
}

/// Ranks candidates by ascending weighted distance, dropping any whose best
/// field is farther than the threshold
pub struct ApproximateMatcher<T> {
    fields: Vec<MatchField<T>>,
    threshold: f64,
}

impl<T> ApproximateMatcher<T> {
    pub fn new(threshold: f64) -> Self {
        Self {
            fields: Vec::new(),
            threshold,
        }
    }

    /// Add a field with the given relative weight
    pub fn field(mut self, weight: f64, get: fn(&T) -> &str) -> Self {
        self.fields.push(MatchField { weight, get });
        self
    }

    /// Best weighted distance of `candidate` over all fields
    pub fn distance(&self, candidate: &T, query: &str) -> f64 {
        let query = query.to_lowercase();
        self.distance_lower(candidate, &query)
    }

    fn distance_lower(&self, candidate: &T, query_lower: &str) -> f64 {
        let max_weight = self
            .fields
            .iter()
            .map(|f| f.weight)
            .fold(0.0_f64, f64::max);
        if max_weight <= 0.0 {
            return 1.0;
        }

        self.fields
            .iter()
            .map(|field| {
                let d = text_distance(query_lower, (field.get)(candidate));
                1.0 - (1.0 - d) * (field.weight / max_weight)
            })
            .fold(1.0_f64, f64::min)
    }

    /// Filter and order candidates. An empty query returns them unchanged.
    pub fn rank(&self, candidates: Vec<T>, query: &str) -> Vec<T> {
        if query.is_empty() {
            return candidates;
        }

        let query_lower = query.to_lowercase();
        let mut scored: Vec<(f64, T)> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let d = self.distance_lower(&candidate, &query_lower);
                (d <= self.threshold).then_some((d, candidate))
            })
            .collect();

        // Stable: equal distances keep scan order
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.into_iter().map(|(_, candidate)| candidate).collect()
    }
}

/// Distance of a lowercase query against free text, in `0.0..=1.0`
pub fn text_distance(query_lower: &str, text: &str) -> f64 {
    if query_lower.is_empty() {
        return 0.0;
    }
    let text = text.to_lowercase();
    if text.is_empty() {
        return 1.0;
    }
    if text.contains(query_lower) {
        return 0.0;
    }

    let query_len = query_lower.chars().count();
    let similarity = |candidate: &str| normalized_damerau_levenshtein(query_lower, candidate);

    let mut best = similarity(&text);
    for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        best = best.max(similarity(word));
        if word.chars().count() > query_len {
            let prefix: String = word.chars().take(query_len).collect();
            best = best.max(similarity(&prefix));
        }
    }

    (1.0 - best).clamp(0.0, 1.0)
}
