//! Near-miss suggestions for failed lookups.

use strsim::jaro_winkler;

/// Best candidate whose similarity to `spoken` reaches `threshold`.
///
/// Exact (case-insensitive) matches are never suggested: if one existed the
/// lookup would not have failed.
pub fn closest_match(spoken: &str, candidates: &[String], threshold: f64) -> Option<String> {
    let spoken = spoken.to_lowercase();
    candidates
        .iter()
        .map(|c| (c, jaro_winkler(&spoken, &c.to_lowercase())))
        .filter(|(c, score)| *score >= threshold && c.to_lowercase() != spoken)
        .fold(None, |best: Option<(&String, f64)>, (c, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((c, score)),
        })
        .map(|(c, _)| c.clone())
}
