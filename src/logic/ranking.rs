use crate::models::ScoredCrop;

/// Default minimum confidence for a crop to be recommended.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 60.0;

/// Keep crops at or above `min_confidence`, best first.
///
/// `sort_by` is stable, so crops with equal confidence stay in catalog order.
pub fn rank(scored: Vec<ScoredCrop>, min_confidence: f64) -> Vec<ScoredCrop> {
    let mut kept: Vec<ScoredCrop> = scored
        .into_iter()
        .filter(|s| s.confidence >= min_confidence)
        .collect();

    kept.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    kept
}
