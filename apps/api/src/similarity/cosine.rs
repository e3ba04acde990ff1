/// Cosine similarity between two equal-length vectors.
///
/// Returns `None` when the lengths differ, either vector has zero norm, or the
/// result is not finite. Callers exclude `None` from aggregates instead of
/// treating it as zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        return None;
    }
    let sim = dot / denom;
    sim.is_finite().then(|| sim.clamp(-1.0, 1.0))
}

/// Every i<j cosine similarity of the batch, in row-major pair order, with
/// undefined pairs dropped.
pub fn pairwise_similarities(vectors: &[Vec<f64>]) -> Vec<f64> {
    let mut sims = Vec::with_capacity(vectors.len() * vectors.len().saturating_sub(1) / 2);
    for (i, a) in vectors.iter().enumerate() {
        for b in &vectors[i + 1..] {
            if let Some(sim) = cosine_similarity(a, b) {
                sims.push(sim);
            }
        }
    }
    sims
}
