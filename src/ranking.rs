use crate::document::{Product, ScoredItem};
use crate::index::TfIdfModel;
use crate::tokenizer::Tokenizer;
use std::collections::HashMap;

/// Additive bonus when a candidate's category equals the query-inferred one
pub const CATEGORY_BOOST: f64 = 0.25;

/// Vectorize a query against the model's idf table.
/// Terms the index never saw get idf 0 and vanish from the similarity signal.
pub fn vectorize(query: &str, model: &TfIdfModel, tokenizer: &Tokenizer) -> HashMap<String, f64> {
    let tokens = tokenizer.analyze(query);
    let length = tokens.len().max(1) as f64;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(term, count)| {
            let weight = (count as f64 / length) * model.idf(&term);
            (term, weight)
        })
        .collect()
}

/// Cosine similarity between two sparse non-negative vectors.
/// Defined as 0 when either vector has zero norm.
pub fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let mut dot = 0.0;
    for (term, weight) in a {
        if let Some(other) = b.get(term) {
            dot += weight * other;
        }
    }

    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score each candidate: cosine against its document vector, plus the
/// category boost when the parsed category matches.
pub fn score_candidates(
    candidates: &[&Product],
    query_vec: &HashMap<String, f64>,
    parsed_category: Option<&str>,
    model: &TfIdfModel,
) -> Vec<ScoredItem> {
    let empty = HashMap::new();
    candidates
        .iter()
        .map(|product| {
            let doc_vec = model.doc_vector(&product.id).unwrap_or(&empty);
            let mut score = cosine(query_vec, doc_vec);
            if parsed_category == Some(product.category.as_str()) {
                score += CATEGORY_BOOST;
            }
            ScoredItem::new((*product).clone(), score)
        })
        .collect()
}
