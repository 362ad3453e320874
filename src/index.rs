use crate::document::Document;
use crate::tokenizer::Tokenizer;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// TF-IDF term vectors over one catalog snapshot.
///
/// Built once, read-only afterwards. A changed catalog means building a new
/// model and swapping the reference; in-flight readers keep the old one.
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    vocabulary: HashSet<String>,
    idf: HashMap<String, f64>,
    doc_vectors: HashMap<String, HashMap<String, f64>>,
    num_docs: usize,
}

impl TfIdfModel {
    /// Build the model from the full document set
    pub fn build(documents: &[Document], tokenizer: &Tokenizer) -> Self {
        let doc_tokens: Vec<(String, Vec<String>)> = documents
            .iter()
            .map(|doc| (doc.id.clone(), tokenizer.analyze(&doc.text)))
            .collect();
        let num_docs = doc_tokens.len();

        // df[t] = number of distinct documents containing t at least once
        let mut df: HashMap<String, usize> = HashMap::new();
        for (_, tokens) in &doc_tokens {
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        // idf[t] = ln((N+1)/(df+1)) + 1, always positive
        let idf: HashMap<String, f64> = df
            .iter()
            .map(|(term, &count)| {
                let value = ((num_docs as f64 + 1.0) / (count as f64 + 1.0)).ln() + 1.0;
                (term.clone(), value)
            })
            .collect();

        let mut doc_vectors = HashMap::with_capacity(num_docs);
        for (id, tokens) in &doc_tokens {
            // empty documents count as length 1 so the tf division is defined
            let length = tokens.len().max(1) as f64;
            let mut counts: HashMap<&String, usize> = HashMap::new();
            for term in tokens {
                *counts.entry(term).or_insert(0) += 1;
            }

            let vector: HashMap<String, f64> = counts
                .into_iter()
                .map(|(term, count)| {
                    let weight = (count as f64 / length) * idf.get(term).copied().unwrap_or(0.0);
                    (term.clone(), weight)
                })
                .collect();
            doc_vectors.insert(id.clone(), vector);
        }

        let vocabulary: HashSet<String> = df.into_keys().collect();
        tracing::debug!(
            documents = num_docs,
            terms = vocabulary.len(),
            "built tf-idf model"
        );

        Self {
            vocabulary,
            idf,
            doc_vectors,
            num_docs,
        }
    }

    /// Inverse document frequency for a term; 0.0 for terms the model never saw
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Sparse TF-IDF vector for a document
    pub fn doc_vector(&self, doc_id: &str) -> Option<&HashMap<String, f64>> {
        self.doc_vectors.get(doc_id)
    }

    pub fn vocabulary(&self) -> &HashSet<String> {
        &self.vocabulary
    }

    pub fn total_documents(&self) -> usize {
        self.num_docs
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_documents: self.num_docs,
            total_terms: self.vocabulary.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_terms: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, text: &str) -> Document {
        Document {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_build_small_corpus() {
        let tokenizer = Tokenizer::new();
        let docs = vec![
            doc("1", "wool socks"),
            doc("2", "wool scarf"),
            doc("3", "denim jacket"),
        ];
        let model = TfIdfModel::build(&docs, &tokenizer);

        assert_eq!(model.total_documents(), 3);
        assert!(model.vocabulary().contains("wool"));
        assert!(model.idf("wool") > 0.0);
        assert!(model.doc_vector("1").is_some());
        assert_eq!(model.idf("nonexistent"), 0.0);
    }

    #[test]
    fn test_idf_monotonic_in_document_frequency() {
        let tokenizer = Tokenizer::new();
        let docs = vec![
            doc("1", "wool socks"),
            doc("2", "wool scarf"),
            doc("3", "denim jacket"),
        ];
        let model = TfIdfModel::build(&docs, &tokenizer);

        // df(denim) = 1 < df(wool) = 2, so idf(denim) > idf(wool)
        assert!(model.idf("denim") > model.idf("wool"));
    }

    #[test]
    fn test_doc_weight_normalized_by_length() {
        let tokenizer = Tokenizer::new();
        let docs = vec![doc("1", "wool wool socks"), doc("2", "denim jacket")];
        let model = TfIdfModel::build(&docs, &tokenizer);

        let vector = model.doc_vector("1").expect("doc 1 indexed");
        let wool = vector.get("wool").copied().unwrap_or(0.0);
        let sock = vector.get("sock").copied().unwrap_or(0.0);
        // same idf (both df=1), "wool" appears twice as often in the document
        assert!((wool - 2.0 * sock).abs() < 1e-9);
    }

    #[test]
    fn test_empty_catalog() {
        let tokenizer = Tokenizer::new();
        let model = TfIdfModel::build(&[], &tokenizer);

        assert_eq!(model.total_documents(), 0);
        assert!(model.vocabulary().is_empty());
        assert_eq!(model.idf("anything"), 0.0);
        assert!(model.doc_vector("1").is_none());
    }
}
