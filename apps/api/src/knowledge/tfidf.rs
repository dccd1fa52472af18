//! Term-frequency / inverse-document-frequency scoring over a small,
//! fixed document set. Vocabulary and idf weights are computed once at
//! build time; queries are vectorized against that same vocabulary and
//! ranked by cosine similarity.

use std::collections::{HashMap, HashSet};

/// Lowercased alphanumeric tokens. Tokens shorter than two characters
/// carry no signal and are ignored.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

pub(crate) fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Smoothed tf-idf index over the documents given at build time.
#[derive(Debug)]
pub(crate) struct TfIdfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<Vec<f64>>,
}

impl TfIdfIndex {
    pub(crate) fn build(documents: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                if !vocabulary.contains_key(token) {
                    vocabulary.insert(token.clone(), vocabulary.len());
                }
            }
        }

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: HashSet<&String> = tokens.iter().collect();
            for token in unique {
                document_frequency[vocabulary[token]] += 1;
            }
        }

        // Smoothed idf, so terms present in every document still score.
        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                let mut vector = vec![0.0; vocabulary.len()];
                for token in tokens {
                    vector[vocabulary[token]] += 1.0;
                }
                for (weight, idf_weight) in vector.iter_mut().zip(idf.iter()) {
                    *weight *= idf_weight;
                }
                vector
            })
            .collect();

        Self {
            vocabulary,
            idf,
            vectors,
        }
    }

    /// Counts of known tokens, weighted by the build-time idf. Tokens the
    /// index has never seen contribute nothing.
    pub(crate) fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(&i) = self.vocabulary.get(&token) {
                vector[i] += self.idf[i];
            }
        }
        vector
    }

    /// Index of the document most similar to the query. Ties and all-zero
    /// scores resolve to the earliest document. `None` only when the index
    /// holds no documents at all.
    pub(crate) fn best_index(&self, query: &str) -> Option<usize> {
        if self.vectors.is_empty() {
            return None;
        }
        let query_vector = self.vectorize(query);
        let mut best = 0;
        let mut best_score = cosine_similarity(&query_vector, &self.vectors[0]);
        for (i, vector) in self.vectors.iter().enumerate().skip(1) {
            let score = cosine_similarity(&query_vector, vector);
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_lowercases_and_splits_on_non_alphanumeric() {
        assert_eq!(
            tokenize("Skills: Python, AWS!"),
            vec!["skills", "python", "aws"]
        );
    }

    #[test]
    fn test_tokenize_drops_single_character_tokens() {
        assert_eq!(tokenize("C, R and Go"), vec!["and", "go"]);
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = [1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < EPSILON);
    }

    #[test]
    fn test_cosine_zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_rare_terms_weigh_more_than_common_ones() {
        let index = TfIdfIndex::build(&docs(&[
            "python shared",
            "cooking shared",
            "gardening shared",
        ]));
        let shared = index.vocabulary["shared"];
        let rare = index.vocabulary["python"];
        assert!(index.idf[rare] > index.idf[shared]);
    }

    #[test]
    fn test_best_index_picks_overlapping_document() {
        let index = TfIdfIndex::build(&docs(&[
            "Skills: Python, Docker",
            "Education: Bachelor of Science",
        ]));
        assert_eq!(index.best_index("tell me about education"), Some(1));
        assert_eq!(index.best_index("docker experience"), Some(0));
    }

    #[test]
    fn test_best_index_unknown_terms_fall_back_to_first_document() {
        let index = TfIdfIndex::build(&docs(&["alpha beta", "gamma delta"]));
        assert_eq!(index.best_index("zzz qqq"), Some(0));
    }

    #[test]
    fn test_best_index_empty_index_returns_none() {
        let index = TfIdfIndex::build(&[]);
        assert_eq!(index.best_index("anything"), None);
    }

    #[test]
    fn test_vectorize_ignores_unknown_tokens() {
        let index = TfIdfIndex::build(&docs(&["alpha beta"]));
        let vector = index.vectorize("alpha unknown");
        assert_eq!(vector.iter().filter(|w| **w > 0.0).count(), 1);
    }
}
