use crate::corpus::DocId;
use crate::index::InvertedIndex;

/// Inverse document frequency under the Binary Independence Model:
/// `ln((N - df + 0.5) / (df + 0.5))`. Goes negative once a term appears in
/// more than half the corpus; callers must not clamp it.
pub fn idf(num_docs: u32, df: u32) -> f64 {
    ((f64::from(num_docs) - f64::from(df) + 0.5) / (f64::from(df) + 0.5)).ln()
}

/// Sum the idf of every query term that occurs in `doc_id`. Terms absent
/// from the corpus contribute nothing. Query terms are deliberately not
/// deduplicated: repeating a term repeats its contribution.
pub fn bim_score(query_terms: &[String], doc_id: DocId, index: &InvertedIndex) -> f64 {
    let mut score = 0.0;
    for term in query_terms {
        if let Some(postings) = index.postings(term) {
            if postings.contains(&doc_id) {
                score += idf(index.num_docs(), postings.len() as u32);
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_matches_formula() {
        let got = idf(10, 3);
        let want = ((10.0_f64 - 3.0 + 0.5) / 3.5).ln();
        assert!((got - want).abs() < 1e-12);
    }

    #[test]
    fn idf_zero_when_df_is_half_plus() {
        // df = 1, N = 2: ln(1.5 / 1.5) = 0
        assert_eq!(idf(2, 1), 0.0);
    }

    #[test]
    fn idf_negative_for_majority_terms() {
        assert!(idf(3, 3) < 0.0);
    }

    #[test]
    fn idf_on_empty_corpus_is_zero() {
        assert_eq!(idf(0, 0), 0.0);
    }

    #[test]
    fn idf_strictly_decreases_in_df() {
        let mut prev = idf(10, 0);
        for df in 1..=10 {
            let cur = idf(10, df);
            assert!(cur < prev, "idf(10, {df}) should be below idf(10, {})", df - 1);
            prev = cur;
        }
    }
}
