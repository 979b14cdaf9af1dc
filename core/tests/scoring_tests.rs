use lontar_core::corpus::{DocId, Document};
use lontar_core::index::InvertedIndex;
use lontar_core::score::{bim_score, idf};

fn doc(id: DocId, terms: &[&str]) -> Document {
    Document {
        id,
        filename: format!("doc{id}.txt"),
        raw_text: terms.join(" "),
        preprocessed_text: terms.join(" "),
        tokens: terms.iter().map(|s| s.to_string()).collect(),
        created_at: "2024-05-01 10:00:00".to_string(),
    }
}

fn terms(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

#[test]
fn score_sums_idf_of_matching_terms() {
    // N = 4: "galaxy" df = 2, "nebula" df = 1
    let docs = vec![
        doc(0, &["galaxy", "nebula"]),
        doc(1, &["galaxy", "comet"]),
        doc(2, &["quasar"]),
        doc(3, &["meteor"]),
    ];
    let index = InvertedIndex::build(&docs);

    let got = bim_score(&terms(&["galaxy", "nebula"]), 0, &index);
    let want = idf(4, 2) + idf(4, 1);
    assert!((got - want).abs() < 1e-12);
}

#[test]
fn term_absent_from_corpus_contributes_nothing() {
    let docs = vec![doc(0, &["galaxy"]), doc(1, &["comet"])];
    let index = InvertedIndex::build(&docs);
    assert_eq!(bim_score(&terms(&["pulsar"]), 0, &index), 0.0);
}

#[test]
fn term_absent_from_document_contributes_nothing() {
    let docs = vec![doc(0, &["galaxy"]), doc(1, &["comet"]), doc(2, &["quasar"])];
    let index = InvertedIndex::build(&docs);
    // "galaxy" is indexed, but doc 1 does not contain it.
    assert_eq!(bim_score(&terms(&["galaxy"]), 1, &index), 0.0);
}

#[test]
fn repeated_query_term_doubles_its_contribution() {
    let docs = vec![doc(0, &["galaxy"]), doc(1, &["comet"]), doc(2, &["quasar"])];
    let index = InvertedIndex::build(&docs);

    let once = bim_score(&terms(&["galaxy"]), 0, &index);
    let twice = bim_score(&terms(&["galaxy", "galaxy"]), 0, &index);
    assert!(once > 0.0);
    assert!((twice - 2.0 * once).abs() < 1e-12);
}

#[test]
fn majority_term_scores_negative() {
    // df = 3, N = 3: idf = ln(0.5 / 3.5) < 0
    let docs = vec![
        doc(0, &["omega"]),
        doc(1, &["omega", "comet"]),
        doc(2, &["omega", "quasar"]),
    ];
    let index = InvertedIndex::build(&docs);
    assert!(bim_score(&terms(&["omega"]), 0, &index) < 0.0);
}

#[test]
fn empty_corpus_scores_zero() {
    let index = InvertedIndex::build(&[]);
    assert_eq!(bim_score(&terms(&["galaxy"]), 0, &index), 0.0);
}
