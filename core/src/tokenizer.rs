use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{HashMap, HashSet};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
    /// Informal spellings folded to their canonical form before tokenization.
    static ref NORMALIZATION: HashMap<&'static str, &'static str> = {
        let pairs: &[(&str, &str)] = &[
            ("u", "you"),
            ("ur", "your"),
            ("r", "are"),
            ("pls", "please"),
            ("plz", "please"),
            ("thx", "thanks"),
            ("gonna", "going"),
            ("wanna", "want"),
        ];
        pairs.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

fn normalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| NORMALIZATION.get(word).copied().unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Preprocess raw text into the space-joined form stored in the corpus and
/// the token list used for indexing: NFKC normalization, lowercase, informal
/// variant folding, punctuation-stripping word extraction, stopword removal,
/// and stemming. Documents and queries must both pass through here; any
/// mismatch breaks term matching silently.
pub fn preprocess(text: &str) -> (String, Vec<String>) {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    let normalized = normalize_words(&lowered);
    let mut tokens = Vec::new();
    for mat in RE.find_iter(&normalized) {
        let token = mat.as_str();
        if is_stopword(token) { continue; }
        tokens.push(STEMMER.stem(token).to_string());
    }
    (tokens.join(" "), tokens)
}

/// Token list only, for query processing.
pub fn tokenize(text: &str) -> Vec<String> {
    preprocess(text).1
}

/// The tokens of `text` that the stopword filter removes, unstemmed.
pub fn extract_stopwords(text: &str) -> Vec<String> {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&lowered)
        .map(|mat| mat.as_str())
        .filter(|token| is_stopword(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Running, runner's run!");
        assert!(t.iter().any(|w| w == "run"));
    }

    #[test]
    fn joined_form_matches_tokens() {
        let (joined, tokens) = preprocess("Granite weathers into sand.");
        assert_eq!(joined, tokens.join(" "));
    }
}
