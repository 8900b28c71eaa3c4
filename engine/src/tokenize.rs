use crate::language::LanguageCode;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref SENTENCE_RE: Regex = Regex::new(r"(?u)[.!?…]+\s+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref EN_STOPWORDS: HashSet<&'static str> = {
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
    static ref KO_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "이","그","저","것","수","등","들","및","에","에서","의","을","를",
            "이다","있다","하다","이런","그런","저런","한","와","과",
            "으로","로","에게","뿐","다","도","만","까지","에는","랑","이라","며",
            "거나","에도","든지",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(lang: LanguageCode, token: &str) -> bool {
    match lang {
        LanguageCode::En => EN_STOPWORDS.contains(token),
        LanguageCode::Ko => KO_STOPWORDS.contains(token),
    }
}

/// Content-bearing POS classes as tagged by the Korean backend: nouns (N*),
/// verbs (V*), adjectives (VA).
pub fn is_content_pos(tag: &str) -> bool {
    tag.starts_with('N') || tag.starts_with('V') || tag == "VA"
}

/// Case-fold a token: NFKC then lowercase.
pub fn fold(token: &str) -> String {
    token.nfkc().collect::<String>().to_lowercase()
}

/// Tokenize one sentence into aligned (surface, normalized) pairs. The
/// normalized form is the case-folded token, stemmed for English. Used when a
/// backend returns sentence boundaries without token records.
pub fn tokenize(lang: LanguageCode, sentence: &str) -> Vec<(String, String)> {
    let folded = sentence.nfkc().collect::<String>();
    let mut out = Vec::new();
    for mat in WORD_RE.find_iter(&folded) {
        let surface = mat.as_str().to_string();
        let lower = surface.to_lowercase();
        let normalized = match lang {
            LanguageCode::En => STEMMER.stem(&lower).to_string(),
            LanguageCode::Ko => lower,
        };
        out.push((surface, normalized));
    }
    out
}

/// Punctuation-boundary sentence splitter: split on whitespace following
/// `. ! ? …`, dropping segments that are empty after trimming.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last = 0usize;
    for mat in SENTENCE_RE.find_iter(text) {
        let chunk = text[last..mat.start() + terminal_len(mat.as_str())].trim();
        if !chunk.is_empty() {
            sentences.push(chunk.to_string());
        }
        last = mat.end();
    }
    let tail = text[last..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

// Length of the punctuation run at the start of a boundary match, so the
// terminator stays attached to its sentence.
fn terminal_len(boundary: &str) -> usize {
    boundary
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(boundary.len())
}
