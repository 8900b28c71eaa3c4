use serde::{Deserialize, Serialize};

/// Supported input languages. `En` is the fallback when detection is inconclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Ko,
    En,
}

impl LanguageCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Ko => "ko",
            LanguageCode::En => "en",
        }
    }
}

/// Minimum share of Hangul syllables for a text to classify as Korean.
const HANGUL_RATIO_THRESHOLD: f64 = 0.10;

fn is_hangul(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Classify text by script ratio. Total function: empty text maps to the
/// default language without dividing by zero.
pub fn detect(text: &str) -> LanguageCode {
    let mut total = 0usize;
    let mut hangul = 0usize;
    for c in text.chars() {
        total += 1;
        if is_hangul(c) {
            hangul += 1;
        }
    }
    if total == 0 {
        return LanguageCode::En;
    }
    if hangul as f64 / total as f64 > HANGUL_RATIO_THRESHOLD {
        LanguageCode::Ko
    } else {
        LanguageCode::En
    }
}
