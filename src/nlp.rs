//! Text normalization: lemmatization and stopword removal
//!
//! Splits text into word and punctuation tokens, reduces each word to a
//! lowercase lemma and drops stopwords. The surviving lemmas are joined with
//! single spaces. Punctuation tokens are kept as-is.

mod lexicon;

#[cfg(test)]
mod proptests;

use regex::Regex;
use std::sync::LazyLock;

/// Word tokens may carry inner apostrophes (`o'clock`, `don't`); every other
/// non-space character is a token of its own.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}\p{M}]+(?:['’][\p{L}\p{N}\p{M}]+)*|[^\s\p{L}\p{N}\p{M}]")
        .expect("token pattern is valid")
});

/// Clitics split off the end of a word token, longest first
const CLITICS: &[&str] = &["n't", "'re", "'ve", "'ll", "'s", "'d", "'m"];

/// Normalize `text`: lemmatize every token and drop stopwords.
///
/// A token is dropped when either its surface form or its lemma is a
/// stopword, so running the output through `normalize` again yields the
/// same string.
pub fn normalize(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .filter_map(|token| {
            if lexicon::is_stopword(&token) {
                return None;
            }
            let lemma = lemmatize(&token);
            (!lexicon::is_stopword(&lemma)).then_some(lemma)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into lowercase tokens, separating known clitics
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in TOKEN_PATTERN.find_iter(text) {
        let token = m.as_str().to_lowercase().replace('’', "'");
        // Stacked clitics ("shouldn't've") come off right to left
        let mut base = token.as_str();
        let mut clitics = Vec::new();
        while let Some((rest, clitic)) = split_clitic(base) {
            clitics.push(clitic);
            base = rest;
        }
        tokens.push(base.to_string());
        tokens.extend(clitics.into_iter().rev().map(str::to_string));
    }
    tokens
}

fn split_clitic(token: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        token
            .strip_suffix(clitic)
            .filter(|base| !base.is_empty() && !base.ends_with('\''))
            .map(|base| (base, *clitic))
    })
}

/// Reduce a lowercase token to its lemma.
///
/// Irregular forms come from the lexicon; everything else goes through the
/// suffix rules until nothing changes. Every rule shortens the word, so the
/// loop terminates and the result is a fixed point.
pub fn lemmatize(token: &str) -> String {
    let mut word = token.to_string();
    loop {
        let next = lexicon::irregular_lemma(&word)
            .map(str::to_string)
            .or_else(|| apply_suffix_rule(&word));
        match next {
            Some(next) if next != word => word = next,
            _ => return word,
        }
    }
}

fn apply_suffix_rule(word: &str) -> Option<String> {
    if !word.chars().all(char::is_alphabetic) || lexicon::is_invariant(word) {
        return None;
    }
    let len = word.chars().count();

    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return Some(format!("{stem}y"));
        }
        if let Some(stem) = word.strip_suffix("ied") {
            return Some(format!("{stem}y"));
        }
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return Some(format!("{stem}ss"));
    }
    for suffix in ["xes", "ches", "shes"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            let kept = suffix.strip_suffix("es").unwrap_or(suffix);
            if stem.chars().count() >= 2 {
                return Some(format!("{stem}{kept}"));
            }
        }
    }
    if len > 3
        && word.ends_with('s')
        && !["ss", "us", "is", "ics"].iter().any(|s| word.ends_with(s))
    {
        return word.strip_suffix('s').map(str::to_string);
    }
    if !word.ends_with("eed") {
        if let Some(stem) = word.strip_suffix("ed") {
            return restore_stem(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ing") {
        return restore_stem(stem);
    }
    None
}

/// Repair a stem left behind by stripping `-ed`/`-ing`
fn restore_stem(stem: &str) -> Option<String> {
    if stem.chars().count() < 3 || !stem.chars().any(is_vowel) {
        return None;
    }
    let mut chars: Vec<char> = stem.chars().collect();
    let doubled = matches!(
        chars.as_slice(),
        [.., a, b] if a == b && !is_vowel(*b) && !matches!(*b, 'l' | 's' | 'z')
    );
    if doubled {
        chars.pop();
        return Some(chars.into_iter().collect());
    }
    if needs_silent_e(stem) {
        return Some(format!("{stem}e"));
    }
    Some(stem.to_string())
}

fn needs_silent_e(stem: &str) -> bool {
    const E_ENDINGS: &[&str] = &[
        "iz", "iv", "ov", "ev", "uc", "dg", "bl", "rc", "nc", "ac", "us", "os", "ir", "ur",
    ];
    if E_ENDINGS.iter().any(|ending| stem.ends_with(ending)) {
        return true;
    }
    // "relat" -> "relate", but not "treat"
    stem.strip_suffix("at")
        .and_then(|rest| rest.chars().last())
        .is_some_and(|c| !is_vowel(c))
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_stopwords_removed_and_punctuation_kept() {
        assert_eq!(normalize("What is the meaning of life?"), "meaning life ?");
        assert_eq!(normalize("Is stealing ever justified?"), "steal justify ?");
    }

    #[test]
    fn test_lemmatization() {
        assert_eq!(lemmatize("arguments"), "argument");
        assert_eq!(lemmatize("studies"), "study");
        assert_eq!(lemmatize("stopped"), "stop");
        assert_eq!(lemmatize("loved"), "love");
        assert_eq!(lemmatize("related"), "relate");
        assert_eq!(lemmatize("treated"), "treat");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("consciousness"), "consciousness");
        assert_eq!(lemmatize("ethics"), "ethics");
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("thought"), "think");
        assert_eq!(lemmatize("1990"), "1990");
    }

    #[test]
    fn test_lemmatize_is_idempotent_on_lexicon() {
        for (form, lemma) in lexicon::IRREGULAR_FORMS {
            let once = lemmatize(form);
            assert_eq!(once, lemmatize(&once), "{form} -> {lemma}");
        }
    }

    #[test]
    fn test_clitics_split_and_dropped() {
        assert_eq!(tokenize("Don't"), vec!["do", "n't"]);
        assert_eq!(tokenize("we're"), vec!["we", "'re"]);
        assert_eq!(tokenize("o'clock"), vec!["o'clock"]);
        assert_eq!(normalize("I don't know what's true"), "know true");
    }

    #[test]
    fn test_stacked_clitics_split_fully() {
        assert_eq!(tokenize("shouldn't've"), vec!["should", "n't", "'ve"]);
        assert_eq!(tokenize("Y'all'd've"), vec!["y'all", "'d", "'ve"]);
        let once = normalize("You shouldn't've loved");
        assert_eq!(once, "love");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_curly_apostrophe() {
        assert_eq!(tokenize("can’t"), vec!["ca", "n't"]);
        assert_eq!(normalize("can’t"), "");
    }

    #[test]
    fn test_case_folded() {
        assert_eq!(normalize("FRIENDSHIP Friendship"), "friendship friendship");
    }

    #[test]
    fn test_training_sentences_are_fixed_points() {
        for (text, _) in crate::classifier::training::TRAINING_DATA {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "{text}");
        }
    }
}
