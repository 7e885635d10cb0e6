//! Built-in English lexicon: stopwords, irregular forms and invariant words

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// English stopwords, including the clitics split off by the tokenizer
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amount",
    "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "bottom", "but", "by", "ca", "call", "can", "cannot", "could", "did", "do",
    "does", "doing", "done", "down", "due", "during", "each", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "first", "five", "for", "former",
    "formerly", "forty", "four", "from", "front", "full", "further", "get", "give", "go", "had",
    "has", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
    "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
    "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter", "latterly",
    "least", "less", "made", "make", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "quite", "rather", "re", "really", "regarding", "same",
    "say", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should",
    "show", "side", "since", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "third", "this", "those", "though",
    "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top", "toward",
    "towards", "twelve", "twenty", "two", "under", "unless", "until", "up", "upon", "us", "use",
    "used", "using", "various", "very", "via", "was", "we", "well", "were", "what", "whatever",
    "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
    "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole",
    "whom", "whose", "why", "will", "with", "within", "without", "wo", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves", "n't", "'s", "'m", "'re", "'ve", "'ll", "'d",
];

/// Irregular inflections mapped to their lemma. No lemma appears as a form.
pub(super) const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("is", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("ca", "can"),
    ("wo", "will"),
    ("made", "make"),
    ("said", "say"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("taught", "teach"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("told", "tell"),
    ("found", "find"),
    ("felt", "feel"),
    ("kept", "keep"),
    ("left", "leave"),
    ("meant", "mean"),
    ("saw", "see"),
    ("seen", "see"),
    ("came", "come"),
    ("became", "become"),
    ("got", "get"),
    ("gotten", "get"),
    ("ran", "run"),
    ("began", "begin"),
    ("begun", "begin"),
    ("wrote", "write"),
    ("written", "write"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("understood", "understand"),
    ("stood", "stand"),
    ("lost", "lose"),
    ("held", "hold"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("sought", "seek"),
    ("fought", "fight"),
    ("caught", "catch"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("agreed", "agree"),
    ("freed", "free"),
    ("based", "base"),
    ("hoped", "hope"),
    ("created", "create"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("selves", "self"),
];

/// Words the suffix rules must leave alone
const INVARIANT_WORDS: &[&str] = &[
    "meaning", "morning", "evening", "feeling", "building", "beginning", "wedding", "ceiling",
    "thing", "series", "species", "news", "physics", "ethics", "politics", "mathematics",
    "metaphysics", "aesthetics", "analysis", "basis", "thesis", "crisis", "always", "perhaps",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

static IRREGULAR_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_FORMS.iter().copied().collect());

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

pub fn irregular_lemma(word: &str) -> Option<&'static str> {
    IRREGULAR_MAP.get(word).copied()
}

pub fn is_invariant(word: &str) -> bool {
    INVARIANT_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lemma_is_also_a_form() {
        for (_, lemma) in IRREGULAR_FORMS {
            assert!(irregular_lemma(lemma).is_none(), "{lemma} is both form and lemma");
        }
    }

    #[test]
    fn test_clitics_are_stopwords() {
        for clitic in super::super::CLITICS {
            assert!(is_stopword(clitic), "{clitic}");
        }
    }
}
