//! Rule-based sentence segmentation for abstract text.

/// Tokens that end with a period without ending a sentence. Compared against
/// the lowercased word immediately before the terminator.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "cf", "al", "fig", "figs", "ref", "refs", "dr", "prof", "no",
    "vol", "approx", "ca", "resp",
];

/// Split raw abstract text into ordered sentences.
///
/// A boundary is a run of `.`, `!`, or `?` (plus trailing quotes or closing
/// brackets) followed by whitespace and a plausible sentence opener. Decimal
/// numbers never match because the terminator must be followed by whitespace;
/// common abbreviations and single-letter initials are guarded explicitly.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if matches!(chars[i], '.' | '!' | '?') {
            let mut end = i + 1;
            while end < chars.len() && matches!(chars[end], '.' | '!' | '?' | ')' | ']' | '"' | '\'') {
                end += 1;
            }
            if is_boundary(&chars, i, end) {
                push_trimmed(&mut sentences, &chars[start..end]);
                start = end;
                i = end;
                continue;
            }
        }
        i += 1;
    }
    if start < chars.len() {
        push_trimmed(&mut sentences, &chars[start..]);
    }
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, segment: &[char]) {
    let sentence: String = segment.iter().collect();
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

fn is_boundary(chars: &[char], term: usize, end: usize) -> bool {
    if end >= chars.len() {
        return true;
    }
    if !chars[end].is_whitespace() {
        return false;
    }
    let mut next = end;
    while next < chars.len() && chars[next].is_whitespace() {
        next += 1;
    }
    if next >= chars.len() {
        return true;
    }
    let lead = chars[next];
    if !(lead.is_uppercase() || lead.is_ascii_digit() || lead == '(' || lead == '"') {
        return false;
    }
    if chars[term] == '.' {
        let word = word_before(chars, term);
        let mut letters = word.chars().filter(|c| c.is_alphabetic());
        if letters.clone().count() == 1 && letters.all(|c| c.is_uppercase()) {
            return false;
        }
        if ABBREVIATIONS.contains(&word.to_lowercase().as_str()) {
            return false;
        }
    }
    true
}

/// Word immediately preceding the terminator, internal periods included so
/// dotted abbreviations like `e.g` survive intact.
fn word_before(chars: &[char], term: usize) -> String {
    let mut begin = term;
    while begin > 0 && (chars[begin - 1].is_alphanumeric() || chars[begin - 1] == '.') {
        begin -= 1;
    }
    chars[begin..term].iter().collect()
}
