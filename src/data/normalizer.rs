// ============================================================
// Layer 4 — Mention Normalizer
// ============================================================
// Rewrites a sentence so every already-resolved mention label
// is replaced by its first candidate URI:
//
//   "Who painted the Mona Lisa?"
//     + { "Mona Lisa" → http://ex/MonaLisa }
//   = "Who painted the http://ex/MonaLisa ?"
//
// A space is appended after each URI so trailing punctuation
// stays a separate token; the sentence is trimmed after every
// substitution.
//
// Matching is plain substring replacement by default, so a
// label that appears inside a longer word is replaced there
// too. TokenBoundary only replaces whole-word occurrences.

use serde::{Deserialize, Serialize};

use crate::domain::question::Entity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Replace every occurrence, even inside longer words
    #[default]
    Substring,
    /// Replace only occurrences bounded by non-alphanumerics
    TokenBoundary,
}

/// Replace each mention label in `sentence`, in list order.
///
/// Each substitution sees the output of the previous one.
/// Mentions without a label or without a URI are skipped.
pub fn replace_labels_by_uris(sentence: &str, mentions: &[Entity], mode: MatchMode) -> String {
    let mut sentence = sentence.to_string();

    for entity in mentions {
        if entity.label.is_empty() {
            tracing::error!("Entity has no label in sentence: {}", sentence);
            continue;
        }

        let Some(uri) = entity.first_uri() else {
            tracing::warn!(
                "Entity '{}' has no candidate URI in sentence: {}",
                entity.label,
                sentence
            );
            continue;
        };

        let replacement = format!("{uri} ");
        let replaced = match mode {
            MatchMode::Substring     => sentence.replace(&entity.label, &replacement),
            MatchMode::TokenBoundary => replace_whole_words(&sentence, &entity.label, &replacement),
        };
        sentence = replaced.trim().to_string();
    }

    sentence
}

/// Replace `word` only where it is not glued to other alphanumerics.
fn replace_whole_words(text: &str, word: &str, replacement: &str) -> String {
    let mut out  = String::with_capacity(text.len());
    let mut rest = 0usize;
    let mut from = 0usize;

    while let Some(pos) = text[from..].find(word) {
        let start = from + pos;
        let end   = start + word.len();

        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if before_ok && after_ok {
            out.push_str(&text[rest..start]);
            out.push_str(replacement);
            rest = end;
            from = end;
        } else {
            // advance one character past the rejected match start
            let step = text[start..].chars().next().map_or(1, char::len_utf8);
            from = start + step;
        }
    }

    out.push_str(&text[rest..]);
    out
}
