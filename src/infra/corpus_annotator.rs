// ============================================================
// Layer 6 — CoNLL-U Corpus Annotator
// ============================================================
// Answers annotate() from a corpus parsed ahead of time, e.g.
// a benchmark's questions run through a parser once offline.
//
// Each sentence must carry a "# text = ..." comment. Sentences
// are grouped by that text; annotate() returns the group whose
// text equals the trimmed input, or nothing.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};

use crate::data::conllu::parse_conllu;
use crate::domain::{dependency::DependencyGraph, traits::TextAnnotator};

pub struct ConlluCorpusAnnotator {
    by_text: HashMap<String, Vec<DependencyGraph>>,
}

impl ConlluCorpusAnnotator {
    /// Load and index a CoNLL-U file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read CoNLL-U corpus '{}'", path.display()))?;
        let annotator = Self::from_conllu(&raw)
            .with_context(|| format!("Invalid CoNLL-U in '{}'", path.display()))?;

        tracing::info!(
            "Loaded {} parsed sentences from '{}'",
            annotator.len(),
            path.display()
        );
        Ok(annotator)
    }

    pub fn from_conllu(raw: &str) -> Result<Self> {
        let mut by_text: HashMap<String, Vec<DependencyGraph>> = HashMap::new();

        for graph in parse_conllu(raw)? {
            let key = graph.text.as_deref().map(|t| t.trim().to_string());
            match key {
                Some(text) => by_text.entry(text).or_default().push(graph),
                None => tracing::warn!("Skipping corpus sentence without '# text' comment"),
            }
        }

        Ok(Self { by_text })
    }

    /// Number of indexed sentences.
    pub fn len(&self) -> usize {
        self.by_text.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }
}

impl TextAnnotator for ConlluCorpusAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<DependencyGraph>> {
        let found = self.by_text.get(text.trim()).cloned().unwrap_or_default();
        if found.is_empty() {
            tracing::debug!("No parsed sentence in corpus for: {}", text);
        }
        Ok(found)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "\
# text = Who is Mandela?
1\tWho\twho\tPRON\tWP\t_\t0\troot\t_\t_
2\tis\tbe\tAUX\tVBZ\t_\t1\tcop\t_\t_
3\tMandela\tMandela\tPROPN\tNNP\t_\t1\tnsubj\t_\t_

1\torphan\torphan\tNOUN\tNN\t_\t0\troot\t_\t_
";

    #[test]
    fn test_lookup_by_trimmed_text() {
        let annotator = ConlluCorpusAnnotator::from_conllu(CORPUS).unwrap();
        assert_eq!(annotator.len(), 1);

        let graphs = annotator.annotate("  Who is Mandela?\n").unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].first_root(), Some(1));
    }

    #[test]
    fn test_unknown_text_yields_no_sentences() {
        let annotator = ConlluCorpusAnnotator::from_conllu(CORPUS).unwrap();
        assert!(annotator.annotate("Who is Biko?").unwrap().is_empty());
    }

    #[test]
    fn test_from_path() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.conllu");
        fs::write(&path, CORPUS).unwrap();

        let annotator = ConlluCorpusAnnotator::from_path(&path).unwrap();
        assert!(!annotator.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConlluCorpusAnnotator::from_path(dir.path().join("nope.conllu")).is_err());
    }
}
