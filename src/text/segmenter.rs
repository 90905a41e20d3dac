//! Sentence segmentation for highlightable text units

use tracing::trace;

use super::TextUnit;
use crate::config::SegmenterConfig;

/// Sentence-terminal marks that close a unit and stay attached to it
const TERMINALS: [char; 3] = ['.', '!', '?'];

/// Split text into sentence-like units using the default configuration.
///
/// Whitespace is collapsed, each unit keeps its terminal mark, and empty
/// input yields an empty vector.
pub fn segment(text: &str) -> Vec<String> {
    Segmenter::default().split(text)
}

/// Splits text into ordered sentence-like units
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Create a new segmenter
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Split text into unit strings.
    ///
    /// A unit is a run of non-terminal characters closed by at most one
    /// terminal mark. Marks that follow without text of their own are
    /// dropped, so `"Wait... what?!"` gives `["Wait.", "what?"]`.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut units = Vec::new();
        let mut current = String::new();

        for c in text.chars() {
            if TERMINALS.contains(&c) {
                if !current.is_empty() {
                    current.push(c);
                    push_normalized(&mut units, &current);
                    current.clear();
                }
            } else if self.config.split_on_line_breaks && (c == '\n' || c == '\r') {
                if !current.is_empty() {
                    push_normalized(&mut units, &current);
                    current.clear();
                }
            } else {
                current.push(c);
            }
        }

        if !current.is_empty() {
            push_normalized(&mut units, &current);
        }

        trace!("Segmented {} chars into {} units", text.len(), units.len());
        units
    }

    /// Split text into indexed units
    pub fn units(&self, text: &str) -> Vec<TextUnit> {
        self.split(text)
            .into_iter()
            .enumerate()
            .map(|(index, text)| TextUnit { text, index })
            .collect()
    }
}

/// Collapse whitespace runs to single spaces and keep the result if non-empty
fn push_normalized(units: &mut Vec<String>, raw: &str) {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.is_empty() {
        units.push(normalized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\t ").is_empty());
    }

    #[test]
    fn test_splits_on_terminals() {
        assert_eq!(
            segment("Hello there. How are you? Fine!"),
            vec!["Hello there.", "How are you?", "Fine!"]
        );
    }

    #[test]
    fn test_trailing_text_without_terminal() {
        assert_eq!(segment("One. Two"), vec!["One.", "Two"]);
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            segment("  Lots   of\tspace.\n\nNext\r\n line  "),
            vec!["Lots of space.", "Next line"]
        );
    }

    #[test]
    fn test_repeated_terminals_are_dropped() {
        assert_eq!(segment("Wait... what?!"), vec!["Wait.", "what?"]);
        assert_eq!(segment("?!."), Vec::<String>::new());
    }

    #[test]
    fn test_line_breaks_split_when_enabled() {
        let segmenter = Segmenter::new(SegmenterConfig {
            split_on_line_breaks: true,
        });
        assert_eq!(
            segmenter.split("Roses are red\nviolets are blue.\r\nDone"),
            vec!["Roses are red", "violets are blue.", "Done"]
        );
    }

    #[test]
    fn test_line_breaks_fold_by_default() {
        assert_eq!(
            segment("Roses are red\nviolets are blue."),
            vec!["Roses are red violets are blue."]
        );
    }

    #[test]
    fn test_units_are_indexed() {
        let units = Segmenter::default().units("A. B. C.");
        let indices: Vec<usize> = units.iter().map(|u| u.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(units[1].text, "B.");
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(
            segment("Szia világ! Hogy vagy?"),
            vec!["Szia világ!", "Hogy vagy?"]
        );
    }
}
