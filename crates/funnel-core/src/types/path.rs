//! Token sequences describing one entity's journey through the funnel.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{CONVERSION, NULL, START};

/// An ordered token sequence: `Start`, zero or more stage tokens, one terminal.
///
/// Paths produced by the path builder always satisfy that shape; paths built
/// with [`FunnelPath::from_tokens`] are taken as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunnelPath {
    tokens: SmallVec<[String; 8]>,
}

impl FunnelPath {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn starts_at_start(&self) -> bool {
        self.tokens.first().is_some_and(|t| t == START)
    }

    /// The last token if it is `Conversion` or `Null`.
    pub fn terminal(&self) -> Option<&str> {
        self.tokens
            .last()
            .map(String::as_str)
            .filter(|t| *t == CONVERSION || *t == NULL)
    }

    pub fn is_converted(&self) -> bool {
        self.terminal() == Some(CONVERSION)
    }

    /// Adjacent `(from, to)` pairs; a path of length L yields L - 1 of them.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl fmt::Display for FunnelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" > "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_count() {
        let path = FunnelPath::from_tokens(["Start", "Wish||HQ", "Null"]);
        let pairs: Vec<_> = path.transitions().collect();
        assert_eq!(pairs, vec![("Start", "Wish||HQ"), ("Wish||HQ", "Null")]);
        assert_eq!(path.terminal(), Some("Null"));
        assert!(!path.is_converted());
    }

    #[test]
    fn test_non_terminal_tail() {
        let path = FunnelPath::from_tokens(["Start", "Wish||HQ"]);
        assert_eq!(path.terminal(), None);
        assert!(path.starts_at_start());
    }

    #[test]
    fn test_serializes_as_token_list() {
        let path = FunnelPath::from_tokens(["Start", "Conversion"]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["Start","Conversion"]"#);
    }
}
