//! Autocomplete: closest-command lookup and ghost text
//!
//! The engine works on a snapshot of the registered signatures. The registry
//! is read-only once startup ends, so the snapshot never goes stale, and it
//! can be handed to a line editor that lives on another thread.

use std::cmp::Ordering;

use crate::command::Signature;
use crate::param::split_signature;

/// Suggests commands and renders ghost text for partial input
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    signatures: Vec<Signature>,
}

impl Autocomplete {
    pub fn new(signatures: Vec<Signature>) -> Self {
        Self { signatures }
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Find the command the user is most likely typing
    ///
    /// `caret` is the index of the character just before the cursor (the last
    /// one typed); it is clamped to the input. Candidates are the commands
    /// whose name starts with the first token; the shortest name wins, then
    /// ordinal order. If the best candidate is longer than the first token and
    /// the user just typed a space, nothing matches.
    pub fn closest(&self, input: &str, caret: usize) -> Option<&Signature> {
        let first = input.split_whitespace().next()?;

        let best = self
            .signatures
            .iter()
            .filter(|s| s.name.starts_with(first))
            .min_by(|a, b| by_length_then_ordinal(&a.name, &b.name))?;

        if best.name.chars().count() != first.chars().count() && char_at(input, caret) == Some(' ') {
            return None;
        }
        Some(best)
    }

    /// Full ghost text for `input`: the input followed by what is left to type
    pub fn suggest(&self, input: &str, caret: usize) -> Option<String> {
        let best = self.closest(input, caret)?;
        let Some(signature) = best.render() else {
            return Some(best.name.clone());
        };

        if input.chars().count() < best.name.chars().count() {
            return Some(format!("{} {}", best.name, signature));
        }

        let placeholders = split_signature(&signature);
        let supplied = input.split_whitespace().count().saturating_sub(1);
        let after_space = char_at(input, caret) == Some(' ');

        let mut ghost = input.to_string();
        let remaining = placeholders.get(supplied..).unwrap_or_default();
        if !remaining.is_empty() {
            for (i, placeholder) in remaining.iter().enumerate() {
                if i != 0 || !after_space {
                    ghost.push(' ');
                }
                ghost.push_str(placeholder);
            }
        } else if best.ends_linked() {
            if let Some(last) = placeholders.last() {
                if !after_space {
                    ghost.push(' ');
                }
                ghost.push_str(last);
            }
        }
        Some(ghost)
    }

    /// Replacement input for a Tab press, if the input isn't already the
    /// closest command's name
    pub fn tab_complete(&self, input: &str, caret: usize) -> Option<String> {
        let best = self.closest(input, caret)?;
        if input.starts_with(&best.name) {
            return None;
        }
        Some(best.name.clone())
    }
}

fn by_length_then_ordinal(a: &str, b: &str) -> Ordering {
    a.chars()
        .count()
        .cmp(&b.chars().count())
        .then_with(|| a.cmp(b))
}

fn char_at(input: &str, index: usize) -> Option<char> {
    let len = input.chars().count();
    if len == 0 {
        return None;
    }
    input.chars().nth(index.min(len - 1))
}
