//! Line editor integration for the autocomplete engine
//!
//! - [`hint`]: ghost text drawn after the cursor
//! - [`reedline`]: Tab replaces the input with the closest command name

pub mod hint;
pub mod reedline;

/// Caret position the engine expects: index of the last typed character
///
/// `pos` is the editor's byte offset of the cursor.
pub fn caret(line: &str, pos: usize) -> usize {
    let pos = pos.min(line.len());
    line.get(..pos)
        .map(|before| before.chars().count())
        .unwrap_or_else(|| line.chars().count())
        .saturating_sub(1)
}
