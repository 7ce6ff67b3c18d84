//! Chat Shell - a terminal host for the chat console
//!
//! Wires the console core to a `reedline` line editor: the hinter draws the
//! ghost text, Tab replaces the input with the closest command, and messages
//! are printed to the terminal with their timestamp and label.

pub mod completions;
pub mod demo;
pub mod repl;
pub mod sink;

pub use repl::Repl;
pub use sink::TerminalSink;
