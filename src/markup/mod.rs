//! Markup transforms for extracted entries.
//!
//! * [`to_panel_text`] turns a fragment into plain text for an output panel.
//! * [`PopupTransformer`] rewrites a fragment into sandbox-friendly popup
//!   HTML with a one-time navigation row.

mod lexer;
mod panel;
mod popup;

pub use lexer::{HtmlEvent, HtmlLexer, StartTag, tokenize};
pub use panel::to_panel_text;
pub use popup::{Flow, PopupContext, PopupTransformer};

#[cfg(test)]
mod tests;
