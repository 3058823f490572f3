//! Terminal output sanitization utilities
//!
//! # Security: Terminal Injection Prevention
//!
//! Item names and location tokens come straight from inventory export files. They are
//! printed by the `search` command and drawn by the TUI, so any ANSI escape sequences or
//! control characters in them must be removed first. Otherwise a crafted export could:
//! - Clear the screen or move the cursor
//! - Change terminal colors or styles
//! - Trigger unexpected terminal behavior
//!
//! Every user-facing surface passes labels through [`sanitize_label`].

use std::borrow::Cow;

const ESC: char = '\x1b';

/// Make a single-line label safe to print
///
/// ANSI CSI sequences (`ESC [ ... letter`) are removed entirely, whitespace control
/// characters (tab, newline, carriage return) become a single space each, and any
/// other control character is dropped. Clean labels are returned without copying.
///
/// # Examples
///
/// ```
/// use eq_inventory_search::utils::terminal::sanitize_label;
///
/// assert_eq!(sanitize_label("\x1b[31mRusty Dagger\x1b[0m"), "Rusty Dagger");
/// assert_eq!(sanitize_label("Cloth Cap"), "Cloth Cap");
/// ```
pub fn sanitize_label(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC && chars.peek() == Some(&'[') {
            chars.next();
            // Parameters and intermediates run until the final letter
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        match ch {
            '\t' | '\n' | '\r' => result.push(' '),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    Cow::Owned(result)
}
