//! # Search Box
//!
//! A free-text input that reports every edit to its owner.
//!
//! ```text
//! user types ──► SearchBox::set_text(text)
//!                    │
//!                    ├── same as current text? ──► nothing
//!                    │
//!                    └── text = new ──► on_change(&text)  (synchronous)
//! ```
//!
//! Like [`Selector`](crate::Selector), there is no debouncing and no
//! request: the owner decides what the text means.

use std::fmt;

type TextCallback = Box<dyn FnMut(&str) + Send>;

pub struct SearchBox {
    placeholder: String,
    text: String,
    on_change: TextCallback,
}

impl SearchBox {
    pub fn new(
        placeholder: impl Into<String>,
        on_change: impl FnMut(&str) + Send + 'static,
    ) -> Self {
        SearchBox {
            placeholder: placeholder.into(),
            text: String::new(),
            on_change: Box::new(on_change),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The text exactly as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and emits it. Returns `false` when nothing changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }

        self.text = text;
        (self.on_change)(&self.text);
        true
    }

    /// Empties the box, emitting `""` if it held anything.
    pub fn clear(&mut self) -> bool {
        self.set_text(String::new())
    }
}

impl fmt::Debug for SearchBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBox")
            .field("placeholder", &self.placeholder)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}
