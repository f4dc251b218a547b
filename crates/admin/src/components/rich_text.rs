//! Rich-text input capability.
//!
//! Form controllers depend on [`RichTextInput`] only, never on a concrete
//! editor. [`TextAreaInput`] is the built-in implementation: a plain HTML
//! `<textarea>` whose contents are treated as HTML by the preview.

use std::fmt;

use askama::Template;

/// Callback fired with the new value after a change.
pub type ChangeCallback = Box<dyn FnMut(&str) + Send>;

/// A text input holding rich-text (HTML) content.
pub trait RichTextInput: Send {
    /// Current contents.
    fn value(&self) -> &str;

    /// Replace the contents. Read-only inputs ignore this.
    fn set_value(&mut self, text: String);

    /// Register a callback fired after every change made through `set_value`.
    fn on_change(&mut self, callback: ChangeCallback);

    /// Toggle read-only mode.
    fn set_read_only(&mut self, read_only: bool);

    /// Whether the input currently refuses edits.
    fn is_read_only(&self) -> bool;

    /// Render the input as an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment template fails to render.
    fn render_html(&self) -> askama::Result<String>;
}

/// Rich-text input rendered as a `<textarea>`.
pub struct TextAreaInput {
    name: String,
    value: String,
    placeholder: String,
    rows: u16,
    read_only: bool,
    listeners: Vec<ChangeCallback>,
}

impl fmt::Debug for TextAreaInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextAreaInput")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("read_only", &self.read_only)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl TextAreaInput {
    /// Create an empty input submitted under `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            placeholder: String::new(),
            rows: 4,
            read_only: false,
            listeners: Vec::new(),
        }
    }

    /// Set the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Set the visible height in rows.
    #[must_use]
    pub const fn rows(mut self, rows: u16) -> Self {
        self.rows = rows;
        self
    }
}

/// Template backing [`TextAreaInput::render_html`].
#[derive(Template)]
#[template(path = "components/rich_text.html")]
struct RichTextTemplate<'a> {
    name: &'a str,
    value: &'a str,
    placeholder: &'a str,
    rows: u16,
    read_only: bool,
}

impl RichTextInput for TextAreaInput {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, text: String) {
        if self.read_only || self.value == text {
            return;
        }
        self.value = text;
        for listener in &mut self.listeners {
            listener(&self.value);
        }
    }

    fn on_change(&mut self, callback: ChangeCallback) {
        self.listeners.push(callback);
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn render_html(&self) -> askama::Result<String> {
        RichTextTemplate {
            name: &self.name,
            value: &self.value,
            placeholder: &self.placeholder,
            rows: self.rows,
            read_only: self.read_only,
        }
        .render()
    }
}
