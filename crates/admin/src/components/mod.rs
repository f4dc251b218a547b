//! Reusable UI components for the admin panel.

pub mod rich_text;

pub use rich_text::{ChangeCallback, RichTextInput, TextAreaInput};
