//! Core domain mechanisms for mdview.
//!
//! This crate contains pure functions and static tables with no IO, no
//! async, and a single dependency. Everything here can be called from any
//! layer, any number of times, concurrently: there is no shared mutable
//! state anywhere in the crate.
//!
//! - [`classify_host`] and the confusable table: homoglyph detection
//! - [`is_markdown_content_type`]: Content-Type allowlist for fetched markdown
//! - [`truncate_with_ellipsis`]: bounded text for log lines

mod confusables;
mod content_type;
mod text;

pub use confusables::{
    CONFUSABLE_PAIRS, HostScript, classify_host, confusable_to_latin, latin_skeleton,
};
pub use content_type::{MARKDOWN_CONTENT_TYPES, is_markdown_content_type};
pub use text::truncate_with_ellipsis;
