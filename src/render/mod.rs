//! Pure renderers over [`Report`](crate::report::Report): the static HTML
//! dashboard page and the weekly email digest.

pub mod email;
pub mod html;

pub use email::{render_digest, Digest};
pub use html::render_dashboard;

/// Minimal HTML escape for text interpolated into markup.
pub(crate) fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
