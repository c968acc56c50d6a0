//! Report front-ends: HTML trace panels + textual head preview.

pub mod html;
pub mod text;

pub use html::render_html_report;
pub use text::render_head;
