// Description segmentation for sources that flatten their postings into one paragraph.
// Pure text processing; handlers are the only async code in this module.

pub mod format;
pub mod handlers;
pub mod labels;
pub mod render;
pub mod segmenter;

pub use render::{render_description, RenderedDescription};
pub use segmenter::{segment, Section};
