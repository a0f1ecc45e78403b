//! Render-ready view of a description: structured sections when the source
//! supports them, otherwise the raw text.

use serde::Serialize;

use crate::description::segmenter::{segment, Section, Segmentation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderedDescription {
    Structured { sections: Vec<Section> },
    Raw { text: String },
}

/// Both `NotApplicable` and an empty section list fall back to the trimmed raw text.
pub fn render_description(text: &str, source_tag: &str) -> RenderedDescription {
    match segment(text, source_tag) {
        Segmentation::Segmented(sections) if !sections.is_empty() => {
            RenderedDescription::Structured { sections }
        }
        Segmentation::Segmented(_) | Segmentation::NotApplicable => RenderedDescription::Raw {
            text: text.trim().to_string(),
        },
    }
}
