//! Splits a flattened job description into titled sections.
//!
//! Only sources with a [`SegmenterProfile`] are handled; every other source is
//! reported as [`Segmentation::NotApplicable`] so callers show the raw text.

use serde::Serialize;
use tracing::debug;

use crate::description::format::format_body;
use crate::description::labels::{profile_for, SegmenterProfile};
use crate::models::JobSource;

/// One block of a description. `title` is empty for the untitled fallback section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segmentation {
    /// The source does not use sectioned descriptions.
    NotApplicable,
    /// Sections in source order. Empty when the text was blank.
    Segmented(Vec<Section>),
}

impl Segmentation {
    pub fn is_applicable(&self) -> bool {
        matches!(self, Segmentation::Segmented(_))
    }

    pub fn into_sections(self) -> Option<Vec<Section>> {
        match self {
            Segmentation::NotApplicable => None,
            Segmentation::Segmented(sections) => Some(sections),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct HeaderMatch {
    start: usize,
    label: &'static str,
}

impl HeaderMatch {
    fn end(&self) -> usize {
        self.start + self.label.len()
    }
}

/// Segments `text` according to the profile registered for `source_tag`.
/// Never fails: unknown tags and tags without a profile are `NotApplicable`.
pub fn segment(text: &str, source_tag: &str) -> Segmentation {
    let profile = source_tag
        .parse::<JobSource>()
        .ok()
        .filter(|source| source.uses_sectioned_descriptions())
        .and_then(profile_for);

    match profile {
        Some(profile) => Segmentation::Segmented(segment_with(profile, text)),
        None => Segmentation::NotApplicable,
    }
}

/// Segments `text` with an explicit profile.
pub fn segment_with(profile: &SegmenterProfile, text: &str) -> Vec<Section> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let headers = find_headers(profile, text);
    if headers.iter().all(|header| header.label == profile.cut_boundary) {
        debug!(source = %profile.source, "no section headers found, returning untitled section");
        // Text after a lone cut boundary is dropped unless nothing precedes it.
        let lead = headers
            .first()
            .map_or(trimmed, |cut| text[..cut.start].trim());
        let body = if lead.is_empty() { trimmed } else { lead };
        return vec![Section {
            title: String::new(),
            body: format_body(profile, body, None),
        }];
    }

    debug!(source = %profile.source, headers = headers.len(), "segmenting description");

    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.label != profile.cut_boundary)
        .map(|(i, header)| {
            let end = headers.get(i + 1).map_or(text.len(), |next| next.start);
            let raw = text[header.end()..end].trim();
            Section {
                title: header.label.to_string(),
                body: format_body(profile, raw, Some(header.label)),
            }
        })
        .collect()
}

/// Every header (and cut boundary) occurrence, left to right. Overlapping
/// matches resolve to the earliest start, then the longest label.
fn find_headers(profile: &SegmenterProfile, text: &str) -> Vec<HeaderMatch> {
    let mut found: Vec<HeaderMatch> = profile
        .headers
        .iter()
        .chain(std::iter::once(&profile.cut_boundary))
        .flat_map(|&label| {
            text.match_indices(label)
                .map(move |(start, _)| HeaderMatch { start, label })
        })
        .filter(|m| {
            !(profile.colon_excluded_headers.contains(&m.label) && text[m.end()..].starts_with(':'))
        })
        .collect();

    found.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| b.label.len().cmp(&a.label.len()))
    });

    let mut kept: Vec<HeaderMatch> = Vec::with_capacity(found.len());
    for m in found {
        if kept.last().map_or(true, |prev| m.start >= prev.end()) {
            kept.push(m);
        }
    }
    kept
}
