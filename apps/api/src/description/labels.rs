//! Label tables that drive description segmentation.
//!
//! The values are tuned to how Practicas.pe flattens its detail pages, so they
//! are grouped into a [`SegmenterProfile`] rather than baked into the algorithm.

use crate::models::JobSource;

/// Everything the segmenter needs to know about one source's description format.
#[derive(Debug, Clone, Copy)]
pub struct SegmenterProfile {
    /// Source whose postings follow this format.
    pub source: JobSource,
    /// Top-level section headers, in canonical order.
    pub headers: &'static [&'static str],
    /// Headers that also exist as a `Label:` sub-heading and must not be
    /// matched when immediately followed by a colon.
    pub colon_excluded_headers: &'static [&'static str],
    /// Ends the preceding section; never emitted as a section itself.
    pub cut_boundary: &'static str,
    /// `Label: value` sub-headings that get their own line.
    pub sub_labels: &'static [&'static str],
    /// Sub-labels whose value is a run-on list of sentences.
    pub implicit_list_labels: &'static [&'static str],
    /// Sections where lines starting with an implicit-list label are split.
    pub labelled_list_sections: &'static [&'static str],
    /// Sections where every line is split.
    pub list_sections: &'static [&'static str],
    /// Phrases at least this many characters long are prose, not list items.
    pub prose_threshold_chars: usize,
}

pub const PRACTICAS_PE: SegmenterProfile = SegmenterProfile {
    source: JobSource::PracticasPe,
    headers: &[
        "Requisitos",
        "Condiciones del contrato",
        "Como postular",
        "Cómo postular",
        "Recomendaciones para postular",
        "Resultados",
    ],
    colon_excluded_headers: &["Requisitos"],
    cut_boundary: "Te sugerimos",
    sub_labels: &[
        "Número de vacantes",
        "Modalidad de prácticas",
        "Modalidad",
        "Formación académica",
        "Grado académico",
        "Especialidad",
        "Requisitos",
        "Funciones",
        "Conocimientos",
        "Experiencia",
        "Beneficios",
        "Remuneración",
        "Subvención",
        "Horario",
        "Duración",
        "Lugar",
        "Lugar de trabajo",
        "Fecha de inicio",
        "Fecha límite de postulación",
        "Pueden postular",
    ],
    implicit_list_labels: &["Requisitos", "Funciones"],
    labelled_list_sections: &["Requisitos", "Condiciones del contrato"],
    list_sections: &["Recomendaciones para postular"],
    prose_threshold_chars: 100,
};

const PROFILES: &[SegmenterProfile] = &[PRACTICAS_PE];

/// Returns the profile for `source`, if its postings use sectioned descriptions.
pub fn profile_for(source: JobSource) -> Option<&'static SegmenterProfile> {
    PROFILES.iter().find(|profile| profile.source == source)
}

impl SegmenterProfile {
    /// True when `line` opens with one of `labels` followed by a colon.
    pub(crate) fn line_starts_with_label(labels: &[&str], line: &str) -> bool {
        labels.iter().any(|label| {
            line.strip_prefix(label)
                .is_some_and(|rest| rest.starts_with(':'))
        })
    }

    pub(crate) fn is_sub_label_line(&self, line: &str) -> bool {
        Self::line_starts_with_label(self.sub_labels, line)
    }
}
