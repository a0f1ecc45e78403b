//! Body formatting pipeline: turns a section's run-on text into readable lines.
//!
//! Stages run in a fixed order:
//! 1. line break before every registered `Label:` sub-heading
//! 2. line break before numbered (`1. `) and lettered (`a) `) list markers
//! 3. collapse blank lines in front of label/value lines
//! 4. sentence splitting for sections rendered as implicit lists

use once_cell::sync::Lazy;
use regex::Regex;

use crate::description::labels::SegmenterProfile;

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\d+\.|[a-z]\))[ \t]").expect("list marker regex is valid"));

// Period, horizontal whitespace, then an uppercase letter (accented ones included).
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[ \t]+(\p{Lu})").expect("sentence boundary regex is valid"));

/// Formats a section body. `title` is `None` for the untitled fallback section,
/// which skips list splitting.
pub fn format_body(profile: &SegmenterProfile, raw: &str, title: Option<&str>) -> String {
    let text = break_before_sub_labels(profile, raw);
    let text = break_before_list_markers(&text);
    let text = consolidate_label_lines(profile, &text);

    match title {
        Some(title) => split_implicit_lists(profile, title, &text),
        None => text,
    }
}

fn break_before_sub_labels(profile: &SegmenterProfile, text: &str) -> String {
    let mut positions = Vec::new();
    for label in profile.sub_labels {
        let needle = format!("{label}:");
        positions.extend(
            text.match_indices(needle.as_str())
                .map(|(pos, _)| pos)
                .filter(|&pos| starts_word(text, pos)),
        );
    }

    insert_line_breaks(text, positions).trim().to_string()
}

fn break_before_list_markers(text: &str) -> String {
    let positions = LIST_MARKER
        .find_iter(text)
        .map(|m| m.start())
        .filter(|&pos| text[..pos].chars().next_back().is_some_and(char::is_whitespace))
        .collect();

    insert_line_breaks(text, positions).trim().to_string()
}

fn consolidate_label_lines(profile: &SegmenterProfile, text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim_end();
        let content = line.trim_start();
        if profile.is_sub_label_line(content) {
            while lines.last().is_some_and(|prev| prev.is_empty()) {
                lines.pop();
            }
            lines.push(content);
        } else {
            lines.push(line);
        }
    }

    lines.join("\n").trim_end().to_string()
}

fn split_implicit_lists(profile: &SegmenterProfile, title: &str, text: &str) -> String {
    let every_line = profile.list_sections.contains(&title);
    if !every_line && !profile.labelled_list_sections.contains(&title) {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            if every_line
                || SegmenterProfile::line_starts_with_label(profile.implicit_list_labels, line)
            {
                split_sentences(line, profile.prose_threshold_chars)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Breaks `line` at `. X` boundaries. A boundary whose accumulated phrase (up to,
/// not including, the period) is at least `threshold` characters long is prose
/// and gets joined with a space; the phrase then keeps accumulating.
fn split_sentences(line: &str, threshold: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut segment_start = 0;

    for caps in SENTENCE_BOUNDARY.captures_iter(line) {
        let (Some(boundary), Some(next)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let split_at = boundary.start() + 1;
        let phrase = &line[segment_start..boundary.start()];

        // "1. Apoyar" is a list item, not two sentences.
        if is_list_number(phrase) {
            continue;
        }

        out.push_str(&line[copied..split_at]);
        if phrase.chars().count() >= threshold {
            out.push(' ');
        } else {
            out.push('\n');
            segment_start = next.start();
        }
        copied = next.start();
    }

    out.push_str(&line[copied..]);
    out
}

fn is_list_number(phrase: &str) -> bool {
    let digits = phrase.trim().trim_end_matches('.');
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// A label only counts when it is not the tail of a longer word.
fn starts_word(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
}

/// Inserts a newline before each byte offset in `positions`, replacing the
/// horizontal whitespace in front of it. Offsets already at the start of a
/// line are left alone.
fn insert_line_breaks(text: &str, mut positions: Vec<usize>) -> String {
    positions.sort_unstable();
    positions.dedup();

    let mut out = String::with_capacity(text.len() + positions.len());
    let mut cursor = 0;

    for pos in positions {
        let before = &text[cursor..pos];
        let kept = before.trim_end_matches(|c: char| c.is_whitespace() && c != '\n');
        let line_start = cursor + kept.len();

        if line_start == 0 || text[..line_start].ends_with('\n') {
            out.push_str(before);
        } else {
            out.push_str(kept);
            out.push('\n');
        }
        cursor = pos;
    }

    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::labels::PRACTICAS_PE;

    #[test]
    fn test_sub_labels_start_their_own_line() {
        let body = format_body(
            &PRACTICAS_PE,
            "Número de vacantes: 02 Lugar: Trujillo Beneficios: Seguro médico",
            Some("Condiciones del contrato"),
        );
        assert_eq!(
            body,
            "Número de vacantes: 02\nLugar: Trujillo\nBeneficios: Seguro médico"
        );
    }

    #[test]
    fn test_time_values_are_not_broken() {
        let body = format_body(
            &PRACTICAS_PE,
            "Lugar: Lima Horario: 08:00 a.m. - 05:00 p.m. Duración: 6 meses",
            Some("Condiciones del contrato"),
        );
        assert!(body.contains("Horario: 08:00 a.m. - 05:00 p.m."));
        assert_eq!(body.lines().count(), 3);
    }

    #[test]
    fn test_chained_labels_each_get_a_line() {
        let body = format_body(
            &PRACTICAS_PE,
            "Formación académica: Funciones: Apoyar al área",
            Some("Requisitos"),
        );
        assert_eq!(body, "Formación académica:\nFunciones: Apoyar al área");
    }

    #[test]
    fn test_label_inside_a_word_is_ignored() {
        let body = format_body(&PRACTICAS_PE, "Sobre el SubLugar: Lima", None);
        assert_eq!(body, "Sobre el SubLugar: Lima");
    }

    #[test]
    fn test_existing_newline_is_not_doubled() {
        let body = format_body(&PRACTICAS_PE, "Lugar: Lima\nHorario: Flexible", None);
        assert_eq!(body, "Lugar: Lima\nHorario: Flexible");
    }

    #[test]
    fn test_blank_lines_before_labels_are_removed() {
        let body = format_body(&PRACTICAS_PE, "Lugar: Lima\n\n\nHorario: Flexible\n\n", None);
        assert_eq!(body, "Lugar: Lima\nHorario: Flexible");
    }

    #[test]
    fn test_list_markers_break_lines() {
        let body = format_body(
            &PRACTICAS_PE,
            "Funciones: 1. Apoyar en reportes 2. Atender clientes a) Lima b) Trujillo",
            None,
        );
        assert_eq!(
            body,
            "Funciones:\n1. Apoyar en reportes\n2. Atender clientes\na) Lima\nb) Trujillo"
        );
    }

    #[test]
    fn test_list_marker_needs_leading_whitespace() {
        let body = format_body(&PRACTICAS_PE, "Versión2. Estable (a) ver", None);
        assert_eq!(body, "Versión2. Estable (a) ver");
    }

    #[test]
    fn test_requirements_line_splits_into_items() {
        let body = format_body(
            &PRACTICAS_PE,
            "Requisitos: Estudiante de Ingeniería. Manejo de Excel. Disponibilidad inmediata.",
            Some("Requisitos"),
        );
        assert_eq!(
            body,
            "Requisitos: Estudiante de Ingeniería.\nManejo de Excel.\nDisponibilidad inmediata."
        );
    }

    #[test]
    fn test_long_sentence_is_kept_as_prose() {
        let long = "Requisitos: Estudiantes de los últimos ciclos de Ingeniería de Sistemas con interés en desarrollo backend y bases de datos.";
        assert!(long.chars().count() >= 100);
        let body = format_body(
            &PRACTICAS_PE,
            &format!("{long} Inglés intermedio."),
            Some("Requisitos"),
        );
        assert_eq!(body, format!("{long} Inglés intermedio."));
        assert_eq!(body.lines().count(), 1);
    }

    #[test]
    fn test_phrase_just_under_threshold_is_split() {
        let phrase = format!("Requisitos: {}", "x".repeat(87));
        assert_eq!(phrase.chars().count(), 99);
        let body = format_body(
            &PRACTICAS_PE,
            &format!("{phrase}. Inglés básico."),
            Some("Requisitos"),
        );
        assert_eq!(body, format!("{phrase}.\nInglés básico."));
    }

    #[test]
    fn test_phrase_at_threshold_is_joined() {
        let phrase = format!("Requisitos: {}", "x".repeat(88));
        assert_eq!(phrase.chars().count(), 100);
        let body = format_body(
            &PRACTICAS_PE,
            &format!("{phrase}. Inglés básico."),
            Some("Requisitos"),
        );
        assert_eq!(body, format!("{phrase}. Inglés básico."));
    }

    #[test]
    fn test_short_sentences_after_prose_stay_joined() {
        let long = "Requisitos: Estudiantes de los últimos ciclos de Ingeniería de Sistemas con interés en desarrollo backend y bases de datos.";
        let text = format!("{long} Inglés básico. Excel intermedio.");
        let body = format_body(&PRACTICAS_PE, &text, Some("Requisitos"));
        assert_eq!(body, text);
        assert_eq!(body.lines().count(), 1);
    }

    #[test]
    fn test_unlabelled_lines_in_requirements_are_not_split() {
        let body = format_body(
            &PRACTICAS_PE,
            "Número de vacantes: 01. Lugar: Lima. Otra cosa. Más texto.",
            Some("Requisitos"),
        );
        assert!(body.contains("Lugar: Lima. Otra cosa. Más texto."));
    }

    #[test]
    fn test_application_tips_split_every_line() {
        let body = format_body(
            &PRACTICAS_PE,
            "Revisa las bases. Prepara tu CV. Envía antes de la fecha.",
            Some("Recomendaciones para postular"),
        );
        assert_eq!(
            body,
            "Revisa las bases.\nPrepara tu CV.\nEnvía antes de la fecha."
        );
    }

    #[test]
    fn test_numbered_item_is_not_split_after_its_number() {
        let body = format_body(
            &PRACTICAS_PE,
            "1. Revisa las bases. Prepara tu CV.",
            Some("Recomendaciones para postular"),
        );
        assert_eq!(body, "1. Revisa las bases.\nPrepara tu CV.");
    }

    #[test]
    fn test_untitled_body_skips_list_splitting() {
        let body = format_body(&PRACTICAS_PE, "Revisa las bases. Prepara tu CV.", None);
        assert_eq!(body, "Revisa las bases. Prepara tu CV.");
    }

    #[test]
    fn test_other_sections_are_not_split() {
        let body = format_body(
            &PRACTICAS_PE,
            "Revisa las bases. Prepara tu CV.",
            Some("Resultados"),
        );
        assert_eq!(body, "Revisa las bases. Prepara tu CV.");
    }

    #[test]
    fn test_insert_line_breaks_replaces_horizontal_whitespace() {
        assert_eq!(insert_line_breaks("a \t b", vec![4]), "a\nb");
        assert_eq!(insert_line_breaks("b", vec![0]), "b");
        assert_eq!(insert_line_breaks("a\n  b", vec![4]), "a\n  b");
    }
}
