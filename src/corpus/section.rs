//! Heuristic section detection for untagged documents.
//!
//! Guideline PDFs rarely arrive with clean section metadata. When the
//! extraction collaborator supplies none, the document is assigned the
//! category whose keyword set matches its text most often, or left untagged
//! when nothing matches.

/// Category keyword table, checked against lowercased document text.
const SECTION_KEYWORDS: &[(&str, &[&str])] = &[
    ("airway", &["airway", "intubation", "ventilation", "breathing"]),
    (
        "circulation",
        &["circulation", "hemorrhage", "shock", "blood", "transfusion"],
    ),
    (
        "neurological",
        &["neurological", "brain", "spinal", "consciousness"],
    ),
    ("trauma", &["trauma", "injury", "fracture", "wound"]),
    (
        "emergency",
        &["emergency", "resuscitation", "critical", "urgent"],
    ),
    (
        "surgical",
        &["surgical", "operation", "procedure", "intervention"],
    ),
    (
        "medication",
        &["medication", "drug", "pharmacology", "dose", "dosage"],
    ),
    (
        "assessment",
        &["assessment", "evaluation", "diagnosis", "examination"],
    ),
];

/// Detect a section category for document text with no explicit tag.
///
/// Returns the best-matching category name, or an empty string when no
/// keyword matches at all.
pub fn detect_section(text: &str) -> String {
    let lower = text.to_lowercase();

    let mut best = "";
    let mut best_matches = 0usize;

    for (category, keywords) in SECTION_KEYWORDS {
        let matches = keywords.iter().filter(|k| lower.contains(**k)).count();
        if matches > best_matches {
            best_matches = matches;
            best = category;
        }
    }

    best.to_string()
}
