//! Dose resolution from recognized query text.

use std::sync::LazyLock;

use regex::Regex;

use crate::dose::rules::{DoseAmount, DoseFormulary, DoseRule};

/// Pounds-to-kilograms conversion factor.
pub const LB_TO_KG: f64 = 0.453_592_37;

/// First number adjacent to a weight unit keyword.
static WEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(kilograms?|kilos?|kgs?|pounds?|lbs?)\b")
        .expect("weight pattern is valid")
});

/// Resolves drug-dose intents directly from query text.
///
/// A pure function of the query and the rule table: no session state, no
/// index access. `None` means "not a dose query" and the caller falls
/// through to the next pipeline stage; every `Some` is a terminal answer.
#[derive(Debug, Clone, Default)]
pub struct DoseResolver {
    formulary: DoseFormulary,
}

impl DoseResolver {
    /// Create a resolver over a formulary.
    pub fn new(formulary: DoseFormulary) -> Self {
        DoseResolver { formulary }
    }

    /// Create a resolver over the built-in standard formulary.
    pub fn standard() -> Self {
        Self::new(DoseFormulary::standard())
    }

    /// Resolve a dose query into a speakable response.
    ///
    /// Returns `None` when no known drug name appears in the query. A
    /// recognized per-kilogram drug without a stated weight yields a
    /// response asking for the weight — that is an answer, not a miss.
    pub fn resolve(&self, query: &str) -> Option<String> {
        let lower = query.to_lowercase();
        let rule = self.formulary.find_match(&lower)?;

        match rule.amount {
            DoseAmount::Fixed(dose) => Some(format_response(rule, dose, None)),
            DoseAmount::PerKg(per_kg) => match extract_weight_kg(&lower) {
                Some(weight_kg) => {
                    let dose = round1(per_kg * weight_kg);
                    Some(format_response(rule, dose, Some(weight_kg)))
                }
                None => Some(format!(
                    "{} is dosed at {}{} per kilogram {}. State patient weight for an exact dose.",
                    rule.name,
                    format_dose(per_kg),
                    rule.unit,
                    rule.route
                )),
            },
        }
    }
}

/// Extract a patient weight in kilograms from lowercased query text.
///
/// Takes the first number adjacent to a known unit keyword; pound units are
/// converted to kilograms. Numbers without a unit, and unknown unit words,
/// are ignored.
pub fn extract_weight_kg(query_lower: &str) -> Option<f64> {
    let caps = WEIGHT_RE.captures(query_lower)?;
    let value: f64 = caps[1].parse().ok()?;
    let unit = &caps[2];

    if unit.starts_with('p') || unit.starts_with("lb") {
        Some(value * LB_TO_KG)
    } else {
        Some(value)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a dose value without a spurious trailing ".0".
fn format_dose(dose: f64) -> String {
    if dose.fract() == 0.0 {
        format!("{}", dose as i64)
    } else {
        format!("{dose:.1}")
    }
}

fn format_response(rule: &DoseRule, dose: f64, weight_kg: Option<f64>) -> String {
    let mut response = format!(
        "{}: {}{} {}. {}.",
        rule.name,
        format_dose(dose),
        rule.unit,
        rule.route,
        rule.note
    );

    if let Some(repeat) = &rule.repeat {
        response.push(' ');
        response.push_str(repeat);
        response.push('.');
    }

    if let Some(weight) = weight_kg
        && (weight < rule.min_weight_kg || weight > rule.max_weight_kg)
    {
        response.push_str(" Caution: weight outside the expected range, verify dose.");
    }

    response
}
