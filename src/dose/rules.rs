//! Drug dose rule table.
//!
//! Rules are static reference configuration, not derived from the corpus.
//! The crate ships a built-in standard formulary; deployments can load a
//! JSON formulary instead, in the same shape.

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{CorpsmanError, Result};

/// Dose unit for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseUnit {
    /// Milligrams.
    Mg,
    /// Micrograms.
    Mcg,
    /// Grams.
    G,
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoseUnit::Mg => write!(f, "mg"),
            DoseUnit::Mcg => write!(f, "mcg"),
            DoseUnit::G => write!(f, "g"),
        }
    }
}

/// How a rule's dose is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseAmount {
    /// Weight-scaled: dose = value × patient weight in kilograms.
    PerKg(f64),
    /// Fixed dose, used verbatim.
    Fixed(f64),
}

/// One drug dose rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseRule {
    /// Canonical display name ("Ketamine").
    pub name: String,

    /// Recognized names and synonyms, matched as lowercase substrings.
    pub synonyms: Vec<String>,

    /// Per-kilogram or fixed dose amount.
    pub amount: DoseAmount,

    /// Unit of the computed dose.
    pub unit: DoseUnit,

    /// Route phrase ("IV", "IV over 10 minutes").
    pub route: String,

    /// Administration note appended to the response.
    pub note: String,

    /// Optional repeat/interval note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,

    /// Lower sanity bound on patient weight in kilograms.
    pub min_weight_kg: f64,

    /// Upper sanity bound on patient weight in kilograms.
    pub max_weight_kg: f64,
}

impl DoseRule {
    /// Check whether a lowercased query mentions this drug.
    ///
    /// Synonyms are tried longest first so a longer name wins over any of
    /// its own prefixes.
    pub fn matches(&self, query_lower: &str) -> bool {
        let mut synonyms: Vec<&str> = self.synonyms.iter().map(String::as_str).collect();
        synonyms.sort_unstable_by_key(|s| std::cmp::Reverse(s.len()));
        synonyms.iter().any(|s| query_lower.contains(s))
    }
}

/// The full rule table.
///
/// Invariant (checked at construction): no synonym appears in more than one
/// rule, so a recognized drug name maps to exactly one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseFormulary {
    rules: Vec<DoseRule>,
}

impl DoseFormulary {
    /// Create a formulary from rules, validating synonym uniqueness.
    pub fn new(rules: Vec<DoseRule>) -> Result<DoseFormulary> {
        let mut seen = std::collections::HashSet::new();
        for rule in &rules {
            if rule.synonyms.is_empty() {
                return Err(CorpsmanError::config(format!(
                    "rule {} has no synonyms",
                    rule.name
                )));
            }
            for synonym in &rule.synonyms {
                let lower = synonym.to_lowercase();
                if !seen.insert(lower.clone()) {
                    return Err(CorpsmanError::config(format!(
                        "synonym {lower} appears in more than one rule"
                    )));
                }
            }
        }
        Ok(DoseFormulary { rules })
    }

    /// Load a formulary from a JSON array of rules.
    pub fn from_json<R: Read>(reader: R) -> Result<DoseFormulary> {
        let rules: Vec<DoseRule> = serde_json::from_reader(reader)?;
        Self::new(rules)
    }

    /// The built-in standard trauma formulary.
    ///
    /// Dose constants follow common trauma-care reference dosing; weight
    /// bounds are conservative plausibility checks, not validated clinical
    /// limits.
    pub fn standard() -> DoseFormulary {
        let rule = |name: &str,
                    synonyms: &[&str],
                    amount: DoseAmount,
                    unit: DoseUnit,
                    route: &str,
                    note: &str,
                    repeat: Option<&str>| DoseRule {
            name: name.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            amount,
            unit,
            route: route.to_string(),
            note: note.to_string(),
            repeat: repeat.map(str::to_string),
            min_weight_kg: 3.0,
            max_weight_kg: 300.0,
        };

        // Construction cannot fail: the table below has unique synonyms.
        DoseFormulary::new(vec![
            rule(
                "Ketamine",
                &["ketamine"],
                DoseAmount::PerKg(0.3),
                DoseUnit::Mg,
                "IV",
                "Monitor respiratory rate",
                None,
            ),
            rule(
                "Morphine",
                &["morphine"],
                DoseAmount::PerKg(0.1),
                DoseUnit::Mg,
                "IV",
                "Monitor respiratory rate",
                None,
            ),
            rule(
                "Fentanyl",
                &["fentanyl"],
                DoseAmount::PerKg(1.0),
                DoseUnit::Mcg,
                "IV",
                "Monitor for respiratory depression",
                None,
            ),
            rule(
                "TXA",
                &["tranexamic acid", "tranexamic", "txa"],
                DoseAmount::Fixed(1000.0),
                DoseUnit::Mg,
                "IV over 10 minutes",
                "Then 1000 mg over 8 hours",
                None,
            ),
            rule(
                "Epinephrine",
                &["epinephrine", "adrenaline"],
                DoseAmount::Fixed(1.0),
                DoseUnit::Mg,
                "IV",
                "Use for cardiac arrest",
                Some("Repeat every 3 to 5 minutes as needed"),
            ),
            rule(
                "Atropine",
                &["atropine"],
                DoseAmount::Fixed(1.0),
                DoseUnit::Mg,
                "IV",
                "Monitor heart rate",
                Some("May repeat every 3 to 5 minutes up to 3mg total"),
            ),
        ])
        .expect("standard formulary has unique synonyms")
    }

    /// Find the matching rule for a lowercased query.
    ///
    /// Rules are scanned in table order; when a query names several drugs,
    /// the earliest rule in the table wins.
    pub fn find_match(&self, query_lower: &str) -> Option<&DoseRule> {
        self.rules.iter().find(|rule| rule.matches(query_lower))
    }

    /// All rules, in table order.
    pub fn rules(&self) -> &[DoseRule] {
        &self.rules
    }
}

impl Default for DoseFormulary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_formulary_is_valid() {
        let formulary = DoseFormulary::standard();
        assert!(formulary.rules().len() >= 6);
    }

    #[test]
    fn test_find_match_by_synonym() {
        let formulary = DoseFormulary::standard();

        let rule = formulary.find_match("what is the tranexamic acid dose").unwrap();
        assert_eq!(rule.name, "TXA");

        let rule = formulary.find_match("txa dosage").unwrap();
        assert_eq!(rule.name, "TXA");
    }

    #[test]
    fn test_find_match_table_order_wins() {
        let formulary = DoseFormulary::standard();

        // Ketamine precedes morphine in the table
        let rule = formulary.find_match("ketamine or morphine for pain").unwrap();
        assert_eq!(rule.name, "Ketamine");
    }

    #[test]
    fn test_find_match_none() {
        let formulary = DoseFormulary::standard();
        assert!(formulary.find_match("tourniquet application").is_none());
    }

    #[test]
    fn test_duplicate_synonym_rejected() {
        let mut rules = DoseFormulary::standard().rules().to_vec();
        rules.push(rules[0].clone());

        assert!(matches!(
            DoseFormulary::new(rules),
            Err(CorpsmanError::Config(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "name": "Ketamine",
                "synonyms": ["ketamine"],
                "amount": {"per_kg": 0.3},
                "unit": "mg",
                "route": "IV",
                "note": "Monitor respiratory rate",
                "min_weight_kg": 3.0,
                "max_weight_kg": 300.0
            }
        ]"#;

        let formulary = DoseFormulary::from_json(json.as_bytes()).unwrap();
        assert_eq!(formulary.rules().len(), 1);
        assert_eq!(formulary.rules()[0].amount, DoseAmount::PerKg(0.3));
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(DoseUnit::Mg.to_string(), "mg");
        assert_eq!(DoseUnit::Mcg.to_string(), "mcg");
        assert_eq!(DoseUnit::G.to_string(), "g");
    }
}
