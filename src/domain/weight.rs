use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder returned by the weight extractor when no weight was found.
pub const NO_WEIGHT: &str = "no_weight";

/// Weight assumed whenever the real one is missing or unusable, so that
/// checkout is never blocked by incomplete product data.
pub const DEFAULT_WEIGHT_LB: f64 = 1.0;

const GRAMS_PER_POUND: f64 = 453.592;
const POUNDS_PER_KILOGRAM: f64 = 2.20462;
const OUNCES_PER_POUND: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeightUnit {
    Grams,
    Kilograms,
    Pounds,
    Ounces,
    NoUnit,
}

impl WeightUnit {
    /// Unknown labels map to `NoUnit`; they are never an error.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "g" => WeightUnit::Grams,
            "kg" => WeightUnit::Kilograms,
            "lb" => WeightUnit::Pounds,
            "oz" => WeightUnit::Ounces,
            _ => WeightUnit::NoUnit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Grams => "g",
            WeightUnit::Kilograms => "kg",
            WeightUnit::Pounds => "lb",
            WeightUnit::Ounces => "oz",
            WeightUnit::NoUnit => "no_unit",
        }
    }

    /// Every unit label the extractor is allowed to answer with.
    pub const LABELS: [&'static str; 5] = ["g", "kg", "lb", "oz", "no_unit"];
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for WeightUnit {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<WeightUnit> for String {
    fn from(unit: WeightUnit) -> Self {
        unit.as_str().to_string()
    }
}

/// A weight as extracted from free-text product specifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSpec {
    #[serde(rename = "weight_value", deserialize_with = "text_or_number")]
    pub value: String,
    #[serde(rename = "weight_unit")]
    pub unit: WeightUnit,
}

/// Extractors sometimes answer `2` instead of `"2"`.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

impl WeightSpec {
    pub fn new(value: impl Into<String>, unit: WeightUnit) -> Self {
        Self {
            value: value.into(),
            unit,
        }
    }

    /// The sentinel pair used when extraction fails.
    pub fn missing() -> Self {
        Self::new(NO_WEIGHT, WeightUnit::NoUnit)
    }

    pub fn is_missing(&self) -> bool {
        self.value == NO_WEIGHT
    }

    pub fn to_pounds(&self) -> f64 {
        to_pounds(&self.value, self.unit)
    }
}

/// Convert a free-text weight value and unit label into pounds.
///
/// Every failure path (sentinel value, unparseable number, unknown unit)
/// degrades to [`DEFAULT_WEIGHT_LB`].
pub fn convert_to_pounds(weight_value: &str, weight_unit: &str) -> f64 {
    to_pounds(weight_value, WeightUnit::from_label(weight_unit))
}

fn to_pounds(weight_value: &str, unit: WeightUnit) -> f64 {
    if weight_value == NO_WEIGHT {
        return DEFAULT_WEIGHT_LB;
    }

    let Some(value) = parse_amount(weight_value) else {
        log::debug!("Unparseable weight value '{}', assuming default", weight_value);
        return DEFAULT_WEIGHT_LB;
    };

    match unit {
        WeightUnit::Grams => value / GRAMS_PER_POUND,
        WeightUnit::Kilograms => value * POUNDS_PER_KILOGRAM,
        WeightUnit::Ounces => value / OUNCES_PER_POUND,
        WeightUnit::Pounds => value,
        WeightUnit::NoUnit => DEFAULT_WEIGHT_LB,
    }
}

/// A comma is a decimal separator here, never a thousands separator.
fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
