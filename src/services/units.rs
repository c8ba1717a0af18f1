//! Unit converter module for converting between measurement units
//!
//! Parses `<amount> <from> (to|in|ba|be) <to>` and handles the temperature
//! and length/mass cases. Currency pairs are resolved by
//! [`Converter`](super::converter::Converter) once the unit table declines.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::format::{format_max_fraction, format_number};

/// A parsed `<amount> <from> to <to>` query. Unit tokens are lowercased.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

/// Which converter branch produced a [`Conversion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    Temperature,
    Unit,
    Currency,
}

/// A conversion result
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub kind: ConversionKind,
    pub from_value: f64,
    pub from_unit: String,
    pub to_value: f64,
    pub to_unit: String,
}

impl Conversion {
    /// Format as display string: "10 km = 6.2137 mi"
    pub fn display(&self) -> String {
        match self.kind {
            ConversionKind::Temperature => format!(
                "{}°{} = {:.2}°{}",
                format_number(self.from_value),
                self.from_unit.to_uppercase(),
                self.to_value,
                self.to_unit.to_uppercase()
            ),
            ConversionKind::Unit => format!(
                "{} {} = {:.4} {}",
                format_number(self.from_value),
                self.from_unit,
                self.to_value,
                self.to_unit
            ),
            ConversionKind::Currency => format!(
                "{} {} = {} {}",
                format_number(self.from_value),
                self.from_unit.to_uppercase(),
                format_max_fraction(self.to_value, 2),
                self.to_unit.to_uppercase()
            ),
        }
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            ConversionKind::Temperature => "Temperature converter",
            ConversionKind::Unit => "Unit converter",
            ConversionKind::Currency => "Currency converter",
        }
    }
}

static CONVERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([\d.,]+)\s*([a-z]+)\s+(?:in|to|ba|be)\s+([a-z]+)$")
        .expect("conversion pattern is valid")
});

/// Try to parse a conversion query
/// Examples: "10 km to mi", "32 f in c", "12,5 usd to eur"
pub fn parse(query: &str) -> Option<ConversionRequest> {
    let caps = CONVERSION_PATTERN.captures(query)?;

    // Decimal comma -> decimal point
    let amount: f64 = caps[1].replacen(',', ".", 1).parse().ok()?;
    if !amount.is_finite() {
        return None;
    }

    Some(ConversionRequest {
        amount,
        from: caps[2].to_lowercase(),
        to: caps[3].to_lowercase(),
    })
}

/// Convert with the temperature formulas or the unit table.
/// Returns None when neither applies (the pair may still be a currency).
pub fn convert(request: &ConversionRequest) -> Option<Conversion> {
    if let Some(value) = convert_temperature(request.amount, &request.from, &request.to) {
        return Some(Conversion {
            kind: ConversionKind::Temperature,
            from_value: request.amount,
            from_unit: request.from.clone(),
            to_value: value,
            to_unit: request.to.clone(),
        });
    }

    let (from_factor, from_category) = UNIT_TABLE.get(request.from.as_str())?;
    let (to_factor, to_category) = UNIT_TABLE.get(request.to.as_str())?;

    if from_category != to_category {
        return None; // Can't convert between different categories
    }

    Some(Conversion {
        kind: ConversionKind::Unit,
        from_value: request.amount,
        from_unit: request.from.clone(),
        to_value: request.amount * from_factor / to_factor,
        to_unit: request.to.clone(),
    })
}

/// Celsius <-> Fahrenheit only; every other pair is not a temperature
fn convert_temperature(value: f64, from: &str, to: &str) -> Option<f64> {
    match (from, to) {
        ("c", "f") => Some(value * 9.0 / 5.0 + 32.0),
        ("f", "c") => Some((value - 32.0) * 5.0 / 9.0),
        _ => None,
    }
}

/// Unit categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Length,
    Mass,
}

// Conversion factors to base unit (meter for length, gram for mass)
static UNIT_TABLE: Lazy<HashMap<&'static str, (f64, Category)>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // Length (base: meter)
    m.insert("mm", (0.001, Category::Length));
    m.insert("cm", (0.01, Category::Length));
    m.insert("m", (1.0, Category::Length));
    m.insert("km", (1000.0, Category::Length));
    m.insert("in", (0.0254, Category::Length));
    m.insert("ft", (0.3048, Category::Length));
    m.insert("yd", (0.9144, Category::Length));
    m.insert("mi", (1609.344, Category::Length));

    // Mass (base: gram)
    m.insert("mg", (0.001, Category::Mass));
    m.insert("g", (1.0, Category::Mass));
    m.insert("kg", (1000.0, Category::Mass));
    m.insert("oz", (28.3495, Category::Mass));
    m.insert("lb", (453.592, Category::Mass));

    m
});
