//! Format codec - shorthand text ⇄ measurement set
//!
//! Workers type compact shorthand into editable cells: `100*50*10` for a
//! plate, `φ20*30` for a round bar, `φ60-40*15` for a ring. Each part type
//! with a dedicated grammar decodes through a strict anchored pattern of
//! exactly the expected arity; anything else falls back to a generic
//! `key:value,key:value` codec.
//!
//! Decode never fails: a pattern mismatch yields an empty set, and a group
//! that parses to a non-finite value is left absent. Encode returns an
//! empty string when any required dimension is missing, so a half-filled
//! row never renders partially-formed shorthand.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::engine::measure::{Dimension, MeasurementSet, POSITION_ALIASES};
use crate::engine::normalize::normalize_notation;

const NUM: &str = r"(\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)";

static LINEAR3_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{NUM}\*{NUM}\*{NUM}$")).expect("valid linear grammar")
});
static DIA_LEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^φ{NUM}\*{NUM}$")).expect("valid diameter grammar"));
static DIA_PAIR_LEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^φ{NUM}-{NUM}\*{NUM}$")).expect("valid diameter pair grammar")
});

/// Shorthand text shapes shared by the built-in part types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `a*b*c`
    Linear3,
    /// `φa*b`
    DiaLen,
    /// `φa-b*c`
    DiaPairLen,
}

impl Shape {
    fn regex(&self) -> &'static Regex {
        match self {
            Shape::Linear3 => &LINEAR3_RE,
            Shape::DiaLen => &DIA_LEN_RE,
            Shape::DiaPairLen => &DIA_PAIR_LEN_RE,
        }
    }
}

/// One part type's shorthand grammar: a text shape plus the ordered
/// dimensions its numeric positions map to.
struct Grammar {
    shape: Shape,
    keys: &'static [Dimension],
}

/// Grammar table for the built-in part types. Positions map to the legacy
/// aliases `A`, `B`, `C` in order.
fn grammar_for(part_type: &str) -> Option<Grammar> {
    use Dimension::*;
    let (shape, keys): (Shape, &'static [Dimension]) = match part_type {
        "plate" | "sawn-square" => (Shape::Linear3, &[Length, Width, Height]),
        "round-bar" => (Shape::DiaLen, &[Diameter, Height]),
        "disc-from-plate" => (Shape::DiaLen, &[Diameter, Thickness]),
        "ring" | "tube" => (Shape::DiaPairLen, &[OuterDiameter, InnerDiameter, Height]),
        _ => return None,
    };
    Some(Grammar { shape, keys })
}

/// Encode a measurement set as the part type's shorthand.
///
/// Returns an empty string if any dimension the grammar needs is absent.
pub fn encode(measurements: &MeasurementSet, part_type: &str) -> String {
    let Some(grammar) = grammar_for(part_type) else {
        return encode_pairs(measurements);
    };

    let mut parts = Vec::with_capacity(grammar.keys.len());
    for dim in grammar.keys {
        match measurements.get(*dim) {
            Some(v) => parts.push(v.to_string()),
            None => return String::new(),
        }
    }

    match grammar.shape {
        Shape::Linear3 => format!("{}*{}*{}", parts[0], parts[1], parts[2]),
        Shape::DiaLen => format!("φ{}*{}", parts[0], parts[1]),
        Shape::DiaPairLen => format!("φ{}-{}*{}", parts[0], parts[1], parts[2]),
    }
}

/// Decode shorthand text into a measurement set.
///
/// Populates both the canonical dimension and its positional alias for
/// every matched group. A pattern mismatch yields an empty set.
pub fn decode(text: &str, part_type: &str) -> MeasurementSet {
    let text = normalize_notation(text);
    let Some(grammar) = grammar_for(part_type) else {
        return decode_pairs(&text);
    };

    let mut set = MeasurementSet::new();
    let Some(caps) = grammar.shape.regex().captures(&text) else {
        if !text.is_empty() {
            debug!(part_type, text, "shorthand did not match grammar");
        }
        return set;
    };

    for (i, dim) in grammar.keys.iter().enumerate() {
        if let Ok(value) = caps[i + 1].parse::<f64>() {
            set.set(*dim, value);
            set.set_raw(POSITION_ALIASES[i], value);
        }
    }
    set
}

/// Generic `key:value,key:value` encoding for part types without a
/// dedicated grammar. Canonical dimensions only, in vocabulary order.
fn encode_pairs(measurements: &MeasurementSet) -> String {
    measurements
        .dimensions()
        .iter()
        .map(|(dim, v)| format!("{}:{}", dim, v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Generic codec decode. Keys may be canonical names (either vocabulary
/// casing) or single-letter positional aliases; any malformed pair makes
/// the whole decode come back empty.
fn decode_pairs(text: &str) -> MeasurementSet {
    let mut set = MeasurementSet::new();
    if text.is_empty() {
        return set;
    }

    for pair in text.split(',') {
        let Some((key, value)) = pair.split_once(':') else {
            debug!(pair, "malformed key:value pair");
            return MeasurementSet::new();
        };
        let Ok(value) = value.parse::<f64>() else {
            debug!(pair, "unparseable value in key:value pair");
            return MeasurementSet::new();
        };
        if let Ok(dim) = key.parse::<Dimension>() {
            set.set(dim, value);
        } else if key.len() == 1 && key.chars().all(|c| c.is_ascii_uppercase()) {
            set.set_raw(key, value);
        } else {
            debug!(key, "unknown key in key:value pair");
            return MeasurementSet::new();
        }
    }
    set
}
