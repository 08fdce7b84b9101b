//! Typed access into a normalized marker set for gate predicates.
//!
//! Predicates need numeric/categorical comparisons a generic string-matched
//! rule table can't express safely (§4.B "Gate registry representation").
//! `MarkerLookup` is the one place that knows how to find a marker by its
//! canonical code; every predicate in `predicates.rs` goes through it
//! rather than scanning `&[NormalizedMarker]` itself.

use bloodgate_contracts::marker::{NormalizedMarker, RangeStatus};

pub struct MarkerLookup<'a> {
    markers: &'a [NormalizedMarker],
}

impl<'a> MarkerLookup<'a> {
    pub fn new(markers: &'a [NormalizedMarker]) -> Self {
        MarkerLookup { markers }
    }

    fn find(&self, code: &str) -> Option<&'a NormalizedMarker> {
        self.markers.iter().find(|m| m.canonical_code == code)
    }

    pub fn present(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    pub fn status(&self, code: &str) -> Option<RangeStatus> {
        self.find(code).map(|m| m.range_status)
    }

    pub fn numeric(&self, code: &str) -> Option<f64> {
        self.find(code).and_then(|m| m.canonical_value.as_numeric())
    }

    pub fn categorical(&self, code: &str) -> Option<&'a str> {
        self.find(code).and_then(|m| m.canonical_value.as_categorical())
    }

    pub fn status_is_high(&self, code: &str) -> bool {
        matches!(self.status(code), Some(RangeStatus::High) | Some(RangeStatus::CriticalHigh))
    }

    pub fn status_is_critical_high(&self, code: &str) -> bool {
        matches!(self.status(code), Some(RangeStatus::CriticalHigh))
    }

    pub fn status_is_low(&self, code: &str) -> bool {
        matches!(self.status(code), Some(RangeStatus::Low) | Some(RangeStatus::CriticalLow))
    }

    pub fn status_is_critical_low(&self, code: &str) -> bool {
        matches!(self.status(code), Some(RangeStatus::CriticalLow))
    }

    pub fn categorical_is(&self, code: &str, expected: &str) -> bool {
        self.categorical(code).is_some_and(|v| v.eq_ignore_ascii_case(expected))
    }
}
