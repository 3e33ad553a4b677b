//! Shareable calculator links: `?principal=2000000&rate=8.5&months=240`.
//!
//! Reading is deliberately forgiving. A value that is missing, empty,
//! non-numeric or zero falls back to the calculator default, so a mangled
//! link still renders a result.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::FinCalcError;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

/// Decoded `key=value` pairs in link order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn decode_component(raw: &str) -> FinCalcResult<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_value);
                let lo = bytes.get(i + 2).copied().and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                    _ => {
                        return Err(FinCalcError::InvalidQuery(format!(
                            "bad percent escape in '{raw}'"
                        )))
                    }
                }
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
        .map_err(|_| FinCalcError::InvalidQuery(format!("'{raw}' is not valid UTF-8")))
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'*' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Parse a number the way a browser's `Number()` would, minus hex and
/// infinities. Returns None for anything that is not a finite decimal.
fn parse_number(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    if s.contains(['e', 'E']) {
        Decimal::from_scientific(s).ok()
    } else {
        Decimal::from_str(s).ok()
    }
}

impl QueryParams {
    /// Split a query string. A leading `?` is ignored; `+` and `%20` decode
    /// to spaces. Pairs without `=` get an empty value.
    pub fn parse(query: &str) -> FinCalcResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut pairs = Vec::new();
        for part in query.split('&').filter(|p| !p.is_empty()) {
            let (k, v) = part.split_once('=').unwrap_or((part, ""));
            pairs.push((decode_component(k)?, decode_component(v)?));
        }
        Ok(QueryParams { pairs })
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Numeric value of `key`, or `fallback` when it is missing, empty,
    /// non-numeric or zero.
    pub fn number_or(&self, key: &str, fallback: Decimal) -> Decimal {
        match self.get(key).and_then(parse_number) {
            Some(v) if !v.is_zero() => v,
            _ => fallback,
        }
    }

    /// Whole-number value of `key` (rounded half away from zero), or
    /// `fallback` when it is unusable or does not fit a `u32`.
    pub fn count_or(&self, key: &str, fallback: u32) -> u32 {
        let value = self.number_or(key, Decimal::from(fallback));
        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .filter(|n| *n > 0)
            .unwrap_or(fallback)
    }
}

/// Calculator state that can be serialised into a link.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareLink {
    Emi {
        principal: Money,
        rate: Percent,
        months: u32,
    },
    CompoundInterest {
        principal: Money,
        rate: Percent,
        years: u32,
        frequency: u32,
    },
    SimpleInterest {
        principal: Money,
        rate: Percent,
        years: u32,
    },
}

impl ShareLink {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            ShareLink::Emi {
                principal,
                rate,
                months,
            } => vec![
                ("principal", principal.normalize().to_string()),
                ("rate", rate.normalize().to_string()),
                ("months", months.to_string()),
            ],
            ShareLink::CompoundInterest {
                principal,
                rate,
                years,
                frequency,
            } => vec![
                ("principal", principal.normalize().to_string()),
                ("rate", rate.normalize().to_string()),
                ("years", years.to_string()),
                ("frequency", frequency.to_string()),
            ],
            ShareLink::SimpleInterest {
                principal,
                rate,
                years,
            } => vec![
                ("principal", principal.normalize().to_string()),
                ("rate", rate.normalize().to_string()),
                ("years", years.to_string()),
            ],
        }
    }

    /// `principal=2000000&rate=8.5&months=240`, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full link on `base_url` (origin plus path), replacing any existing query.
    pub fn to_url(&self, base_url: &str) -> String {
        let base = base_url.split('?').next().unwrap_or(base_url);
        format!("{}?{}", base, self.to_query_string())
    }
}
