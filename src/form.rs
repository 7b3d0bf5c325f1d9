//! Form fields
//!
//! The host owns the field values; actions read them through `FieldSource`
//! once per invocation into a parameter snapshot. Numeric fields are coerced
//! the way a browser's `parseInt` / `parseFloat` would, with "not a number"
//! represented as `None`.

use crate::api::types::{FetchDataQuery, FetchDataRequest, PredictRequest};
use parking_lot::RwLock;
use serde_json::Number;
use std::collections::BTreeMap;

pub const SYMBOL: &str = "symbol";
pub const EXCHANGE: &str = "exchange";
pub const TIMEFRAME: &str = "timeframe";
pub const LIMIT: &str = "limit";
pub const FETCH_ALL: &str = "fetchAll";
pub const TARGET_PROFIT: &str = "targetProfit";
pub const MAX_DAYS: &str = "maxDays";

/// Every field the panel knows, in display order
pub const FIELD_NAMES: [&str; 7] = [
    SYMBOL,
    EXCHANGE,
    TIMEFRAME,
    LIMIT,
    FETCH_ALL,
    TARGET_PROFIT,
    MAX_DAYS,
];

/// Read access to the host's named fields
pub trait FieldSource: Send + Sync {
    /// Current text of a field; empty when unset
    fn value(&self, name: &str) -> String;

    /// Checkbox state of a field
    fn checked(&self, name: &str) -> bool {
        parse_checkbox(&self.value(name))
    }
}

/// In-memory form backing the terminal host
pub struct FormState {
    fields: RwLock<BTreeMap<String, String>>,
}

impl FormState {
    /// Form pre-filled with the service's own defaults
    pub fn new() -> Self {
        let defaults = [
            (SYMBOL, "BTC/USDT"),
            (EXCHANGE, "binance"),
            (TIMEFRAME, "1d"),
            (LIMIT, "1000"),
            (FETCH_ALL, "false"),
            (TARGET_PROFIT, ""),
            (MAX_DAYS, "365"),
        ];
        Self {
            fields: RwLock::new(
                defaults
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    /// Whether `name` is one of the panel's fields
    pub fn is_known(name: &str) -> bool {
        FIELD_NAMES.contains(&name)
    }

    pub fn set(&self, name: &str, value: impl Into<String>) {
        self.fields.write().insert(name.to_string(), value.into());
    }

    /// Snapshot of all fields in display order
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let fields = self.fields.read();
        FIELD_NAMES
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    fields.get(*name).cloned().unwrap_or_default(),
                )
            })
            .collect()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldSource for FormState {
    fn value(&self, name: &str) -> String {
        self.fields.read().get(name).cloned().unwrap_or_default()
    }
}

// ============================================================================
// Parameter snapshots
// ============================================================================

/// Collection parameters read at call time
#[derive(Debug, Clone, PartialEq)]
pub struct CollectParams {
    pub symbol: String,
    pub exchange: String,
    pub timeframe: String,
    /// Raw text of the limit field
    pub limit: String,
    pub fetch_all: bool,
}

impl CollectParams {
    pub fn read(fields: &dyn FieldSource) -> Self {
        Self {
            symbol: fields.value(SYMBOL),
            exchange: fields.value(EXCHANGE),
            timeframe: fields.value(TIMEFRAME),
            limit: fields.value(LIMIT),
            fetch_all: fields.checked(FETCH_ALL),
        }
    }

    /// Query-string form; values are passed through uncoerced
    pub fn to_query(&self) -> FetchDataQuery {
        FetchDataQuery {
            symbol: self.symbol.clone(),
            exchange_name: self.exchange.clone(),
            timeframe: self.timeframe.clone(),
            limit: self.limit.clone(),
        }
    }

    /// JSON body form; the exchange is not part of it
    pub fn to_request(&self) -> FetchDataRequest {
        FetchDataRequest {
            symbol: self.symbol.clone(),
            timeframe: self.timeframe.clone(),
            limit: parse_int(&self.limit),
            fetch_all: self.fetch_all,
        }
    }
}

/// Prediction parameters read at call time
#[derive(Debug, Clone, PartialEq)]
pub struct PredictParams {
    pub target_profit: Option<f64>,
    pub max_days: Option<Number>,
}

impl PredictParams {
    pub fn read(fields: &dyn FieldSource) -> Self {
        Self {
            target_profit: parse_float(&fields.value(TARGET_PROFIT)),
            max_days: parse_int(&fields.value(MAX_DAYS)),
        }
    }

    pub fn to_request(&self) -> PredictRequest {
        PredictRequest {
            target_profit: self.target_profit,
            max_days: self.max_days.clone(),
        }
    }
}

// ============================================================================
// Coercion
// ============================================================================

/// Browser-style `parseInt`: longest integer prefix, `0x` means hex
///
/// Magnitudes past `i64` continue in floating point, so only text with no
/// leading digits (or an infinite value) yields `None`.
pub fn parse_int(text: &str) -> Option<Number> {
    let s = text.trim_start();
    let (negative, s) = split_sign(s);

    let (radix, digits) = match s.get(..2) {
        Some(p) if p.eq_ignore_ascii_case("0x") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let digits = &digits[..end];
    match i64::from_str_radix(digits, radix) {
        Ok(magnitude) => Some(Number::from(if negative { -magnitude } else { magnitude })),
        Err(_) => {
            let magnitude = if radix == 10 {
                digits.parse::<f64>().ok()?
            } else {
                digits
                    .chars()
                    .filter_map(|c| c.to_digit(radix))
                    .fold(0f64, |acc, d| acc * f64::from(radix) + f64::from(d))
            };
            Number::from_f64(if negative { -magnitude } else { magnitude })
        }
    }
}

/// Browser-style `parseFloat`: longest decimal prefix, `Infinity` accepted
///
/// Non-finite results are `None`, matching their JSON encoding as `null`.
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let (negative, rest) = split_sign(s);

    if rest.starts_with("Infinity") {
        return None;
    }

    let bytes = rest.as_bytes();
    let mut end = 0;
    let mut mantissa_digits = 0;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let value: f64 = rest[..end].parse().ok()?;
    let value = if negative { -value } else { value };
    value.is_finite().then_some(value)
}

/// Checkbox text to state
pub fn parse_checkbox(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "yes" | "1"
    )
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}
