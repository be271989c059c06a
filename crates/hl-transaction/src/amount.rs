use std::{fmt, num::ParseFloatError};

use serde::{Deserialize, Serialize};

/// A transfer amount.
///
/// No sign or range checks are applied; the ledger records whatever the
/// caller passes.  The [`fmt::Display`] form is the exact text fed into the
/// transaction hash, so integers and decimals are kept apart: `10` renders
/// as `"10"` while `10.0` renders as `"10.0"`.
///
/// In JSON finite values are bare numbers; `nan`, `inf` and `-inf` are
/// written as strings so that they survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "AmountRepr", try_from = "AmountRepr")]
pub enum Amount {
    Integer(i64),
    Decimal(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl From<Amount> for AmountRepr {
    fn from(amount: Amount) -> Self {
        match amount {
            Amount::Integer(v) => AmountRepr::Integer(v),
            Amount::Decimal(v) if v.is_finite() => AmountRepr::Decimal(v),
            Amount::Decimal(v) => AmountRepr::Text(canonical_float(v)),
        }
    }
}

impl TryFrom<AmountRepr> for Amount {
    type Error = ParseFloatError;

    fn try_from(repr: AmountRepr) -> Result<Self, Self::Error> {
        Ok(match repr {
            AmountRepr::Integer(v) => Amount::Integer(v),
            AmountRepr::Decimal(v) => Amount::Decimal(v),
            AmountRepr::Text(s) => Amount::Decimal(s.parse()?),
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Integer(v) => write!(f, "{v}"),
            Amount::Decimal(v) => f.write_str(&canonical_float(*v)),
        }
    }
}

impl From<i64> for Amount {
    fn from(v: i64) -> Self {
        Amount::Integer(v)
    }
}

impl From<i32> for Amount {
    fn from(v: i32) -> Self {
        Amount::Integer(v.into())
    }
}

impl From<u32> for Amount {
    fn from(v: u32) -> Self {
        Amount::Integer(v.into())
    }
}

impl From<f64> for Amount {
    fn from(v: f64) -> Self {
        Amount::Decimal(v)
    }
}

/// Shortest round-tripping decimal form of `v`.
///
/// Positional with a mandatory fractional part (`5.0`, not `5`) while the
/// decimal exponent is in `-4..16`; scientific otherwise, with a signed
/// exponent of at least two digits (`1e-05`, `1.5e+16`).
pub(crate) fn canonical_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let sci = format!("{v:e}");
    if let Some((mantissa, exp)) = sci.split_once('e') {
        if let Ok(exp) = exp.parse::<i32>() {
            if v != 0.0 && !(-4..16).contains(&exp) {
                let sign = if exp < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exp.unsigned_abs());
            }
        }
    }

    let s = v.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}
