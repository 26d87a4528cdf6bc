//! JSON encodings for exact-decimal fields.
//!
//! Amounts and coordinates are stored as `rust_decimal::Decimal` so base-10
//! fractions never pick up binary rounding. They only become JSON numbers at
//! the response boundary, through one of the two encoders below.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Serializer, ser::Error};

/// Encode a decimal as a JSON integer when it has no fractional part,
/// otherwise as a JSON float.
///
/// `100` and `100.00` both become `100`; `100.5` becomes `100.5`.
pub fn integral_or_float<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        None => serializer.serialize_none(),
        Some(decimal) if decimal.fract().is_zero() => {
            let integral = decimal
                .to_i128()
                .ok_or_else(|| S::Error::custom(format!("{decimal} does not fit in i128")))?;
            serializer.serialize_i128(integral)
        }
        Some(decimal) => serializer.serialize_f64(to_f64::<S>(decimal)?),
    }
}

/// Encode a decimal as a JSON float, whole values included (`-23.0`).
pub fn float<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        None => serializer.serialize_none(),
        Some(decimal) => serializer.serialize_f64(to_f64::<S>(decimal)?),
    }
}

fn to_f64<S: Serializer>(decimal: &Decimal) -> Result<f64, S::Error> {
    decimal
        .to_f64()
        .ok_or_else(|| S::Error::custom(format!("{decimal} is not representable as f64")))
}
