use crate::curve::Curve;
use crate::weierstrass::Weierstrass;
use crate::EccError;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Weierstrass curve parameters as they appear in configuration files.
///
/// Every value is a decimal string or a `0x` prefixed hex string, optionally
/// preceded by a minus sign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveParams {
    pub a: String,
    pub b: String,
    pub modulus: String,
    pub generator_x: String,
    pub generator_y: String,
    pub subgroup_order: String,
    pub curve_order: String,
}

impl TryFrom<CurveParams> for Curve<Weierstrass> {
    type Error = EccError;
    fn try_from(params: CurveParams) -> Result<Self, Self::Error> {
        Curve::weierstrass(
            parse_int(&params.a)?,
            parse_int(&params.b)?,
            parse_int(&params.modulus)?,
            (
                parse_int(&params.generator_x)?,
                parse_int(&params.generator_y)?,
            ),
            parse_int(&params.subgroup_order)?,
            parse_int(&params.curve_order)?,
        )
    }
}

impl From<&Curve<Weierstrass>> for CurveParams {
    fn from(curve: &Curve<Weierstrass>) -> Self {
        let (x, y) = curve.generator_coordinates();
        Self {
            a: to_hex(curve.form().a()),
            b: to_hex(curve.form().b()),
            modulus: to_hex(curve.modulus()),
            generator_x: to_hex(x),
            generator_y: to_hex(y),
            subgroup_order: to_hex(curve.subgroup_order()),
            curve_order: to_hex(curve.order()),
        }
    }
}

fn to_hex(number: &BigInt) -> String {
    format!("{:#x}", number)
}

pub fn parse_int(value: &str) -> Result<BigInt, EccError> {
    let trimmed = value.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let parsed = match digits.strip_prefix("0x") {
        Some(hex) => BigInt::parse_bytes(hex.as_bytes(), 16),
        None => BigInt::parse_bytes(digits.as_bytes(), 10),
    }
    .ok_or_else(|| EccError::InvalidParameter(format!("cannot parse integer {:?}", value)))?;

    Ok(if negative { -parsed } else { parsed })
}
