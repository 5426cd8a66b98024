#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

pub mod arithmetic;
pub mod curve;
pub mod parse;
mod point;
pub mod weierstrass;

pub use curve::{Curve, CurveForm};
pub use num_bigint::BigInt;
pub use point::{Coordinates, Point};
pub use weierstrass::Weierstrass;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EccError {
    #[error("{value} has no inverse modulo {modulus}")]
    NoInverse { value: BigInt, modulus: BigInt },
    #[error("{value} is not a quadratic residue modulo {modulus}")]
    NoSquareRoot { value: BigInt, modulus: BigInt },
    #[error("point ({x}, {y}) is not on the curve")]
    PointNotOnCurve { x: BigInt, y: BigInt },
    #[error("generator scaled by {subgroup_order} is not the identity")]
    InvalidGenerator { subgroup_order: BigInt },
    #[error("invalid curve parameter: {0}")]
    InvalidParameter(String),
    #[error("points belong to different curves")]
    CurveMismatch,
}
