use crate::arithmetic::{invmod, reduce, sqrtmod};
use crate::curve::{Curve, CurveForm};
use crate::point::{Coordinates, Point};
use crate::EccError;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Short Weierstrass equation `y^2 = x^3 + ax + b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weierstrass {
    a: BigInt,
    b: BigInt,
}

impl Weierstrass {
    pub fn new(a: BigInt, b: BigInt) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> &BigInt {
        &self.a
    }

    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// Right hand side of the equation, `x^3 + ax + b mod p`.
    pub fn rhs(&self, x: &BigInt, modulus: &BigInt) -> BigInt {
        reduce(&(x * x * x + &self.a * x + &self.b), modulus)
    }
}

impl CurveForm for Weierstrass {
    fn validate(&self, modulus: &BigInt) -> Result<(), EccError> {
        if modulus <= &BigInt::from(3u32) {
            return Err(EccError::InvalidParameter(
                "short Weierstrass form needs characteristic above 3".to_string(),
            ));
        }
        let discriminant = &self.a * &self.a * &self.a * 4u32 + &self.b * &self.b * 27u32;
        if reduce(&discriminant, modulus).is_zero() {
            return Err(EccError::InvalidParameter(format!(
                "singular curve: 4a^3 + 27b^2 = 0 mod {}",
                modulus
            )));
        }
        Ok(())
    }

    fn reduce(&self, modulus: &BigInt) -> Self {
        Self::new(reduce(&self.a, modulus), reduce(&self.b, modulus))
    }

    fn contains(&self, x: &BigInt, y: &BigInt, modulus: &BigInt) -> bool {
        self.rhs(x, modulus) == reduce(&(y * y), modulus)
    }

    fn add(
        &self,
        lhs: (&BigInt, &BigInt),
        rhs: (&BigInt, &BigInt),
        modulus: &BigInt,
    ) -> Result<Coordinates, EccError> {
        let (px, py) = lhs;
        let (qx, qy) = rhs;
        let m = reduce(&((qy - py) * invmod(&(qx - px), modulus)?), modulus);
        let x = reduce(&(&m * &m - px - qx), modulus);
        let y = reduce(&(&m * (px - &x) - py), modulus);
        Ok(Coordinates::Affine { x, y })
    }

    fn double(&self, x: &BigInt, y: &BigInt, modulus: &BigInt) -> Result<Coordinates, EccError> {
        // vertical tangent, the point has order 2
        if reduce(y, modulus).is_zero() {
            return Ok(Coordinates::Identity);
        }
        let numerator = x * x * 3u32 + &self.a;
        let m = reduce(&(numerator * invmod(&(y * 2u32), modulus)?), modulus);
        let new_x = reduce(&(&m * &m - x * 2u32), modulus);
        let new_y = reduce(&(&m * (x - &new_x) - y), modulus);
        Ok(Coordinates::Affine { x: new_x, y: new_y })
    }
}

impl Curve<Weierstrass> {
    /// Builds the curve `y^2 = x^3 + ax + b` over GF(`modulus`).
    pub fn weierstrass(
        a: BigInt,
        b: BigInt,
        modulus: BigInt,
        generator: (BigInt, BigInt),
        subgroup_order: BigInt,
        order: BigInt,
    ) -> Result<Self, EccError> {
        if !modulus.is_positive() {
            return Err(EccError::InvalidParameter(format!(
                "modulus {} is not positive",
                modulus
            )));
        }
        Self::new(Weierstrass::new(a, b), modulus, generator, subgroup_order, order)
    }

    /// Recovers the point with x coordinate `x`, choosing the smaller of the
    /// two possible y coordinates.
    pub fn point_from_x(&self, x: &BigInt) -> Result<Point<'_, Weierstrass>, EccError> {
        let x = reduce(x, self.modulus());
        let y_squared = self.form().rhs(&x, self.modulus());
        let y = sqrtmod(&y_squared, self.modulus())?;
        self.point(x, y)
    }
}
