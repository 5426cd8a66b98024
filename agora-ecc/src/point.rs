use crate::arithmetic::reduce;
use crate::curve::{Curve, CurveForm};
use crate::EccError;

use num_bigint::{BigInt, BigUint, Sign};

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coordinates {
    /// The point at infinity.
    Identity,
    Affine { x: BigInt, y: BigInt },
}

/// An element of the group of points of `curve`.
///
/// Affine points are always reduced mod p and satisfy the curve equation.
#[derive(Clone, Debug)]
pub struct Point<'c, F: CurveForm> {
    curve: &'c Curve<F>,
    coords: Coordinates,
}

impl<'c, F: CurveForm> PartialEq for Point<'c, F> {
    fn eq(&self, other: &Self) -> bool {
        self.curve.is_same(other.curve) && self.coords == other.coords
    }
}

impl<'c, F: CurveForm> Eq for Point<'c, F> {}

impl<'c, F: CurveForm> Point<'c, F> {
    pub(crate) fn new_unchecked(curve: &'c Curve<F>, coords: Coordinates) -> Self {
        Self { curve, coords }
    }

    pub fn curve(&self) -> &'c Curve<F> {
        self.curve
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coords
    }

    #[inline(always)]
    pub fn is_identity(&self) -> bool {
        self.coords == Coordinates::Identity
    }

    /// Affine x coordinate, `None` for the identity.
    pub fn x(&self) -> Option<&BigInt> {
        match &self.coords {
            Coordinates::Affine { x, .. } => Some(x),
            Coordinates::Identity => None,
        }
    }

    /// Affine y coordinate, `None` for the identity.
    pub fn y(&self) -> Option<&BigInt> {
        match &self.coords {
            Coordinates::Affine { y, .. } => Some(y),
            Coordinates::Identity => None,
        }
    }

    pub fn negate(&self) -> Self {
        let coords = match &self.coords {
            Coordinates::Identity => Coordinates::Identity,
            Coordinates::Affine { x, y } => Coordinates::Affine {
                x: x.clone(),
                y: reduce(&-y, self.curve.modulus()),
            },
        };
        Self::new_unchecked(self.curve, coords)
    }

    /// Group addition that reports operands from different curves instead
    /// of panicking.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, EccError> {
        if !self.curve.is_same(rhs.curve) {
            return Err(EccError::CurveMismatch);
        }

        let (x0, y0, x1, y1) = match (&self.coords, &rhs.coords) {
            (Coordinates::Identity, _) => return Ok(rhs.clone()),
            (_, Coordinates::Identity) => return Ok(self.clone()),
            (Coordinates::Affine { x: x0, y: y0 }, Coordinates::Affine { x: x1, y: y1 }) => {
                (x0, y0, x1, y1)
            }
        };

        let form = self.curve.form();
        let modulus = self.curve.modulus();
        // NOTE the order matters: neither formula is defined for equal x
        let coords = if x0 == x1 && y0 == y1 {
            form.double(x0, y0, modulus)?
        } else if x0 == x1 && &reduce(&-y1, modulus) == y0 {
            form.identity()
        } else {
            form.add((x0, y0), (x1, y1), modulus)?
        };

        Ok(Self::new_unchecked(self.curve, coords))
    }

    /// # Panics
    ///
    /// If the points belong to different curves.
    pub fn add(&self, rhs: &Self) -> Self {
        match self.checked_add(rhs) {
            Ok(sum) => sum,
            Err(err) => panic!("point addition failed: {}", err),
        }
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Computes `scalar * self` with left-to-right double-and-add. Negative
    /// scalars multiply the negated point.
    pub fn scalar_mul(&self, scalar: &BigInt) -> Self {
        let base = self.signed_base(scalar);
        let magnitude = scalar.magnitude();

        let mut q = self.curve.identity();
        for i in (0..magnitude.bits()).rev() {
            q = q.double();
            if magnitude.bit(i) {
                q = q.add(&base);
            }
        }
        q
    }

    /// Computes `this_scalar * self + other_scalar * other_point` over a
    /// single chain of doublings.
    ///
    /// # Panics
    ///
    /// If `other_point` belongs to a different curve.
    pub fn double_mul(
        &self,
        this_scalar: &BigInt,
        other_point: &Self,
        other_scalar: &BigInt,
    ) -> Self {
        let this_base = self.signed_base(this_scalar);
        let other_base = other_point.signed_base(other_scalar);
        let sum_base = this_base.add(&other_base);
        let this_magnitude = this_scalar.magnitude();
        let other_magnitude = other_scalar.magnitude();

        let bits = this_magnitude.bits().max(other_magnitude.bits());
        let mut q = self.curve.identity();
        for i in (0..bits).rev() {
            q = q.double();
            match (bit(this_magnitude, i), bit(other_magnitude, i)) {
                (true, true) => q = q.add(&sum_base),
                (true, false) => q = q.add(&this_base),
                (false, true) => q = q.add(&other_base),
                (false, false) => {}
            }
        }
        q
    }

    fn signed_base(&self, scalar: &BigInt) -> Self {
        if scalar.sign() == Sign::Minus {
            self.negate()
        } else {
            self.clone()
        }
    }
}

#[inline(always)]
fn bit(number: &BigUint, index: u64) -> bool {
    index < number.bits() && number.bit(index)
}

impl<'c, F: CurveForm> fmt::Display for Point<'c, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coords {
            Coordinates::Identity => write!(f, "identity"),
            Coordinates::Affine { x, y } => write!(f, "({}, {})", x, y),
        }
    }
}

impl<'c, F: CurveForm> std::ops::Neg for Point<'c, F> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<'a, 'c, F: CurveForm> std::ops::Neg for &'a Point<'c, F> {
    type Output = Point<'c, F>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<'c, F: CurveForm> std::ops::Add for Point<'c, F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Point::add(&self, &rhs)
    }
}

impl<'a, 'b, 'c, F: CurveForm> std::ops::Add<&'b Point<'c, F>> for &'a Point<'c, F> {
    type Output = Point<'c, F>;
    fn add(self, rhs: &'b Point<'c, F>) -> Self::Output {
        Point::add(self, rhs)
    }
}

impl<'b, 'c, F: CurveForm> std::ops::AddAssign<&'b Point<'c, F>> for Point<'c, F> {
    fn add_assign(&mut self, rhs: &'b Point<'c, F>) {
        *self = Point::add(self, rhs)
    }
}

impl<'c, F: CurveForm> std::ops::Sub for Point<'c, F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Point::add(&self, &rhs.negate())
    }
}

impl<'a, 'b, 'c, F: CurveForm> std::ops::Sub<&'b Point<'c, F>> for &'a Point<'c, F> {
    type Output = Point<'c, F>;
    fn sub(self, rhs: &'b Point<'c, F>) -> Self::Output {
        Point::add(self, &rhs.negate())
    }
}

impl<'b, 'c, F: CurveForm> std::ops::Mul<&'b BigInt> for Point<'c, F> {
    type Output = Self;
    fn mul(self, rhs: &'b BigInt) -> Self::Output {
        self.scalar_mul(rhs)
    }
}

impl<'a, 'b, 'c, F: CurveForm> std::ops::Mul<&'b BigInt> for &'a Point<'c, F> {
    type Output = Point<'c, F>;
    fn mul(self, rhs: &'b BigInt) -> Self::Output {
        self.scalar_mul(rhs)
    }
}
