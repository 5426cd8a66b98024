use crate::arithmetic::{is_probable_prime, reduce};
use crate::point::{Coordinates, Point};
use crate::EccError;

use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Signed};
use rand_core::{CryptoRng, RngCore};

use std::fmt;

/// Group law of a particular curve equation over GF(p).
///
/// Implementors only see affine operands that are already classified by
/// [`Point`]: `add` is called with distinct x coordinates and `double` with
/// a non-identity point. Returned coordinates must be reduced mod `modulus`.
pub trait CurveForm: Clone + fmt::Debug + PartialEq + Eq + Send + Sync {
    /// Checks the equation coefficients against the field, e.g. that the
    /// curve is non-singular.
    fn validate(&self, modulus: &BigInt) -> Result<(), EccError>;

    /// Returns the same form with its coefficients reduced mod `modulus`.
    fn reduce(&self, modulus: &BigInt) -> Self;

    fn contains(&self, x: &BigInt, y: &BigInt, modulus: &BigInt) -> bool;

    fn add(
        &self,
        lhs: (&BigInt, &BigInt),
        rhs: (&BigInt, &BigInt),
        modulus: &BigInt,
    ) -> Result<Coordinates, EccError>;

    fn double(&self, x: &BigInt, y: &BigInt, modulus: &BigInt) -> Result<Coordinates, EccError>;

    fn identity(&self) -> Coordinates {
        Coordinates::Identity
    }
}

/// An elliptic curve over GF(p) together with a generator of a cyclic
/// subgroup.
///
/// All parameters are fixed at construction. Points borrow the curve they
/// were created on, so a `Curve` must outlive its points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve<F: CurveForm> {
    form: F,
    modulus: BigInt,
    generator: (BigInt, BigInt),
    subgroup_order: BigInt,
    order: BigInt,
}

impl<F: CurveForm> Curve<F> {
    /// Builds a curve and checks that `generator` lies on it and has order
    /// `subgroup_order`.
    pub fn new(
        form: F,
        modulus: BigInt,
        generator: (BigInt, BigInt),
        subgroup_order: BigInt,
        order: BigInt,
    ) -> Result<Self, EccError> {
        match Self::validated(form, modulus, generator, subgroup_order, order) {
            Ok(curve) => {
                tracing::debug!(
                    modulus = %curve.modulus,
                    subgroup_order = %curve.subgroup_order,
                    order = %curve.order,
                    "curve parameters accepted"
                );
                Ok(curve)
            }
            Err(err) => {
                tracing::warn!(error = %err, "curve parameters rejected");
                Err(err)
            }
        }
    }

    fn validated(
        form: F,
        modulus: BigInt,
        generator: (BigInt, BigInt),
        subgroup_order: BigInt,
        order: BigInt,
    ) -> Result<Self, EccError> {
        if modulus == BigInt::from(2u32) || !is_probable_prime(&modulus) {
            return Err(EccError::InvalidParameter(format!(
                "modulus {} is not an odd prime",
                modulus
            )));
        }
        form.validate(&modulus)?;
        let form = form.reduce(&modulus);

        if !subgroup_order.is_positive() || !order.is_positive() {
            return Err(EccError::InvalidParameter(
                "group orders must be positive".to_string(),
            ));
        }

        let generator = (reduce(&generator.0, &modulus), reduce(&generator.1, &modulus));
        let curve = Self {
            form,
            modulus,
            generator,
            subgroup_order,
            order,
        };

        {
            let (x, y) = curve.generator.clone();
            let generator = curve.point(x, y)?;
            // the order of a subgroup divides the order of the group
            if !generator.scalar_mul(&curve.subgroup_order).is_identity()
                || !curve.order.is_multiple_of(&curve.subgroup_order)
            {
                return Err(EccError::InvalidGenerator {
                    subgroup_order: curve.subgroup_order.clone(),
                });
            }
        }

        Ok(curve)
    }

    /// Returns the point `(x, y)` after checking that it satisfies the curve
    /// equation. Coordinates are reduced mod p first.
    pub fn point(&self, x: BigInt, y: BigInt) -> Result<Point<'_, F>, EccError> {
        let x = reduce(&x, &self.modulus);
        let y = reduce(&y, &self.modulus);
        if !self.form.contains(&x, &y, &self.modulus) {
            return Err(EccError::PointNotOnCurve { x, y });
        }
        Ok(Point::new_unchecked(self, Coordinates::Affine { x, y }))
    }

    pub fn identity(&self) -> Point<'_, F> {
        Point::new_unchecked(self, self.form.identity())
    }

    pub fn generator(&self) -> Point<'_, F> {
        let (x, y) = self.generator.clone();
        Point::new_unchecked(self, Coordinates::Affine { x, y })
    }

    pub fn generator_coordinates(&self) -> (&BigInt, &BigInt) {
        (&self.generator.0, &self.generator.1)
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Order of the generator.
    pub fn subgroup_order(&self) -> &BigInt {
        &self.subgroup_order
    }

    /// Number of points on the curve, identity included.
    pub fn order(&self) -> &BigInt {
        &self.order
    }

    pub fn cofactor(&self) -> BigInt {
        &self.order / &self.subgroup_order
    }

    /// Samples a scalar uniformly from `[1, subgroup_order)`.
    pub fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigInt {
        // NOTE subgroup_order > 1 because the generator is never the identity
        rng.gen_bigint_range(&BigInt::one(), &self.subgroup_order)
    }

    /// Returns `k * G` for a scalar drawn by [`Curve::random_scalar`].
    pub fn random_point<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Point<'_, F> {
        let scalar = self.random_scalar(rng);
        self.generator().scalar_mul(&scalar)
    }

    pub(crate) fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self == other
    }
}

impl<F: CurveForm> fmt::Display for Curve<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} over GF({}), generator ({}, {}) of order {}",
            self.form, self.modulus, self.generator.0, self.generator.1, self.subgroup_order
        )
    }
}
