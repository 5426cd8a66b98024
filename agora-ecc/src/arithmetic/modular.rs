use crate::EccError;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Miller-Rabin witnesses. Testing against all of them is exact for every
/// input below 3.3e24.
const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Reduces `value` into the canonical range `[0, modulus)`.
pub fn reduce(value: &BigInt, modulus: &BigInt) -> BigInt {
    value.mod_floor(modulus)
}

/// Returns the multiplicative inverse of `value` modulo `modulus`.
///
/// Fails with [`EccError::NoInverse`] when `value` and `modulus` are not
/// coprime, which for a prime modulus only happens for `value ≡ 0`.
pub fn invmod(value: &BigInt, modulus: &BigInt) -> Result<BigInt, EccError> {
    let reduced = reduce(value, modulus);
    let egcd = reduced.extended_gcd(modulus);
    if !egcd.gcd.is_one() {
        return Err(EccError::NoInverse {
            value: value.clone(),
            modulus: modulus.clone(),
        });
    }
    Ok(reduce(&egcd.x, modulus))
}

/// Returns a square root of `value` modulo the prime `modulus`.
///
/// Of the two roots `r` and `p - r` the smaller one is returned, so lifting
/// a point from its x coordinate is deterministic.
pub fn sqrtmod(value: &BigInt, modulus: &BigInt) -> Result<BigInt, EccError> {
    let a = reduce(value, modulus);
    if a.is_zero() || modulus == &BigInt::from(2u32) {
        return Ok(a);
    }

    let one = BigInt::one();
    let p_minus_one = modulus - &one;
    // Euler's criterion
    if a.modpow(&(&p_minus_one >> 1u32), modulus) != one {
        return Err(no_square_root(value, modulus));
    }

    let root = if modulus % 4u32 == BigInt::from(3u32) {
        a.modpow(&((modulus + &one) >> 2u32), modulus)
    } else {
        tonelli_shanks(&a, modulus).ok_or_else(|| no_square_root(value, modulus))?
    };

    let negated = modulus - &root;
    Ok(root.min(negated))
}

fn no_square_root(value: &BigInt, modulus: &BigInt) -> EccError {
    EccError::NoSquareRoot {
        value: value.clone(),
        modulus: modulus.clone(),
    }
}

/// Expects `a` to be a nonzero quadratic residue modulo the odd prime `p`.
fn tonelli_shanks(a: &BigInt, p: &BigInt) -> Option<BigInt> {
    let one = BigInt::one();
    let p_minus_one = p - &one;
    let s = p_minus_one.trailing_zeros()?;
    let q = &p_minus_one >> s;
    let legendre_exp = &p_minus_one >> 1u32;

    let mut z = BigInt::from(2u32);
    while z.modpow(&legendre_exp, p) != p_minus_one {
        z += 1u32;
        if &z >= p {
            return None;
        }
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) >> 1u32), p);

    while !t.is_one() {
        let mut i = 0;
        let mut t_pow = t.clone();
        while !t_pow.is_one() {
            t_pow = (&t_pow * &t_pow) % p;
            i += 1;
            if i == m {
                return None;
            }
        }

        let mut b = c.clone();
        for _ in 0..(m - i - 1) {
            b = (&b * &b) % p;
        }
        m = i;
        c = (&b * &b) % p;
        t = (&t * &c) % p;
        r = (&r * &b) % p;
    }

    Some(r)
}

/// Miller-Rabin test against the fixed [`WITNESSES`].
pub fn is_probable_prime(n: &BigInt) -> bool {
    let one = BigInt::one();
    let two = BigInt::from(2u32);
    if n < &two {
        return false;
    }
    for &small in WITNESSES.iter() {
        let small = BigInt::from(small);
        if n == &small {
            return true;
        }
        if (n % &small).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &witness in WITNESSES.iter() {
        let mut x = BigInt::from(witness).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
