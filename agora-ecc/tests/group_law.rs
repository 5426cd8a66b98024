use agora_ecc::parse::CurveParams;
use agora_ecc::{BigInt, Curve, EccError, Point, Weierstrass};

use rand::rngs::StdRng;
use rand::SeedableRng;

const SECP256K1: &str = r#"{
    "a": "0",
    "b": "7",
    "modulus": "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    "generatorX": "0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    "generatorY": "0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    "subgroupOrder": "0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    "curveOrder": "0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
}"#;

fn int(value: i64) -> BigInt {
    BigInt::from(value)
}

fn hex(value: &str) -> BigInt {
    BigInt::parse_bytes(value.as_bytes(), 16).unwrap()
}

fn toy_curve() -> Curve<Weierstrass> {
    Curve::weierstrass(int(2), int(2), int(17), (int(5), int(1)), int(19), int(19)).unwrap()
}

fn secp256k1() -> Curve<Weierstrass> {
    let params: CurveParams = serde_json::from_str(SECP256K1).unwrap();
    Curve::try_from(params).unwrap()
}

fn all_points(curve: &Curve<Weierstrass>) -> Vec<Point<'_, Weierstrass>> {
    let g = curve.generator();
    (0..19).map(|k| g.scalar_mul(&int(k))).collect()
}

#[test]
fn toy_curve_scenario() {
    let curve = toy_curve();
    let g = curve.point(int(5), int(1)).unwrap();
    assert_eq!(g.double(), curve.point(int(6), int(3)).unwrap());
    assert_eq!(g.scalar_mul(&int(19)), curve.identity());
}

#[test]
fn identity_and_inverses() {
    let curve = toy_curve();
    let id = curve.identity();
    for p in all_points(&curve) {
        assert_eq!(p.add(&id), p);
        assert_eq!(id.add(&p), p);
        assert_eq!(p.add(&p.negate()), id);
    }
}

#[test]
fn doubling_matches_addition() {
    let curve = toy_curve();
    for p in all_points(&curve) {
        assert_eq!(p.double(), p.add(&p));
    }
}

#[test]
fn toy_curve_associativity() {
    let curve = toy_curve();
    let points = all_points(&curve);
    for p in &points {
        for q in &points {
            assert_eq!(p + q, q + p);
            for r in &points {
                assert_eq!(&(p + q) + r, p + &(q + r));
            }
        }
    }
}

#[test]
fn scalar_mul_matches_repeated_addition() {
    let curve = toy_curve();
    let g = curve.generator().double();
    let mut sum = curve.identity();
    for k in 0..60 {
        assert_eq!(g.scalar_mul(&int(k)), sum);
        assert_eq!(&g * &int(-k), sum.negate());
        sum += &g;
    }
}

#[test]
fn rejects_points_off_curve() {
    let curve = toy_curve();
    for x in 0..17 {
        for y in 0..17 {
            let on_curve = all_points(&curve)
                .iter()
                .any(|p| p.x() == Some(&int(x)) && p.y() == Some(&int(y)));
            match curve.point(int(x), int(y)) {
                Ok(point) => {
                    assert!(on_curve);
                    assert!(point.scalar_mul(&int(19)).is_identity());
                }
                Err(err) => {
                    assert!(!on_curve);
                    assert_eq!(
                        err,
                        EccError::PointNotOnCurve {
                            x: int(x),
                            y: int(y)
                        }
                    );
                }
            }
        }
    }
}

#[test]
fn mismatched_generator_order() {
    let result = Curve::weierstrass(int(2), int(2), int(17), (int(5), int(1)), int(1), int(19));
    assert_eq!(
        result,
        Err(EccError::InvalidGenerator {
            subgroup_order: int(1)
        })
    );
}

#[test]
fn secp256k1_doubling() {
    let curve = secp256k1();
    let g = curve.generator();
    let expected = curve
        .point(
            hex("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
            hex("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
        )
        .unwrap();
    assert_eq!(g.double(), expected);
    assert_eq!(&g * &int(2), expected);
}

#[test]
fn secp256k1_group_order() {
    let curve = secp256k1();
    let g = curve.generator();
    let n = curve.subgroup_order().clone();
    assert!(g.scalar_mul(&n).is_identity());
    assert_eq!(g.scalar_mul(&(&n - 1)), g.negate());
    assert_eq!(g.scalar_mul(&(&n + 5)), g.scalar_mul(&int(5)));
    assert_eq!(curve.cofactor(), int(1));
}

#[test]
fn secp256k1_sampled_group_law() {
    let curve = secp256k1();
    let g = curve.generator();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..4 {
        let a = curve.random_scalar(&mut rng);
        let b = curve.random_scalar(&mut rng);
        let c = curve.random_scalar(&mut rng);
        let p = g.scalar_mul(&a);
        let q = g.scalar_mul(&b);
        let r = g.scalar_mul(&c);

        assert_eq!(&(&p + &q) + &r, &p + &(&q + &r));
        assert_eq!(&p + &q, g.scalar_mul(&(&a + &b)));
        assert_eq!(p.double(), g.scalar_mul(&(&a * 2)));
        assert_eq!(g.double_mul(&a, &q, &c), &p + &q.scalar_mul(&c));

        let lifted = curve.point_from_x(p.x().unwrap()).unwrap();
        assert!(lifted == p || lifted == p.negate());
    }
}

#[test]
fn concurrent_use_of_one_curve() {
    let curve = toy_curve();
    std::thread::scope(|scope| {
        let handles = (1..8)
            .map(|k| {
                let curve = &curve;
                scope.spawn(move || curve.generator().scalar_mul(&int(k)).double())
            })
            .collect::<Vec<_>>();
        for (k, handle) in (1..8).zip(handles) {
            assert_eq!(handle.join().unwrap(), curve.generator().scalar_mul(&int(2 * k)));
        }
    });
}
