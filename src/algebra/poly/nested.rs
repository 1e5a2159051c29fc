use std::{
    fmt::{self, Display},
    mem,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use itertools::{EitherOrBoth, Itertools};
use num_traits::{One, Zero};

use crate::traits::WithVars;

/// Sparse multivariate polynomial in recursive representation
///
/// A polynomial at nesting depth `d` is either a constant or a sum of
/// monomials `c * x_d^e`, where each coefficient `c` is a polynomial at
/// depth `d + 1`. The depth itself is never stored.
///
/// Values are always in canonical form:
/// - exponents in a sum are strictly increasing,
/// - no monomial has a zero coefficient,
/// - a sum is never a single monomial `c * x_d^0` with constant `c`.
///
/// As a consequence, two polynomials compare equal iff they are
/// mathematically equal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Poly {
    repr: Repr,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
enum Repr {
    Coeff(i64),
    Sum(Vec<Mono>),
}

impl Poly {
    pub const fn from_coeff(coeff: i64) -> Self {
        Self {
            repr: Repr::Coeff(coeff),
        }
    }

    /// Build a polynomial from monomials in arbitrary order
    ///
    /// Monomials with equal exponents are added up and vanishing
    /// monomials are dropped.
    pub fn from_monos(mut monos: Vec<Mono>) -> Self {
        monos.sort_by_key(|m| m.exp);
        let mut res: Vec<Mono> = Vec::with_capacity(monos.len());
        for m in monos {
            match res.last_mut() {
                Some(last) if last.exp == m.exp => {
                    let acc = mem::take(&mut last.poly);
                    last.poly = acc + m.poly;
                }
                _ => res.push(m),
            }
        }
        res.retain(|m| !m.poly.is_zero());
        Self::from_sorted_monos(res)
    }

    // `monos` must have strictly increasing exponents and nonzero coefficients
    fn from_sorted_monos(mut monos: Vec<Mono>) -> Self {
        debug_assert!(monos.windows(2).all(|w| w[0].exp < w[1].exp));
        debug_assert!(!monos.iter().any(|m| m.poly.is_zero()));
        if monos.is_empty() {
            return Self::zero();
        }
        if monos.len() == 1 && monos[0].exp == 0 && monos[0].poly.is_coeff() {
            return mem::take(&mut monos[0].poly);
        }
        Self {
            repr: Repr::Sum(monos),
        }
    }

    /// The variable `x_idx`, seen from depth 0
    pub fn var(idx: usize) -> Self {
        let x = Self {
            repr: Repr::Sum(vec![Mono::new(Self::one(), 1)]),
        };
        (0..idx).fold(x, |p, _| Self {
            repr: Repr::Sum(vec![Mono::new(p, 0)]),
        })
    }

    pub fn is_coeff(&self) -> bool {
        matches!(self.repr, Repr::Coeff(_))
    }

    pub fn as_coeff(&self) -> Option<i64> {
        match self.repr {
            Repr::Coeff(c) => Some(c),
            Repr::Sum(_) => None,
        }
    }

    /// The monomials in order of increasing exponent
    ///
    /// Empty for constants.
    pub fn monos(&self) -> &[Mono] {
        match &self.repr {
            Repr::Coeff(_) => &[],
            Repr::Sum(monos) => monos,
        }
    }

    /// Number of monomials, zero for constants
    pub fn nterms(&self) -> usize {
        self.monos().len()
    }

    /// Decompose into monomials
    ///
    /// A nonzero constant `c` becomes the single monomial `c * x^0`.
    pub fn into_monos(self) -> Vec<Mono> {
        match self.repr {
            Repr::Coeff(0) => Vec::new(),
            Repr::Coeff(c) => vec![Mono::new(Self::from_coeff(c), 0)],
            Repr::Sum(monos) => monos,
        }
    }
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Poly {
    fn from(coeff: i64) -> Self {
        Self::from_coeff(coeff)
    }
}

impl From<Mono> for Poly {
    fn from(source: Mono) -> Self {
        Self::from_monos(vec![source])
    }
}

impl Zero for Poly {
    fn zero() -> Self {
        Self::from_coeff(0)
    }

    fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Coeff(0))
    }
}

impl One for Poly {
    fn one() -> Self {
        Self::from_coeff(1)
    }

    fn is_one(&self) -> bool {
        matches!(self.repr, Repr::Coeff(1))
    }
}

impl Add for Poly {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        if let (Repr::Coeff(a), Repr::Coeff(b)) = (&self.repr, &rhs.repr) {
            return Self::from_coeff(a.wrapping_add(*b));
        }
        let terms = self
            .into_monos()
            .into_iter()
            .merge_join_by(rhs.into_monos(), |a, b| a.exp.cmp(&b.exp))
            .filter_map(|t| match t {
                EitherOrBoth::Left(m) | EitherOrBoth::Right(m) => Some(m),
                EitherOrBoth::Both(lhs, rhs) => {
                    let coeff = lhs.poly + rhs.poly;
                    (!coeff.is_zero()).then(|| Mono::new(coeff, lhs.exp))
                }
            })
            .collect();
        Self::from_sorted_monos(terms)
    }
}

impl AddAssign for Poly {
    fn add_assign(&mut self, rhs: Poly) {
        *self = mem::take(self) + rhs;
    }
}

impl Neg for Poly {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self * Self::from_coeff(-1)
    }
}

impl Sub for Poly {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.neg()
    }
}

impl SubAssign for Poly {
    fn sub_assign(&mut self, rhs: Poly) {
        *self = mem::take(self) - rhs;
    }
}

impl<'a, 'b> Mul<&'b Poly> for &'a Poly {
    type Output = Poly;

    fn mul(self, rhs: &'b Poly) -> Self::Output {
        match (&self.repr, &rhs.repr) {
            (Repr::Coeff(a), Repr::Coeff(b)) => Poly::from_coeff(a.wrapping_mul(*b)),
            (Repr::Coeff(_), Repr::Sum(monos)) => scale(monos, self),
            (Repr::Sum(monos), Repr::Coeff(_)) => scale(monos, rhs),
            (Repr::Sum(lhs), Repr::Sum(rhs)) => {
                let mut res = Vec::with_capacity(lhs.len() * rhs.len());
                for a in lhs {
                    for b in rhs {
                        res.push(Mono::new(
                            &a.poly * &b.poly,
                            a.exp.wrapping_add(b.exp),
                        ));
                    }
                }
                Poly::from_monos(res)
            }
        }
    }
}

// multiply each coefficient by a constant, no cross product needed
fn scale(monos: &[Mono], c: &Poly) -> Poly {
    if c.is_zero() {
        return Poly::zero();
    }
    let res = monos
        .iter()
        .map(|m| Mono::new(&m.poly * c, m.exp))
        .collect();
    // wrapping multiplication can produce zero coefficients
    Poly::from_monos(res)
}

impl Mul for Poly {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Mul<&Poly> for Poly {
    type Output = Self;

    fn mul(self, rhs: &Poly) -> Self::Output {
        &self * rhs
    }
}

impl Mul<Poly> for &Poly {
    type Output = Poly;

    fn mul(self, rhs: Poly) -> Self::Output {
        self * &rhs
    }
}

impl MulAssign for Poly {
    fn mul_assign(&mut self, rhs: Poly) {
        *self = &*self * &rhs;
    }
}

impl MulAssign<&Poly> for Poly {
    fn mul_assign(&mut self, rhs: &Poly) {
        *self = &*self * rhs;
    }
}

impl Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.repr {
            Repr::Coeff(c) => write!(f, "{c}"),
            Repr::Sum(monos) => write!(f, "{}", monos.iter().format("+")),
        }
    }
}

/// Monomial `poly * x^exp` in the variable of the enclosing depth
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Mono {
    exp: u32,
    poly: Poly,
}

impl Mono {
    pub fn new(poly: Poly, exp: u32) -> Self {
        Self { exp, poly }
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn poly(&self) -> &Poly {
        &self.poly
    }

    pub fn into_poly(self) -> Poly {
        self.poly
    }
}

impl Display for Mono {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.poly, self.exp)
    }
}

/// Human-readable formatting with named variables
///
/// Variables beyond the given names are written as `x<depth>`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FmtPoly<'a, 'b, V> {
    p: &'a Poly,
    vars: &'b [V],
    depth: usize,
}

impl<'a, 'b, V: Display> WithVars<'a, &'b [V]> for Poly {
    type Output = FmtPoly<'a, 'b, V>;

    fn with_vars(&'a self, vars: &'b [V]) -> Self::Output {
        FmtPoly {
            p: self,
            vars,
            depth: 0,
        }
    }
}

impl<'a, 'b, V: Display, const N: usize> WithVars<'a, &'b [V; N]> for Poly {
    type Output = FmtPoly<'a, 'b, V>;

    fn with_vars(&'a self, vars: &'b [V; N]) -> Self::Output {
        self.with_vars(vars.as_slice())
    }
}

impl<'a, 'b, V: Display> FmtPoly<'a, 'b, V> {
    fn nested(&self, p: &'a Poly) -> Self {
        Self {
            p,
            vars: self.vars,
            depth: self.depth + 1,
        }
    }

    fn fmt_var(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.vars.get(self.depth) {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "x{}", self.depth),
        }
    }

    fn fmt_term(&self, m: &Mono, f: &mut fmt::Formatter) -> fmt::Result {
        let coeff = self.nested(&m.poly);
        if m.exp == 0 {
            return Display::fmt(&coeff, f);
        }
        match m.poly.repr {
            Repr::Coeff(1) => {}
            Repr::Coeff(-1) => write!(f, "-")?,
            _ if is_product(&m.poly) => write!(f, "{coeff}*")?,
            _ => write!(f, "({coeff})*")?,
        }
        self.fmt_var(f)?;
        if m.exp != 1 {
            write!(f, "^{}", m.exp)?;
        }
        Ok(())
    }
}

// whether the formatted polynomial needs no parentheses as a factor
fn is_product(p: &Poly) -> bool {
    match &p.repr {
        Repr::Coeff(_) => true,
        Repr::Sum(monos) => match monos.as_slice() {
            [m] => m.exp > 0 || is_product(&m.poly),
            _ => false,
        },
    }
}

impl<'a, 'b, V: Display> Display for FmtPoly<'a, 'b, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.p.repr {
            Repr::Coeff(c) => write!(f, "{c}"),
            Repr::Sum(monos) => {
                if let Some((first, rest)) = monos.split_first() {
                    self.fmt_term(first, f)?;
                    for term in rest {
                        write!(f, " + ")?;
                        self.fmt_term(term, f)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand_xoshiro::rand_core::SeedableRng;

    use super::*;
    use crate::_test_util::gen_poly;

    pub(crate) fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    pub(crate) fn is_canonical(p: &Poly) -> bool {
        match &p.repr {
            Repr::Coeff(_) => true,
            Repr::Sum(monos) => {
                !monos.is_empty()
                    && monos.windows(2).all(|w| w[0].exp < w[1].exp)
                    && monos
                        .iter()
                        .all(|m| !m.poly.is_zero() && is_canonical(&m.poly))
                    && !(monos.len() == 1
                        && monos[0].exp == 0
                        && monos[0].poly.is_coeff())
            }
        }
    }

    fn c(c: i64) -> Poly {
        Poly::from_coeff(c)
    }

    fn mono(poly: Poly, exp: u32) -> Mono {
        Mono::new(poly, exp)
    }

    #[test]
    fn canonical_construction() {
        log_init();

        assert_eq!(Poly::from_monos(vec![]), c(0));
        assert_eq!(Poly::from_monos(vec![mono(c(5), 0)]), c(5));
        assert_eq!(Poly::from_monos(vec![mono(c(0), 3)]), c(0));
        assert_eq!(
            Poly::from_monos(vec![mono(c(1), 2), mono(c(-1), 2)]),
            c(0)
        );
        // collapse only after the inner sum has cancelled
        let inner = Poly::from_monos(vec![mono(c(1), 0), mono(c(2), 1)]);
        let cancel = Poly::from_monos(vec![mono(c(-2), 1)]);
        let p = Poly::from_monos(vec![mono(inner, 0), mono(cancel, 0)]);
        assert_eq!(p, c(1));

        let p = Poly::from_monos(vec![
            mono(c(3), 4),
            mono(c(1), 0),
            mono(c(2), 4),
            mono(c(7), 1),
        ]);
        assert_eq!(p.monos().iter().map(Mono::exp).collect_vec(), [0, 1, 4]);
        assert_eq!(p.monos()[2].poly(), &c(5));
        assert!(is_canonical(&p));
    }

    #[test]
    fn variables() {
        log_init();

        assert_eq!(Poly::var(0).to_string(), "(1,1)");
        assert_eq!(Poly::var(1).to_string(), "((1,1),0)");
        assert_eq!(Poly::var(2).to_string(), "(((1,1),0),0)");
        assert!(is_canonical(&Poly::var(3)));
        assert_ne!(Poly::var(0), Poly::var(1));
    }

    #[test]
    fn simple_arithmetic() {
        log_init();

        let x = Poly::var(0);
        let one_plus_x = c(1) + x.clone();
        assert_eq!(one_plus_x.to_string(), "(1,0)+(1,1)");
        assert_eq!((one_plus_x.clone() + c(-1)).to_string(), "(1,1)");
        assert_eq!(
            (one_plus_x.clone() * one_plus_x.clone()).to_string(),
            "(1,0)+(2,1)+(1,2)"
        );
        assert_eq!(one_plus_x.clone() - x.clone(), c(1));
        assert_eq!((-one_plus_x.clone()).to_string(), "(-1,0)+(-1,1)");
        assert_eq!(one_plus_x.clone() * c(0), c(0));
        assert_eq!(c(3) * one_plus_x, Poly::from_monos(vec![mono(c(3), 0), mono(c(3), 1)]));
        assert_eq!(c(2) + c(3), c(5));
        assert_eq!(c(2) * c(3), c(6));

        let mut p = Poly::var(1);
        p += Poly::var(0);
        p -= Poly::var(1);
        assert_eq!(p, x);
        p *= &x;
        assert_eq!(p.to_string(), "(1,2)");
    }

    #[test]
    fn wrapping_coefficients() {
        log_init();

        assert_eq!(c(i64::MAX) + c(1), c(i64::MIN));
        assert_eq!(c(i64::MIN) * c(-1), c(i64::MIN));
        // 2^62 * 4 wraps to zero and the monomial disappears
        let p = Poly::var(0) * c(1 << 62) + c(1);
        assert_eq!(p * c(4), c(4));
    }

    #[test]
    fn ring_laws() {
        log_init();

        const NTESTS: u32 = 200;
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(1);
        for _ in 0..NTESTS {
            let p = gen_poly(3, 3, 4, 10, &mut rng);
            let q = gen_poly(3, 3, 4, 10, &mut rng);
            let r = gen_poly(3, 3, 4, 10, &mut rng);
            assert!(is_canonical(&p));

            let sum = p.clone() + q.clone();
            assert!(is_canonical(&sum));
            assert_eq!(sum, q.clone() + p.clone());
            assert_eq!(
                sum.clone() + r.clone(),
                p.clone() + (q.clone() + r.clone())
            );
            assert_eq!(p.clone() + Poly::zero(), p);
            assert_eq!(p.clone() + -p.clone(), Poly::zero());
            assert_eq!(p.clone() - p.clone(), Poly::zero());

            let prod = &p * &q;
            assert!(is_canonical(&prod));
            assert_eq!(prod, &q * &p);
            assert_eq!(&p * &Poly::one(), p);
            assert_eq!(
                &p * &(q.clone() + r.clone()),
                &p * &q + &p * &r
            );
            assert_eq!(&(&p * &q) * &r, &p * &(&q * &r));
        }
    }

    #[test]
    fn canonical_is_idempotent() {
        log_init();

        const NTESTS: u32 = 100;
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(2);
        for _ in 0..NTESTS {
            let p = gen_poly(3, 4, 5, 5, &mut rng);
            assert_eq!(p, p.clone());
            let rebuilt = Poly::from_monos(p.clone().into_monos());
            assert_eq!(rebuilt, p);
        }
    }

    #[test]
    fn fmt_with_vars() {
        log_init();

        let x = Poly::var(0);
        let y = Poly::var(1);
        let p = (c(1) + x.clone()) * (c(1) + x.clone());
        assert_eq!(p.with_vars(&["x"]).to_string(), "1 + 2*x + x^2");

        let p = c(1) + y.clone() * x.clone();
        assert_eq!(p.with_vars(&["x", "y"]).to_string(), "1 + y*x");

        let p = (c(1) + y.clone()) * x.clone() - x.clone() * x.clone();
        assert_eq!(p.with_vars(&["x", "y"]).to_string(), "(1 + y)*x + -x^2");

        let p = c(3) * y.clone() * y.clone() * x.clone();
        assert_eq!(p.with_vars(&["x", "y"]).to_string(), "3*y^2*x");

        // unnamed variables
        let z = Poly::var(2);
        assert_eq!(z.with_vars(&["x"]).to_string(), "x2");
        assert_eq!(Poly::zero().with_vars(&["x"]).to_string(), "0");
    }
}
