use num_traits::{One, Pow, Zero};

use crate::traits::Eval;

use super::nested::Poly;

impl Poly {
    /// Total degree, -1 for the zero polynomial
    pub fn degree(&self) -> i64 {
        if self.is_zero() {
            return -1;
        }
        self.monos()
            .iter()
            .map(|m| i64::from(m.exp()) + m.poly().degree())
            .max()
            .unwrap_or(0)
    }

    /// Degree in the variable `x_var`, -1 for the zero polynomial
    pub fn degree_by(&self, var: u64) -> i64 {
        if self.is_zero() {
            return -1;
        }
        if var == 0 {
            return self.monos().last().map_or(0, |m| i64::from(m.exp()));
        }
        self.monos()
            .iter()
            .map(|m| m.poly().degree_by(var - 1))
            .max()
            .unwrap_or(0)
    }

    pub fn powu(&self, n: u32) -> Self {
        let mut res = Self::one();
        let mut base = self.clone();
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                res *= &base;
            }
            n >>= 1;
            if n > 0 {
                base = &base * &base;
            }
        }
        res
    }

    /// Substitute `x` for the variable `x_0`
    ///
    /// The result is a polynomial in the remaining variables, so `x_1`
    /// of `self` becomes `x_0` of the result.
    pub fn at(&self, x: i64) -> Self {
        if self.is_coeff() {
            return self.clone();
        }
        self.monos().iter().fold(Self::zero(), |acc, m| {
            acc + m.poly() * &Self::from_coeff(x.wrapping_pow(m.exp()))
        })
    }
}

impl Pow<u32> for &Poly {
    type Output = Poly;

    fn pow(self, n: u32) -> Self::Output {
        self.powu(n)
    }
}

impl Pow<u32> for Poly {
    type Output = Poly;

    fn pow(self, n: u32) -> Self::Output {
        self.powu(n)
    }
}

impl Eval<i64> for Poly {
    type Output = Poly;

    fn eval(&self, x: &i64) -> Self::Output {
        self.at(*x)
    }
}

/// Numerical value with `x_i = pt[i]`
///
/// Variables without a given value are set to zero.
impl Eval<[i64]> for Poly {
    type Output = i64;

    fn eval(&self, pt: &[i64]) -> Self::Output {
        let mut res = match pt.split_first() {
            Some((x, rest)) => rest.iter().fold(self.at(*x), |p, x| p.at(*x)),
            None => self.clone(),
        };
        loop {
            if let Some(c) = res.as_coeff() {
                return c;
            }
            res = res.at(0);
        }
    }
}

impl<const N: usize> Eval<[i64; N]> for Poly {
    type Output = i64;

    fn eval(&self, pt: &[i64; N]) -> Self::Output {
        self.eval(pt.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_xoshiro::rand_core::SeedableRng;

    use super::*;
    use crate::{
        _test_util::gen_poly,
        algebra::poly::nested::tests::{is_canonical, log_init},
    };

    fn c(c: i64) -> Poly {
        Poly::from_coeff(c)
    }

    #[test]
    fn degrees() {
        log_init();

        assert_eq!(c(0).degree(), -1);
        assert_eq!(c(7).degree(), 0);
        assert_eq!(c(-7).degree(), 0);
        for var in [0, 1, 5, u64::MAX] {
            assert_eq!(c(0).degree_by(var), -1);
            assert_eq!(c(3).degree_by(var), 0);
        }

        let x = Poly::var(0);
        let y = Poly::var(1);
        // x^3 + x*y^2 + 5
        let p = x.powu(3) + &x * &y.powu(2) + c(5);
        assert_eq!(p.degree(), 3);
        assert_eq!(p.degree_by(0), 3);
        assert_eq!(p.degree_by(1), 2);
        assert_eq!(p.degree_by(2), 0);

        // x*y^4
        let p = &x * &y.powu(4);
        assert_eq!(p.degree(), 5);
        assert_eq!(p.degree_by(0), 1);
        assert_eq!(p.degree_by(1), 4);

        let p: Poly = "((1,0)+(1,1),0)".parse().unwrap();
        assert_eq!(p.degree_by(1), 1);
        assert_eq!(p.degree_by(0), 0);
        assert_eq!(p.degree(), 1);
    }

    #[test]
    fn powers() {
        log_init();

        let one_plus_x = c(1) + Poly::var(0);
        assert_eq!(one_plus_x.powu(0), c(1));
        assert_eq!(Poly::zero().powu(0), c(1));
        assert_eq!(Poly::zero().powu(3), c(0));
        assert_eq!(one_plus_x.powu(1), one_plus_x);
        assert_eq!(
            one_plus_x.powu(3).to_string(),
            "(1,0)+(3,1)+(3,2)+(1,3)"
        );
        assert_eq!((&one_plus_x).pow(4), one_plus_x.powu(2).powu(2));
        assert_eq!(c(3).powu(4), c(81));
    }

    #[test]
    fn eval_at_point() {
        log_init();

        let p: Poly = "(1,0)+(1,1)".parse().unwrap();
        assert_eq!(p.at(3), c(4));
        assert_eq!(p.eval(&-1), c(0));
        assert_eq!(c(9).at(100), c(9));

        // (1 + x1) * x0^2 at x0 = 2 is 4 + 4*x0
        let p: Poly = "((1,0)+(1,1),2)".parse().unwrap();
        let res = p.at(2);
        assert_eq!(res.to_string(), "(4,0)+(4,1)");
        assert!(is_canonical(&res));

        // wrapping exponentiation
        let p: Poly = "(1,64)".parse().unwrap();
        assert_eq!(p.at(2), c(0));
    }

    #[test]
    fn eval_numerical() {
        log_init();

        let x = Poly::var(0);
        let y = Poly::var(1);
        let z = Poly::var(2);
        // x^2*y + 3*z - 1
        let p = &x.powu(2) * &y + c(3) * z - c(1);
        assert_eq!(p.eval(&[2, 5, 7]), 20 + 21 - 1);
        assert_eq!(p.eval(&[2, 5]), 20 - 1);
        assert_eq!(p.eval(&[] as &[i64; 0]), -1);
    }

    #[test]
    fn eval_homomorphism() {
        log_init();

        const NTESTS: u32 = 200;
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(3);
        for _ in 0..NTESTS {
            let p = gen_poly(3, 3, 4, 10, &mut rng);
            let q = gen_poly(3, 3, 4, 10, &mut rng);
            let pt: [i64; 3] = rng.gen::<[i8; 3]>().map(i64::from);
            let p_val = p.eval(&pt);
            let q_val = q.eval(&pt);
            assert_eq!((p.clone() + q.clone()).eval(&pt), p_val.wrapping_add(q_val));
            assert_eq!((&p * &q).eval(&pt), p_val.wrapping_mul(q_val));
            assert_eq!((-p.clone()).eval(&pt), p_val.wrapping_neg());
            assert!(is_canonical(&p.at(pt[0])));
        }
    }
}
