use rand::Rng;

use crate::algebra::poly::{Mono, Poly};

// generate a random canonical polynomial in the variables x_0, ..., x_{depth - 1}
// each sum has at most `max_terms` monomials with exponents up to `max_exp`,
// constants are drawn uniformly from `-max_coeff..=max_coeff`
pub fn gen_poly(
    depth: u32,
    max_terms: usize,
    max_exp: u32,
    max_coeff: i64,
    mut rng: impl Rng,
) -> Poly {
    gen_poly_rec(depth, max_terms, max_exp, max_coeff, &mut rng)
}

fn gen_poly_rec<R: Rng>(
    depth: u32,
    max_terms: usize,
    max_exp: u32,
    max_coeff: i64,
    rng: &mut R,
) -> Poly {
    if depth == 0 {
        return Poly::from_coeff(rng.gen_range(-max_coeff..=max_coeff));
    }
    let nterms = rng.gen_range(0..=max_terms);
    let monos = (0..nterms)
        .map(|_| {
            let coeff = gen_poly_rec(depth - 1, max_terms, max_exp, max_coeff, rng);
            Mono::new(coeff, rng.gen_range(0..=max_exp))
        })
        .collect();
    Poly::from_monos(monos)
}
