use log::trace;
use num_traits::Zero;

use super::nested::Poly;

impl Poly {
    /// Substitute `subs[i]` for each variable `x_i`
    ///
    /// Variables without a substitute are replaced by zero. The cost
    /// grows combinatorially with the depth of `self`.
    pub fn compose(&self, subs: &[Poly]) -> Poly {
        self.compose_at_depth(subs, 0)
    }

    fn compose_at_depth(&self, subs: &[Poly], depth: usize) -> Poly {
        if self.is_coeff() {
            return self.clone();
        }
        trace!("Composing {self} at depth {depth}");
        let zero = Poly::zero();
        let base = subs.get(depth).unwrap_or(&zero);
        self.monos().iter().fold(Poly::zero(), |acc, m| {
            let inner = m.poly().compose_at_depth(subs, depth + 1);
            acc + inner * base.powu(m.exp())
        })
    }
}
