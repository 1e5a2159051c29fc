use crate::algebra::poly::Poly;

use super::CalcError;

/// Stack of polynomials
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PolyStack {
    polys: Vec<Poly>,
}

impl PolyStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.polys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    pub fn push(&mut self, p: Poly) {
        self.polys.push(p)
    }

    pub fn pop(&mut self) -> Result<Poly, CalcError> {
        self.polys.pop().ok_or(CalcError::StackUnderflow)
    }

    pub fn top(&self) -> Result<&Poly, CalcError> {
        self.polys.last().ok_or(CalcError::StackUnderflow)
    }

    /// The topmost and the second polynomial
    pub fn top_two(&self) -> Result<(&Poly, &Poly), CalcError> {
        match self.polys.as_slice() {
            [.., second, top] => Ok((top, second)),
            _ => Err(CalcError::StackUnderflow),
        }
    }

    /// Remove the topmost and the second polynomial
    ///
    /// The stack is left unchanged if it holds fewer than two polynomials.
    pub fn pop_two(&mut self) -> Result<(Poly, Poly), CalcError> {
        if self.len() < 2 {
            return Err(CalcError::StackUnderflow);
        }
        let top = self.pop()?;
        let second = self.pop()?;
        Ok((top, second))
    }

    /// Replace the top `p` and the `k` polynomials below it by
    /// `p(q_0, ..., q_{k-1})`, where `q_i` is `k - i` positions below `p`
    pub fn compose(&mut self, k: u64) -> Result<(), CalcError> {
        let nsubs = usize::try_from(k)
            .ok()
            .filter(|&k| k < self.len())
            .ok_or(CalcError::StackUnderflow)?;
        let p = self.pop()?;
        let subs = self.polys.split_off(self.len() - nsubs);
        self.push(p.compose(&subs));
        Ok(())
    }
}
