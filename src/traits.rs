pub trait Eval<T: ?Sized> {
    type Output;

    fn eval(&self, pt: &T) -> Self::Output;
}

pub trait WithVars<'a, V> {
    type Output;

    fn with_vars(&'a self, vars: V) -> Self::Output;
}
