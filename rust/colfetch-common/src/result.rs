use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with `InvalidArgument` naming the argument and the violated condition.
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Fails with a `Range` error unless `$index < $bound`.
#[macro_export]
macro_rules! verify_index {
    ($what:expr, $index:expr, $bound:expr) => {{
        $crate::result::verify_index($what, $index, $bound)?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_index(what: &str, index: usize, bound: usize) -> Result<()> {
    if index < bound {
        Ok(())
    } else {
        out_of_range(what, index, bound)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(Error::invalid_arg(name, condition))
}

#[cold]
pub fn out_of_range(what: &str, index: usize, bound: usize) -> Result<()> {
    Err(Error::out_of_range(what, index, bound))
}
