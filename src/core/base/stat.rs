use std::fmt;

/// StatNode holds real-time statistics for resources.
/// The sliding windows behind it live outside of this crate,
/// the admission check only reads the two values below.
pub trait StatNode: fmt::Debug + Send + Sync {
    /// The number of in-flight requests of the resource.
    fn current_concurrency(&self) -> u32;
    /// Requests passed in the current second.
    fn pass_qps(&self) -> f64;
}

// expose the moudle in crate for possible testing usage
#[cfg(test)]
pub(crate) use test::*;
