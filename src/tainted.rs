use std::fmt;

/// A wrapper for raw request input that has not been validated yet.
///
/// `Tainted<T>` marks values that crossed the request boundary (query
/// strings, form fields, programmatic callers) and keeps them away from
/// handler code until they have been coerced and checked against a
/// [`ParamSpec`](crate::ParamSpec). The only way to get a usable value out
/// is through validation, which yields [`ValidParams`](crate::ValidParams).
///
/// # Examples
///
/// ```
/// use param_guard::{RawValue, Tainted};
///
/// let page = Tainted::new(RawValue::from("3"));
///
/// // Debug output shows it's tainted
/// assert!(format!("{:?}", page).contains("Tainted"));
///
/// // But the value cannot be used directly:
/// // let n: RawValue = page.inner; // Won't compile!
/// ```
#[derive(Clone, PartialEq)]
pub struct Tainted<T> {
    // Private: the coercion step is the only reader.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value in `Tainted`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Borrows the raw value for presence checks.
    pub(crate) fn peek(&self) -> &T {
        &self.inner
    }

    /// Extracts the inner value for coercion.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

// No Deref, AsRef, Borrow or Into<T>: those would let raw input skip validation.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
