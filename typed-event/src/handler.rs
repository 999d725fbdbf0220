//! Callback shapes
//!
//! An [`Event`](crate::Event) is parameterized by an unsized function type such
//! as `dyn Fn(&str, u32, bool)`. The traits here connect that shape to the
//! argument tuple handed to `dispatch`, so a mismatch between the two is a
//! compile error rather than a runtime check.
//!
//! - [`Handler`] calls a function with its arguments packed in a tuple.
//! - [`Outcome`] turns whatever the function returns into a `Result`, which is
//!   what lets dispatch stop at the first failing subscriber.

use std::convert::Infallible;

/// A callable that can be invoked with its arguments packed into a tuple.
///
/// Implemented for every `Fn` with up to eight parameters, including unsized
/// trait objects like `dyn Fn(&str)`.
pub trait Handler<Args> {
    /// What the callable returns
    type Output;

    /// Call the function with the unpacked arguments
    fn invoke(&self, args: Args) -> Self::Output;
}

/// The return value of a subscriber, viewed as success or failure.
pub trait Outcome {
    /// Error produced by a failing subscriber
    type Error;

    fn into_result(self) -> Result<(), Self::Error>;
}

/// Subscribers returning `()` never fail.
impl Outcome for () {
    type Error = Infallible;

    fn into_result(self) -> Result<(), Infallible> {
        Ok(())
    }
}

impl<E> Outcome for Result<(), E> {
    type Error = E;

    fn into_result(self) -> Result<(), E> {
        self
    }
}

/// Error type produced when dispatching arguments `Args` to callbacks of shape `C`
pub type DispatchError<C, Args> = <<C as Handler<Args>>::Output as Outcome>::Error;

macro_rules! impl_handler {
    ($($arg:ident),*) => {
        impl<F, R, $($arg,)*> Handler<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R + ?Sized,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> R {
                self($($arg),*)
            }
        }
    };
}

impl_handler!();
impl_handler!(A1);
impl_handler!(A1, A2);
impl_handler!(A1, A2, A3);
impl_handler!(A1, A2, A3, A4);
impl_handler!(A1, A2, A3, A4, A5);
impl_handler!(A1, A2, A3, A4, A5, A6);
impl_handler!(A1, A2, A3, A4, A5, A6, A7);
impl_handler!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;

    fn add(a: u32, b: u32) -> u32 {
        a + b
    }

    #[test]
    fn test_invoke_unpacks_tuple() {
        assert_eq!(add.invoke((2, 3)), 5);

        let greet: &dyn Fn(&str) -> String = &|name: &str| format!("hi {}", name);
        assert_eq!(greet.invoke(("Bob",)), "hi Bob");

        let nullary = || 7;
        assert_eq!(nullary.invoke(()), 7);
    }

    #[test]
    fn test_outcome_conversions() {
        assert_eq!(().into_result(), Ok::<(), Infallible>(()));

        let failed: Result<(), &str> = Err("boom");
        assert_eq!(failed.into_result(), Err("boom"));
    }
}
