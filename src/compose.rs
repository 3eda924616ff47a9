//! Right-to-left function composition.
//!
//! Two renditions of the same combinator:
//! - [`compose`] works over boxed stages of one type and is what
//!   [`apply_middleware`](crate::middleware::apply_middleware) uses to chain
//!   dispatch wrappers.
//! - [`compose!`](crate::compose!) is a macro for heterogeneous unary
//!   functions, where each function's output type feeds the next.

/// A boxed unary transformation, the unit of [`compose`].
pub type Stage<T> = Box<dyn FnOnce(T) -> T>;

/// Compose stages right to left: `compose(vec![f, g])` yields `|x| f(g(x))`.
///
/// The rightmost stage receives the original argument and each result flows
/// leftward, matching mathematical composition `f ∘ g`. Zero stages compose to
/// the identity stage; a single stage is returned unchanged.
///
/// # Examples
///
/// ```
/// use ratchet::compose::{compose, Stage};
///
/// let double: Stage<i32> = Box::new(|x| x * 2);
/// let add_one: Stage<i32> = Box::new(|x| x + 1);
///
/// // double runs last: (3 + 1) * 2
/// assert_eq!(compose(vec![double, add_one])(3), 8);
/// ```
pub fn compose<T: 'static>(stages: Vec<Stage<T>>) -> Stage<T> {
    stages
        .into_iter()
        .reduce(|outer, inner| Box::new(move |x| outer(inner(x))))
        .unwrap_or_else(|| Box::new(|x| x))
}

/// Compose unary functions right to left.
///
/// Unlike [`compose`], the functions may have differing types as long as each
/// output feeds the next input. `compose!()` expands to the identity function
/// and `compose!(f)` to `f` itself.
///
/// # Examples
///
/// ```
/// use ratchet::compose;
///
/// let f = compose!(|x: i32| x.to_string(), |x: i32| x + 1);
/// assert_eq!(f(41), "42");
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        |x| x
    };
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        |x| $f(($crate::compose!($($rest),+))(x))
    };
}
