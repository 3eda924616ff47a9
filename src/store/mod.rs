//! The state container.
//!
//! A [`Store`] owns the current state, applies dispatched actions through its
//! reducer, and notifies subscribers after every state replacement. Store
//! construction can be transformed wholesale by an [`Enhancer`], which is how
//! middleware is applied.

mod enhancer;
mod store;

pub use enhancer::{Enhancer, StoreCreator};
pub use store::{Store, StoreBuilder, Subscription};

pub(crate) use store::StoreInner;
