use thiserror::Error;

/// Errors raised while configuring or inspecting a store.
///
/// All variants surface at construction time or on typed state access; nothing
/// in the dispatch path returns an error (reducer and listener failures
/// propagate as panics, see the crate docs).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A slice key was registered twice on the same combined reducer.
    #[error("duplicate slice key `{0}` in combined reducer")]
    DuplicateSliceKey(&'static str),

    /// The requested slice key is not present in the state tree.
    #[error("no slice `{0}` in state tree")]
    MissingSlice(String),

    /// The slice exists but holds a different type than the one requested.
    #[error("slice `{0}` holds a different type than requested")]
    SliceTypeMismatch(String),
}
