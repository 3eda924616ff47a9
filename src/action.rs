/// An action as seen by reducers.
///
/// Application code dispatches plain `A` values; the store wraps them in
/// [`StoreAction::Action`] before they reach any reducer. [`StoreAction::Init`]
/// is reserved for the store itself: it is delivered exactly once, during
/// construction, so every reducer can seed its default state. Because `Init`
/// lives in this envelope rather than in the application's action type, it can
/// never collide with an application-defined action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreAction<A> {
    /// Reserved initialization action, dispatched once at store construction.
    Init,
    /// An application-dispatched action.
    Action(A),
}

impl<A> StoreAction<A> {
    /// The application action, if this is not the reserved init action.
    pub fn action(&self) -> Option<&A> {
        match self {
            StoreAction::Init => None,
            StoreAction::Action(action) => Some(action),
        }
    }

    /// Whether this is the reserved init action.
    pub fn is_init(&self) -> bool {
        matches!(self, StoreAction::Init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_accessors() {
        let init: StoreAction<u32> = StoreAction::Init;
        assert!(init.is_init());
        assert_eq!(init.action(), None);

        let action = StoreAction::Action(7u32);
        assert!(!action.is_init());
        assert_eq!(action.action(), Some(&7));
    }
}
