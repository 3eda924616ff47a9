//! Integration tests for Ratchet
//!
//! Exercises the full construction path: combined slice reducers, preloaded
//! state, middleware enhancement and subscriptions, all on one store.

use std::sync::{Arc, Mutex};

use ratchet::{
    apply_middleware, CombinedReducer, DispatchFn, DispatchWrapper, Middleware, MiddlewareApi,
    Store, StoreAction, StoreError,
};

#[derive(Clone, Debug, PartialEq)]
enum AppAction {
    TaskCompleted { index: usize },
    ChangeName { name: String },
}

#[derive(Clone, Debug, PartialEq)]
struct Todo {
    task: String,
    completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct Profile {
    name: String,
}

fn default_todos() -> Arc<Vec<Todo>> {
    Arc::new(
        ["have breakfast", "read the feed", "go shopping"]
            .into_iter()
            .map(|task| Todo {
                task: task.to_string(),
                completed: false,
            })
            .collect(),
    )
}

fn todos_reducer(state: Option<Arc<Vec<Todo>>>, action: &StoreAction<AppAction>) -> Arc<Vec<Todo>> {
    let state = state.unwrap_or_else(default_todos);
    match action {
        StoreAction::Action(AppAction::TaskCompleted { index }) => Arc::new(
            state
                .iter()
                .enumerate()
                .map(|(i, todo)| Todo {
                    completed: todo.completed || i == *index,
                    ..todo.clone()
                })
                .collect(),
        ),
        _ => state,
    }
}

fn name_reducer(state: Option<Arc<Profile>>, action: &StoreAction<AppAction>) -> Arc<Profile> {
    let state = state.unwrap_or_else(|| {
        Arc::new(Profile {
            name: "yyt".to_string(),
        })
    });
    match action {
        StoreAction::Action(AppAction::ChangeName { name }) => {
            Arc::new(Profile { name: name.clone() })
        }
        _ => state,
    }
}

fn app_reducer() -> CombinedReducer<AppAction> {
    CombinedReducer::new()
        .slice("todos", todos_reducer)
        .unwrap()
        .slice("name", name_reducer)
        .unwrap()
}

#[test]
fn init_seeds_every_slice_before_first_read() {
    let store = Store::new(app_reducer());
    let state = store.state();

    let todos = state.get::<Vec<Todo>>("todos").unwrap();
    assert_eq!(todos.len(), 3);
    assert!(todos.iter().all(|todo| !todo.completed));
    assert_eq!(state.get::<Profile>("name").unwrap().name, "yyt");
}

#[test]
fn end_to_end_dispatch_updates_only_the_owning_slice() {
    let store = Store::new(app_reducer());

    store.dispatch(AppAction::TaskCompleted { index: 0 });
    let after_complete = store.state();
    let todos = after_complete.get::<Vec<Todo>>("todos").unwrap();
    assert!(todos[0].completed);
    assert!(!todos[1].completed);

    store.dispatch(AppAction::ChangeName {
        name: "xyy".to_string(),
    });
    let after_rename = store.state();
    assert_eq!(after_rename.get::<Profile>("name").unwrap().name, "xyy");

    // Renaming left the todos slice untouched, down to the allocation.
    assert!(Arc::ptr_eq(
        &after_complete.get::<Vec<Todo>>("todos").unwrap(),
        &after_rename.get::<Vec<Todo>>("todos").unwrap(),
    ));
}

#[test]
fn preloaded_tree_wins_over_reducer_defaults() {
    // Complete everything on one store, then rebuild from its snapshot.
    let store = Store::new(app_reducer());
    store.dispatch(AppAction::TaskCompleted { index: 0 });
    store.dispatch(AppAction::TaskCompleted { index: 1 });
    store.dispatch(AppAction::TaskCompleted { index: 2 });
    let snapshot = store.state();

    let restored = Store::builder(app_reducer())
        .preloaded_state(snapshot)
        .build();
    let todos = restored.state().get::<Vec<Todo>>("todos").unwrap();
    assert!(todos.iter().all(|todo| todo.completed));
}

#[test]
fn typed_slice_access_reports_misuse() {
    let store = Store::new(app_reducer());
    let state = store.state();

    assert_eq!(
        state.require::<Vec<Todo>>("missing").unwrap_err(),
        StoreError::MissingSlice("missing".to_string()),
    );
    assert_eq!(
        state.require::<Profile>("todos").unwrap_err(),
        StoreError::SliceTypeMismatch("todos".to_string()),
    );
}

#[test]
fn duplicate_slice_registration_fails_fast() {
    let err = CombinedReducer::<AppAction>::new()
        .slice("todos", todos_reducer)
        .unwrap()
        .slice("todos", todos_reducer)
        .unwrap_err();
    assert_eq!(err, StoreError::DuplicateSliceKey("todos"));
}

/// Records action tags around its `next` call, like a logging middleware.
struct Recorder {
    tag: &'static str,
    trace: Arc<Mutex<Vec<String>>>,
}

impl<S> Middleware<S, AppAction> for Recorder
where
    S: Send + Sync + 'static,
{
    fn connect(&self, _api: MiddlewareApi<S, AppAction>) -> DispatchWrapper<AppAction> {
        let tag = self.tag;
        let trace = self.trace.clone();
        Box::new(move |next| {
            Arc::new(move |action| {
                trace.lock().unwrap().push(format!("{tag}-enter"));
                next(action);
                trace.lock().unwrap().push(format!("{tag}-exit"));
            }) as DispatchFn<AppAction>
        })
    }
}

#[test]
fn middleware_subscriptions_and_reducers_cooperate() {
    let _ = env_logger::builder().is_test(true).try_init();

    let trace = Arc::new(Mutex::new(Vec::new()));
    let store = Store::builder(app_reducer())
        .enhancer(apply_middleware(vec![
            Box::new(Recorder {
                tag: "first",
                trace: trace.clone(),
            }) as Box<dyn Middleware<_, _>>,
            Box::new(Recorder {
                tag: "second",
                trace: trace.clone(),
            }),
        ]))
        .build();

    let names = Arc::new(Mutex::new(Vec::new()));
    let observer = store.clone();
    let seen = names.clone();
    let subscription = store.subscribe(move || {
        let state = observer.state();
        seen.lock()
            .unwrap()
            .push(state.get::<Profile>("name").unwrap().name.clone());
    });

    store.dispatch(AppAction::ChangeName {
        name: "xyy".to_string(),
    });
    assert_eq!(
        *trace.lock().unwrap(),
        ["first-enter", "second-enter", "second-exit", "first-exit"]
    );
    assert_eq!(*names.lock().unwrap(), ["xyy"]);

    subscription.unsubscribe();
    store.dispatch(AppAction::TaskCompleted { index: 2 });
    assert_eq!(names.lock().unwrap().len(), 1);
}

#[test]
fn listener_dispatching_followup_actions_is_safe() {
    let store = Store::new(app_reducer());

    // Completing the first task triggers a rename from inside the listener.
    let handle = store.clone();
    let renamed = Arc::new(Mutex::new(false));
    let flag = renamed.clone();
    let _sub = store.subscribe(move || {
        let state = handle.state();
        let todos = state.get::<Vec<Todo>>("todos").unwrap();
        let mut renamed = flag.lock().unwrap();
        if todos[0].completed && !*renamed {
            *renamed = true;
            let rename = AppAction::ChangeName {
                name: "done".to_string(),
            };
            drop(renamed);
            handle.dispatch(rename);
        }
    });

    store.dispatch(AppAction::TaskCompleted { index: 0 });

    let state = store.state();
    assert!(state.get::<Vec<Todo>>("todos").unwrap()[0].completed);
    assert_eq!(state.get::<Profile>("name").unwrap().name, "done");
}
