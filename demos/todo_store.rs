//! Todo store example: combined slice reducers, middleware and subscriptions
//!
//! Run with `RUST_LOG=debug` to see the logging middleware at work.

use std::sync::Arc;

use ratchet::{
    apply_middleware, CombinedReducer, LoggingMiddleware, Middleware, Store, StoreAction,
};

#[derive(Clone, Debug)]
enum Action {
    TaskCompleted { index: usize },
    ChangeName { name: String },
}

#[derive(Clone, Debug)]
struct Todo {
    task: String,
    completed: bool,
}

#[derive(Clone, Debug)]
struct Profile {
    name: String,
}

fn todos_reducer(state: Option<Arc<Vec<Todo>>>, action: &StoreAction<Action>) -> Arc<Vec<Todo>> {
    let state = state.unwrap_or_else(|| {
        Arc::new(
            ["have breakfast", "read the feed", "go shopping"]
                .into_iter()
                .map(|task| Todo {
                    task: task.to_string(),
                    completed: false,
                })
                .collect(),
        )
    });
    match action {
        StoreAction::Action(Action::TaskCompleted { index }) => Arc::new(
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

fn name_reducer(state: Option<Arc<Profile>>, action: &StoreAction<Action>) -> Arc<Profile> {
    let state = state.unwrap_or_else(|| {
        Arc::new(Profile {
            name: "yyt".to_string(),
        })
    });
    match action {
        StoreAction::Action(Action::ChangeName { name }) => Arc::new(Profile { name: name.clone() }),
        _ => state,
    }
}

fn main() {
    env_logger::init();

    println!("=== Todo Store Example ===\n");

    let reducer = CombinedReducer::new()
        .slice("todos", todos_reducer)
        .expect("fresh slice key")
        .slice("name", name_reducer)
        .expect("fresh slice key");

    let store = Store::builder(reducer)
        .enhancer(apply_middleware(vec![
            Box::new(LoggingMiddleware) as Box<dyn Middleware<_, _>>
        ]))
        .build();

    // Subscribe to state changes
    let observer = store.clone();
    store.subscribe(move || {
        let state = observer.state();
        let todos = state.get::<Vec<Todo>>("todos").unwrap();
        println!(
            "State updated! Open tasks: {}",
            todos.iter().filter(|todo| !todo.completed).count()
        );
    });

    println!("Completing the first task...");
    store.dispatch(Action::TaskCompleted { index: 0 });

    println!("\nRenaming the profile...");
    store.dispatch(Action::ChangeName {
        name: "xyy".to_string(),
    });

    // Read final state
    let state = store.state();
    println!("\nFinal todos: {:#?}", state.get::<Vec<Todo>>("todos").unwrap());
    println!("Final profile: {:#?}", state.get::<Profile>("name").unwrap());
}
