use axum::{
    Router,
    routing::{delete, get, post, put},
};
use engine::Engine;

use std::sync::Arc;

use crate::{attendance, auth, expenses, menu, students};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub credentials: Arc<auth::Credentials>,
}

fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/menu/add", post(menu::add))
        .route("/menu/all", get(menu::all))
        .route("/menu/day/{day}", get(menu::by_day))
        .route("/menu/update/{id}", put(menu::update))
        .route("/menu/delete/{id}", delete(menu::delete))
        .route("/attendance/mark", post(attendance::mark))
        .route("/attendance/all", get(attendance::all))
        .route("/attendance/date/{date}", get(attendance::by_date))
        .route("/attendance/student/{name}", get(attendance::by_student))
        .route("/expenses/add", post(expenses::add))
        .route("/expenses/all", get(expenses::all))
        .route("/expenses/update/{id}", put(expenses::update))
        .route("/expenses/delete/{id}", delete(expenses::delete))
        .route("/expenses/summary", get(expenses::summary))
        .route("/students/add", post(students::add))
        .route("/students/all", get(students::all))
        .route("/students/delete/{id}", delete(students::delete));

    Router::new().nest("/api", api).with_state(state)
}

/// Build the full application router.
pub fn app(engine: Arc<Engine>, credentials: auth::Credentials) -> Router {
    router(ServerState {
        engine,
        credentials: Arc::new(credentials),
    })
}

/// Serve the API on an already bound listener until the server stops.
pub async fn run_with_listener(
    engine: Engine,
    credentials: auth::Credentials,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(Arc::new(engine), credentials)).await
}
