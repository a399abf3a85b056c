use axum::{
    routing::{get, put},
    Router,
};

use crate::storage::StudentRepository;

mod handlers;
mod models;

use handlers::{
    delete_student, health, insert_student, list_students, not_found, search_students,
    update_student,
};

#[derive(Clone)]
pub struct AppState<R: StudentRepository> {
    pub repo: R,
    pub started_at: std::time::SystemTime,
}

pub fn router<R: StudentRepository + Clone + Send + Sync + 'static>(repo: R) -> Router {
    let state = AppState {
        repo,
        started_at: std::time::SystemTime::now(),
    };

    Router::new()
        .route("/health", get(health::<R>))
        .route(
            "/students",
            get(list_students::<R>).post(insert_student::<R>),
        )
        .route("/students/search", get(search_students::<R>))
        .route(
            "/students/:id",
            put(update_student::<R>).delete(delete_student::<R>),
        )
        .fallback(not_found)
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` is cancelled.
pub async fn serve<R: StudentRepository + Clone + Send + Sync + 'static>(
    listener: tokio::net::TcpListener,
    repo: R,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(repo);

    log::info!("🌐 REST listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
