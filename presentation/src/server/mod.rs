//! Chat HTTP service (E04)
//!
//! - `POST /api/chat`: one traced chat completion
//! - `GET /api/health`: liveness probe
//!
//! The router is built from a shared [`RunChatUseCase`]; [`serve`] binds
//! it and stops on Ctrl-C after in-flight requests finish.

mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use course_application::RunChatUseCase;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Router state injected into every handler.
///
/// Cheap to clone; the use case is reference-counted.
#[derive(Clone)]
pub struct ChatState {
    pub chat: Arc<RunChatUseCase>,
}

/// Build the `/api` router.
pub fn build_router(chat: Arc<RunChatUseCase>) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/health", get(handlers::health))
        .with_state(ChatState { chat })
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Chat service listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Chat service shut down");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn ctrl_c() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. If the signal cannot be installed this
/// never resolves, so the server keeps running.
async fn shutdown_on(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("Graceful shutdown initiated"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
