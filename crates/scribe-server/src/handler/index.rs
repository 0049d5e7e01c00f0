//! Landing page with the upload form and the relay button.

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use crate::service::ServiceState;

/// Landing page served at `/`.
const INDEX_HTML: &str = include_str!("../../static/index.html");

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Returns a [`Router`] serving the landing page.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn serves_landing_page() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response.header("content-type").to_str()?.starts_with("text/html"));

        let body = response.text();
        assert!(body.contains("/process-image"));
        assert!(body.contains("/send-to-make"));
        assert!(body.contains("name=\"files\""));

        Ok(())
    }
}
