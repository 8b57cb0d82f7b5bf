/// GET /api/health
pub async fn health_handler() -> &'static str {
    "OK"
}
