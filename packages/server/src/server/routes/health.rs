/// Liveness probe. The service holds no connections of its own, so being
/// able to answer is the whole check.
pub async fn health_handler() -> &'static str {
    "OK"
}
