#[utoipa::path(
    get,
    path = "/ping",
    tag = "Health",
    operation_id = "ping",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain", example = "pong"),
    ),
)]
pub async fn ping() -> &'static str {
    "pong"
}
