use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

pub fn reference_report() -> Value {
    json!({
        "summary": [{"title": "Rows", "value": "100"}],
        "charts": [{
            "chart_type": "bar",
            "columns": ["age"],
            "reason": "distribution",
            "chart_data": {"labels": ["0-18", "19-40"], "values": [30, 70]}
        }],
        "anomalies": [],
        "insights": ["No major issues found"]
    })
}

/// Starts a fake analysis service on an ephemeral port and returns its base URL.
pub async fn spawn_analysis_service(report: Value) -> String {
    let router = Router::new().route(
        "/dashboard",
        post(move |mut multipart: Multipart| {
            let report = report.clone();
            async move {
                match multipart.next_field().await {
                    Ok(Some(field)) if field.name() == Some("file") => {
                        (StatusCode::OK, Json(report))
                    }
                    _ => (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"detail": "Please upload a CSV file."})),
                    ),
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
