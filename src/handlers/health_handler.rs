use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_ok = match &state.db {
        Some(db) => db.health_check().await.is_ok(),
        None => false,
    };

    let response = serde_json::json!({
        "status": if db_ok { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_ok { "ok" } else { "error" },
            "generation": if state.config.openrouter_api_key.is_some() { "configured" } else { "disabled" }
        }
    });

    if db_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
