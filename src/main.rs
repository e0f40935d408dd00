use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use parenting_quiz_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    errors::AppError,
    handlers::{register_admin_endpoints, register_public_endpoints},
    middleware::RequestIdMiddleware,
};

// Logger sits outside RequestIdMiddleware so the echoed id is on the response.
const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b %T req_id=%{x-request-id}o"#;

fn cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600);

    match &config.cors_allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if !cfg!(debug_assertions) {
        config.validate_for_production();
    }

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let max_upload_bytes = config.max_upload_bytes;
    let jwt_service = web::Data::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ));

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to initialize application: {}", e)))?;
    let state = web::Data::new(state);

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let json_config = web::JsonConfig::default()
            .limit(max_upload_bytes)
            .error_handler(|err, _req| {
                AppError::ValidationError(format!("Invalid JSON payload: {}", err)).into()
            });

        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .app_data(json_config)
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(ACCESS_LOG_FORMAT))
            .wrap(cors(&state.config))
            .configure(register_public_endpoints)
            .configure(register_admin_endpoints)
    })
    .bind(bind_address)?
    .run()
    .await
}
