use secrecy::SecretString;
use std::env;

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub questions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub openrouter_api_key: Option<SecretString>,
    pub openrouter_base_url: String,
    pub openrouter_model: String,
    pub generation_temperature: f32,
    pub generation_max_tokens: u32,
    pub generation_timeout_secs: u64,
    pub app_referer: String,
    pub app_title: String,
    pub max_upload_bytes: usize,
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "parenting-quiz-local".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parsed_or("WEB_SERVER_PORT", 8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|o| !o.trim().is_empty()),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: parsed_or("JWT_EXPIRATION_HOURS", 24),
            openrouter_api_key: env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            openrouter_base_url: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            openrouter_model: env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| "deepseek/deepseek-r1".to_string()),
            generation_temperature: parsed_or("GENERATION_TEMPERATURE", 0.7),
            generation_max_tokens: parsed_or("GENERATION_MAX_TOKENS", 2000),
            generation_timeout_secs: parsed_or("GENERATION_TIMEOUT_SECS", 60),
            app_referer: env::var("APP_REFERER")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            app_title: env::var("APP_TITLE").unwrap_or_else(|_| "Quiz App".to_string()),
            max_upload_bytes: parsed_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        // Generation can run without a key; requests fail with a clear error.
        if self.openrouter_api_key.is_none() {
            log::warn!("OPENROUTER_API_KEY is not set; question generation is disabled");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "parenting-quiz-test".to_string(),
            questions_collection: "questions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            openrouter_api_key: Some(SecretString::from("test-openrouter-key".to_string())),
            openrouter_base_url: "https://openrouter.ai/api/v1".to_string(),
            openrouter_model: "deepseek/deepseek-r1".to_string(),
            generation_temperature: 0.7,
            generation_max_tokens: 2000,
            generation_timeout_secs: 5,
            app_referer: "http://localhost:8080".to_string(),
            app_title: "Quiz App".to_string(),
            max_upload_bytes: 1024 * 1024,
        }
    }
}
