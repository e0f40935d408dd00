//! Mints an admin bearer token with the server's JWT secret.
//!
//! Usage: `mint_token <subject> <email>`. Reads the same environment as the
//! server (`JWT_SECRET`, `JWT_EXPIRATION_HOURS`).

use parenting_quiz_server::{
    auth::{JwtService, Role},
    config::Config,
};

fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let mut args = std::env::args().skip(1);
    let (Some(subject), Some(email)) = (args.next(), args.next()) else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "usage: mint_token <subject> <email>",
        ));
    };

    let config = Config::from_env();
    let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);
    let token = jwt
        .create_token(&subject, &email, Role::Admin)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!(
        "Issued admin token for {} valid for {}h",
        subject,
        config.jwt_expiration_hours
    );
    println!("{}", token);
    Ok(())
}
