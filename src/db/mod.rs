use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{config::Config, errors::AppResult};

/// Handle on the question bank database. Cloning shares the client pool.
#[derive(Clone)]
pub struct Database {
    inner: mongodb::Database,
}

impl Database {
    /// Connects and pings once, so a bad connection string fails at startup.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some(config.app_title.clone());
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let database = Self {
            inner: Client::with_options(options)?.database(&config.mongo_db_name),
        };
        database.health_check().await?;

        log::info!("Connected to MongoDB database {}", config.mongo_db_name);
        Ok(database)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.inner.collection(name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.inner.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
