use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    /// Retry budget for commit conflicts before surfacing Conflict.
    pub max_assign_attempts: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Built-in defaults so the service runs without any config dir
            .set_default("server.port", 8080)?
            .set_default("engine.max_assign_attempts", 5)?
            // Optional file layers: default, then per-environment, then local
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Env overrides, e.g. `CABIN__SERVER__PORT=9090`
            .add_source(config::Environment::with_prefix("CABIN").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
