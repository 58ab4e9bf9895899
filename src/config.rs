use crate::error::{Error, Result};
use crate::services::sim::SimPolicy;
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub write_failure_rate: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            database_path: get_env_or("TALENTFLOW_DB", "talentflow.sqlite"),
            latency_min_ms: get_env_parse_or("SIM_LATENCY_MIN_MS", 200)?,
            latency_max_ms: get_env_parse_or("SIM_LATENCY_MAX_MS", 1200)?,
            write_failure_rate: get_env_parse_or("SIM_WRITE_FAILURE_RATE", 0.08)?,
        })
    }

    /// The injection policy handed to `Backend::new`. Kept as a value, not
    /// process-global state, so tests can pin the rate to 0 or 1.
    pub fn sim_policy(&self) -> SimPolicy {
        SimPolicy::new(
            self.latency_min_ms..self.latency_max_ms,
            self.write_failure_rate,
        )
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
