use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use dotenv::dotenv;
use http::HeaderValue;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_MAX_BODY_BYTES: usize = 1_000_000;

#[derive(Deserialize)]
pub struct EnvironmentVariables {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_body_bytes: Option<u64>,
    pub cors_allow_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_bytes: usize,
    pub cors_allow_origin: HeaderValue,
}

impl Config {
    pub fn new() -> Result<Self, anyhow::Error> {
        let _ = dotenv().map_err(|err| warn!("error loading .env: {:?}", err));

        let envs =
            envy::from_env::<EnvironmentVariables>().context("invalid environment variables")?;

        return Self::from_envs(envs);
    }

    pub fn from_envs(envs: EnvironmentVariables) -> Result<Self, anyhow::Error> {
        let host = match envs.host {
            Some(host) => host
                .parse::<IpAddr>()
                .with_context(|| format!("invalid HOST: {host}"))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let max_body_bytes = match envs.max_body_bytes {
            Some(max) => usize::try_from(max).context("MAX_BODY_BYTES is too large")?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        if max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be greater than 0");
        }

        let cors_allow_origin = match envs.cors_allow_origin {
            Some(origin) => HeaderValue::from_str(&origin)
                .with_context(|| format!("invalid CORS_ALLOW_ORIGIN: {origin}"))?,
            None => HeaderValue::from_static("*"),
        };

        return Ok(Config {
            host,
            port: envs.port.unwrap_or(8000),
            max_body_bytes,
            cors_allow_origin,
        });
    }

    pub fn addr(&self) -> SocketAddr {
        return SocketAddr::new(self.host, self.port);
    }
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors_allow_origin: HeaderValue::from_static("*"),
        };
    }
}
