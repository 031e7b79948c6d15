use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub storage: StorageBackend,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
    pub enable_testing_routes: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let storage = match env
            .get_or("STORAGE_BACKEND", "postgres")
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres {
                database_url: env
                    .get_required("DATABASE_URL")
                    .context("DATABASE_URL is required")?,
                max_connections: env.parse_positive("DB_MAX_CONNECTIONS", 10_u32)?,
            },
            other => {
                return Err(anyhow!(
                    "STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"
                ));
            }
        };

        let jwt_secret = env
            .get_required("JWT_SECRET")
            .context("JWT_SECRET is required")?;
        let jwt_ttl_seconds: i64 = env
            .get_or("JWT_TTL_SECONDS", "3600")
            .parse()
            .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;

        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let http_addr = env.get_or("HTTP_ADDR", "0.0.0.0:3003");
        let cors_origins = parse_cors_origins(env.get_or("CORS_ORIGINS", "*"));
        let log_level = (env.lookup)("LOG_LEVEL")
            .or_else(|| (env.lookup)("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            env.parse_positive("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024_usize)?;
        let http_concurrency_limit = env.parse_positive("HTTP_CONCURRENCY_LIMIT", 256_usize)?;
        let http_request_timeout_secs = env.parse_positive("HTTP_REQUEST_TIMEOUT_SECS", 10_u64)?;
        let enable_testing_routes = parse_bool(
            "ENABLE_TESTING_ROUTES",
            &env.get_or("ENABLE_TESTING_ROUTES", "false"),
        )?;

        Ok(Self {
            storage,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            enable_testing_routes,
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get_or(&self, key: &str, default: &str) -> String {
        (self.lookup)(key).unwrap_or_else(|| default.to_string())
    }

    fn get_required(&self, key: &str) -> Result<String> {
        let value = (self.lookup)(key).ok_or_else(|| anyhow!("{key} is not set"))?;
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(anyhow!("{key} must not be empty"));
        }
        Ok(value)
    }

    fn parse_positive<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + std::fmt::Display + PartialEq + Default,
    {
        let value = self
            .get_or(key, &default.to_string())
            .parse::<T>()
            .map_err(|_| anyhow!("Failed to parse {key}, expecting positive integer"))?;

        if value == T::default() {
            return Err(anyhow!("{key} must be > 0"));
        }
        Ok(value)
    }
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("{key} must be a boolean, got '{other}'")),
    }
}
