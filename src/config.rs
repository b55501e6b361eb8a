//! Connection and listener settings read from the process environment.

use crate::error::ConfigError;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_USER: &str = "ORA_USER";
pub const ENV_PASSWORD: &str = "ORA_PASSWORD";
pub const ENV_CONNECT_STRING: &str = "ORA_CONNECT_STRING";
pub const ENV_LIB_DIR: &str = "ORA_LIB_DIR";
pub const ENV_POOL_MAX: &str = "ORA_POOL_MAX";
pub const ENV_LISTEN_ADDR: &str = "LISTEN_ADDR";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STATIC_DIR: &str = "web";
const DEFAULT_POOL_MAX: u32 = 5;

#[derive(Clone)]
pub struct Config {
    pub user: String,
    pub password: String,
    pub connect_string: String,
    /// Oracle Instant Client directory, when it is not on the loader path.
    pub lib_dir: Option<PathBuf>,
    pub pool_max: u32,
    pub listen_addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl Config {
    /// Load from the process environment (after any `.env` file).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every setting through `lookup`. Required keys must be present and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let user = required(ENV_USER)?;
        let password = required(ENV_PASSWORD)?;
        let connect_string = required(ENV_CONNECT_STRING)?;
        let lib_dir = optional(ENV_LIB_DIR).map(PathBuf::from);

        let pool_max = match optional(ENV_POOL_MAX) {
            None => DEFAULT_POOL_MAX,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_POOL_MAX,
                        reason: format!("expected a positive integer, got '{}'", raw),
                    })
                }
            },
        };

        let listen_raw = optional(ENV_LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr = listen_raw.parse().map_err(|_| ConfigError::Invalid {
            key: ENV_LISTEN_ADDR,
            reason: format!("'{}' is not a socket address", listen_raw),
        })?;

        let static_dir = optional(ENV_STATIC_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            user,
            password,
            connect_string,
            lib_dir,
            pool_max,
            listen_addr,
            static_dir,
        })
    }

    /// Driver connection descriptor in `key="value"` form. Contains the password.
    pub fn connect_descriptor(&self) -> String {
        self.render_descriptor(&self.password)
    }

    /// Same as [`Config::connect_descriptor`] with the password masked, for logs.
    pub fn redacted_descriptor(&self) -> String {
        self.render_descriptor("****")
    }

    fn render_descriptor(&self, password: &str) -> String {
        let mut dsn = format!(
            r#"user="{}" password="{}" connectString="{}""#,
            self.user, password, self.connect_string
        );
        if let Some(dir) = &self.lib_dir {
            dsn.push_str(&format!(r#" libDir="{}""#, dir.display()));
        }
        dsn
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("user", &self.user)
            .field("password", &"****")
            .field("connect_string", &self.connect_string)
            .field("lib_dir", &self.lib_dir)
            .field("pool_max", &self.pool_max)
            .field("listen_addr", &self.listen_addr)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}
