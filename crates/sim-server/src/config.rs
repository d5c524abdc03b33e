use std::{
    env,
    net::{AddrParseError, IpAddr, SocketAddr},
    time::Duration,
};

use core_sim::SimConfig;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub tick_interval: Duration,
    pub tick_amplitude: f64,
    /// `None` seeds the price walk from OS entropy.
    pub feed_seed: Option<u64>,
    pub sim: SimConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOST is not a valid IP address: {0}")]
    InvalidHost(#[source] AddrParseError),
    #[error("PORT must be an integer between 0 and 65535")]
    InvalidPort,
    #[error("SIM_TICK_INTERVAL_MS must be a positive integer")]
    InvalidTickInterval,
    #[error("SIM_TICK_AMPLITUDE must be a finite number in [0, 2)")]
    InvalidTickAmplitude,
    #[error("SIM_FEED_SEED must be an unsigned 64-bit integer")]
    InvalidFeedSeed,
    #[error("{0} contains non-unicode data")]
    NonUnicode(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let sim = SimConfig::default();

        let host: IpAddr = match read_env("HOST")? {
            Some(value) => value.parse().map_err(ConfigError::InvalidHost)?,
            None => DEFAULT_HOST.parse().map_err(ConfigError::InvalidHost)?,
        };

        let port = match read_env("PORT")? {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };

        let tick_interval_ms = match read_env("SIM_TICK_INTERVAL_MS")? {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(parsed) if parsed > 0 => parsed,
                _ => return Err(ConfigError::InvalidTickInterval),
            },
            None => sim.tick_interval_ms,
        };

        let tick_amplitude = match read_env("SIM_TICK_AMPLITUDE")? {
            Some(value) => {
                let parsed = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidTickAmplitude)?;
                if !parsed.is_finite() || !(0.0..2.0).contains(&parsed) {
                    return Err(ConfigError::InvalidTickAmplitude);
                }
                parsed
            }
            None => sim.tick_amplitude,
        };

        let feed_seed = match read_env("SIM_FEED_SEED")? {
            Some(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidFeedSeed)?,
            ),
            None => None,
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            tick_interval: Duration::from_millis(tick_interval_ms),
            tick_amplitude,
            feed_seed,
            sim,
        })
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode(key)),
    }
}

#[cfg(test)]
mod tests {
    use std::{env, sync::Mutex, time::Duration};

    use super::{Config, ConfigError};

    static ENV_LOCK: Mutex<()> = Mutex::new(());
    const ENV_KEYS: [&str; 5] = [
        "HOST",
        "PORT",
        "SIM_TICK_INTERVAL_MS",
        "SIM_TICK_AMPLITUDE",
        "SIM_FEED_SEED",
    ];

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = env::var_os(key);
            env::remove_var(key);
            Self { key, previous }
        }

        #[cfg(unix)]
        fn set_os(key: &'static str, value: std::ffi::OsString) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    fn reset_config_env_baseline() -> Vec<EnvVarGuard> {
        ENV_KEYS.into_iter().map(EnvVarGuard::unset).collect()
    }

    #[test]
    fn defaults_when_env_is_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:10000".parse().unwrap());
        assert_eq!(config.tick_interval, Duration::from_secs(2));
        assert_eq!(config.tick_amplitude, 0.0006);
        assert_eq!(config.feed_seed, None);
    }

    #[test]
    fn uses_host_and_port_overrides() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _host = EnvVarGuard::set("HOST", "127.0.0.1");
        let _port = EnvVarGuard::set("PORT", "9090");

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9090".parse().unwrap());
    }

    #[test]
    fn uses_feed_overrides() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _interval = EnvVarGuard::set("SIM_TICK_INTERVAL_MS", "250");
        let _amplitude = EnvVarGuard::set("SIM_TICK_AMPLITUDE", "0.002");
        let _seed = EnvVarGuard::set("SIM_FEED_SEED", "42");

        let config = Config::from_env().unwrap();

        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.tick_amplitude, 0.002);
        assert_eq!(config.feed_seed, Some(42));
    }

    #[test]
    fn returns_error_for_invalid_port() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set("PORT", "70000");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn returns_error_for_invalid_host() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set("HOST", "not-a-host");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidHost(_)));
    }

    #[test]
    fn returns_error_for_zero_tick_interval() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set("SIM_TICK_INTERVAL_MS", "0");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidTickInterval));
    }

    #[test]
    fn returns_error_for_out_of_range_amplitude() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set("SIM_TICK_AMPLITUDE", "2.5");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidTickAmplitude));
    }

    #[test]
    fn returns_error_for_negative_seed() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set("SIM_FEED_SEED", "-1");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidFeedSeed));
    }

    #[cfg(unix)]
    #[test]
    fn returns_error_for_non_unicode_port() {
        use std::os::unix::ffi::OsStringExt;

        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set_os(
            "PORT",
            std::ffi::OsString::from_vec(vec![0x66, 0x6f, 0x80]),
        );

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::NonUnicode("PORT")));
    }
}
