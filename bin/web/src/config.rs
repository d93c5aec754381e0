//! Runtime configuration for the web server.
//!
//! Everything is read from the environment, with `--bind <addr>` on the
//! command line taking precedence over `THREADBOARD_BIND`.

use std::path::PathBuf;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default directory served under `/public`.
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Directory of static assets (stylesheets) served under `/public`.
    pub static_dir: PathBuf,
    /// Whether to start with the demo thread already posted.
    pub seed_demo: bool,
    /// Whether session cookies carry the `Secure` flag.
    pub secure_cookies: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            seed_demo: true,
            secure_cookies: false,
        }
    }
}

impl WebConfig {
    /// Builds the configuration from process arguments and environment.
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// Builds the configuration from explicit sources.
    pub fn from_sources<F>(args: &[String], env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = bind_arg(args)
            .or_else(|| env("THREADBOARD_BIND"))
            .unwrap_or(defaults.bind_addr);

        let static_dir = env("THREADBOARD_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let seed_demo = env("THREADBOARD_SEED_DEMO")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.seed_demo);

        let secure_cookies = env("THREADBOARD_SECURE_COOKIES")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.secure_cookies);

        Self {
            bind_addr,
            static_dir,
            seed_demo,
            secure_cookies,
        }
    }
}

fn bind_arg(args: &[String]) -> Option<String> {
    args.iter()
        .position(|arg| arg == "--bind")
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WebConfig::from_sources(&[], env_from(&[]));
        assert_eq!(config, WebConfig::default());
        assert!(config.seed_demo);
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_environment_overrides() {
        let config = WebConfig::from_sources(
            &[],
            env_from(&[
                ("THREADBOARD_BIND", "0.0.0.0:9000"),
                ("THREADBOARD_STATIC_DIR", "/srv/public"),
                ("THREADBOARD_SEED_DEMO", "false"),
                ("THREADBOARD_SECURE_COOKIES", "TRUE"),
            ]),
        );
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.static_dir, PathBuf::from("/srv/public"));
        assert!(!config.seed_demo);
        assert!(config.secure_cookies);
    }

    #[test]
    fn test_bind_argument_wins() {
        let args = vec!["--bind".to_string(), "127.0.0.1:3000".to_string()];
        let config =
            WebConfig::from_sources(&args, env_from(&[("THREADBOARD_BIND", "0.0.0.0:9000")]));
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_dangling_bind_argument_ignored() {
        let args = vec!["--bind".to_string()];
        let config = WebConfig::from_sources(&args, env_from(&[]));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("True"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
    }
}
