use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOME_TITLE: &str = "Home";

/// Application configuration and constants
#[derive(Clone, Debug)]
pub struct Config {
    pub pages_dir: Arc<PathBuf>,
    pub resources_dir: Arc<PathBuf>,
    pub templates_dir: Arc<PathBuf>,
    pub host: IpAddr,
    pub port: u16,
    pub home_title: String,
    pub open_browser: bool,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            pages_dir: Arc::new(PathBuf::from("pages")),
            resources_dir: Arc::new(PathBuf::from("resources")),
            templates_dir: Arc::new(PathBuf::from("templates")),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            home_title: DEFAULT_HOME_TITLE.to_string(),
            open_browser: true,
        }
    }

    /// Configuration rooted at `pages_dir`, with no browser launch
    pub fn with_pages_dir(pages_dir: PathBuf) -> Self {
        Self {
            pages_dir: Arc::new(pages_dir),
            open_browser: false,
            ..Self::new()
        }
    }

    /// Defaults overridden by `PANTRY_*` environment variables.
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(dir) = lookup("PANTRY_PAGES_DIR") {
            config.pages_dir = Arc::new(PathBuf::from(dir));
        }
        if let Some(dir) = lookup("PANTRY_RESOURCES_DIR") {
            config.resources_dir = Arc::new(PathBuf::from(dir));
        }
        if let Some(dir) = lookup("PANTRY_TEMPLATES_DIR") {
            config.templates_dir = Arc::new(PathBuf::from(dir));
        }
        if let Some(host) = lookup("PANTRY_HOST") {
            match host.parse() {
                Ok(addr) => config.host = addr,
                Err(_) => log::warn!("Ignoring invalid PANTRY_HOST {:?}", host),
            }
        }
        if let Some(port) = lookup("PANTRY_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => log::warn!("Ignoring invalid PANTRY_PORT {:?}", port),
            }
        }
        if let Some(home) = lookup("PANTRY_HOME") {
            if crate::services::page_store::is_valid_slug(&crate::services::page_store::slugify(&home)) {
                config.home_title = home;
            } else {
                log::warn!("Ignoring invalid PANTRY_HOME {:?}", home);
            }
        }
        config.open_browser = lookup("PANTRY_NO_BROWSER").is_none();

        config
    }

    /// Slug of the home page
    pub fn home_slug(&self) -> String {
        crate::services::page_store::slugify(&self.home_title)
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// URL of the home page on the bound address
    pub fn home_url(&self) -> String {
        format!("http://{}/view/{}", self.socket_addr(), self.home_slug())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.home_url(), "http://127.0.0.1:8080/view/Home");
        assert_eq!(config.pages_dir.as_ref(), &PathBuf::from("pages"));
    }

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars = [
            ("PANTRY_PAGES_DIR", "/srv/recipes"),
            ("PANTRY_RESOURCES_DIR", "assets"),
            ("PANTRY_TEMPLATES_DIR", "tpl"),
            ("PANTRY_HOST", "0.0.0.0"),
            ("PANTRY_PORT", "9000"),
            ("PANTRY_HOME", "Front Page"),
            ("PANTRY_NO_BROWSER", "1"),
        ];
        let config = Config::from_lookup(lookup_from(&vars));

        assert_eq!(config.pages_dir.as_ref(), &PathBuf::from("/srv/recipes"));
        assert_eq!(config.resources_dir.as_ref(), &PathBuf::from("assets"));
        assert_eq!(config.templates_dir.as_ref(), &PathBuf::from("tpl"));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.home_title, "Front Page");
        assert!(!config.open_browser);
    }

    #[test]
    fn unparseable_values_keep_defaults() {
        let vars = [
            ("PANTRY_HOST", "not-an-ip"),
            ("PANTRY_PORT", "eighty"),
            ("PANTRY_HOME", "../Escape"),
        ];
        let config = Config::from_lookup(lookup_from(&vars));

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.home_title, DEFAULT_HOME_TITLE);
        assert!(config.open_browser);
    }

    #[test]
    fn home_slug_follows_title() {
        let config = Config { home_title: "Front Page".to_string(), ..Config::new() };
        assert_eq!(config.home_slug(), "Front-Page");
    }
}
