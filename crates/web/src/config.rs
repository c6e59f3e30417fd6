//! Build-time configuration.

pub const DEFAULT_BACKEND_ADDR: &str = "http://localhost:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Base address of the backend, without a trailing slash.
    pub backend_addr: &'static str,
}

impl Config {
    /// Reads `HUNTER_BACKEND_URL` as it was set when the crate was compiled.
    pub fn from_build_env() -> Self {
        Self::with_backend_override(option_env!("HUNTER_BACKEND_URL"))
    }

    pub fn with_backend_override(backend_addr: Option<&'static str>) -> Self {
        let backend_addr = backend_addr
            .map(|addr| addr.trim().trim_end_matches('/'))
            .filter(|addr| !addr.is_empty())
            .unwrap_or(DEFAULT_BACKEND_ADDR);
        Self { backend_addr }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_backend_override(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn falls_back_to_local_backend() {
        assert_eq!(Config::default().backend_addr, "http://localhost:8000");
        assert_eq!(
            Config::with_backend_override(Some("  ")).backend_addr,
            DEFAULT_BACKEND_ADDR
        );
    }

    #[test]
    fn override_drops_trailing_slash() {
        let config = Config::with_backend_override(Some("https://api.example.com/"));
        assert_eq!(config.backend_addr, "https://api.example.com");
    }
}
