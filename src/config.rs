use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "clinicals-api";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default front-end origin allowed by CORS.
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Default address the HTTP server binds to.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Get the application data directory: ~/.clinicals-api/
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".clinicals-api")
}

/// Path to the SQLite database file.
/// `CLINICALS_DB` overrides the default location under the data directory.
pub fn db_path() -> PathBuf {
    match std::env::var("CLINICALS_DB") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_data_dir().join("clinicals.db"),
    }
}

/// Address the server binds to. `CLINICALS_BIND` overrides the default.
pub fn bind_addr() -> SocketAddr {
    std::env::var("CLINICALS_BIND")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address is valid")
        })
}

/// The single front-end origin permitted by CORS.
/// `CLINICALS_ALLOWED_ORIGIN` overrides the default.
pub fn allowed_origin() -> String {
    match std::env::var("CLINICALS_ALLOWED_ORIGIN") {
        Ok(origin) if !origin.is_empty() => origin,
        _ => DEFAULT_ALLOWED_ORIGIN.to_string(),
    }
}

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME").replace('-', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with(".clinicals-api"));
    }

    #[test]
    fn default_bind_addr_parses() {
        let addr = bind_addr();
        assert!(addr.port() > 0);
    }

    #[test]
    fn default_origin_is_localhost_3000() {
        if std::env::var("CLINICALS_ALLOWED_ORIGIN").is_err() {
            assert_eq!(allowed_origin(), "http://localhost:3000");
        }
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
