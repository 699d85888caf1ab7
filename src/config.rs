// Server configuration module
// Fixed port and root directory, resolved once at process start

use std::env;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Port the server always listens on.
pub const PORT: u16 = 8000;

/// Name of the served directory, a sibling of the binary's directory.
const ROOT_DIR_NAME: &str = "public_html";

/// Immutable server configuration.
///
/// Created once at startup and shared behind an `Arc` for the process
/// lifetime. There are no flags, environment variables or config files.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Absolute, canonicalized path of the served directory.
    pub root_dir: PathBuf,
}

impl ServerConfig {
    /// Resolve the configuration.
    ///
    /// The root directory is `public_html` one level up from the directory
    /// containing the server executable, so the result is the same no
    /// matter which working directory the server is launched from.
    pub fn resolve() -> io::Result<Self> {
        let exe = env::current_exe()?;
        let bin_dir = exe.parent().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "executable path has no parent directory",
            )
        })?;
        let root = bin_dir.parent().unwrap_or(bin_dir).join(ROOT_DIR_NAME);
        Self::with_root(root)
    }

    /// Build a configuration around an explicit root directory.
    ///
    /// A missing root is a fatal startup error, reported here rather than
    /// guessed around at request time.
    pub fn with_root(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let root_dir = root.canonicalize().map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("root directory '{}' not found: {e}", root.display()),
            )
        })?;
        if !root_dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("root path '{}' is not a directory", root_dir.display()),
            ));
        }
        Ok(Self {
            port: PORT,
            root_dir,
        })
    }

    /// Socket address to bind: all interfaces on the fixed port.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolves_existing_directory_to_absolute_path() {
        let dir = tempdir().unwrap();
        let config = ServerConfig::with_root(dir.path()).unwrap();
        assert!(config.root_dir.is_absolute());
        assert_eq!(config.port, PORT);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("public_html");
        let err = ServerConfig::with_root(missing).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn file_as_root_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, b"x").unwrap();
        assert!(ServerConfig::with_root(file).is_err());
    }

    #[test]
    fn binds_all_interfaces_on_port_8000() {
        let dir = tempdir().unwrap();
        let config = ServerConfig::with_root(dir.path()).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
    }
}
