//! Platform detection and user fonts directory resolution (made by FontLab https://www.fontlab.com/)

use std::env;
use std::path::PathBuf;

/// Operating system family, detected once per process.
///
/// A closed set: the three platforms with native font registration plus a
/// fallback for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// Detect the host platform.
    pub fn detect() -> Self {
        Self::from_os_name(env::consts::OS)
    }

    /// Map an `std::env::consts::OS`-style identifier to a variant.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            _ => Platform::Other,
        }
    }

    /// The per-user font directory for this platform.
    ///
    /// Always yields a path; existence is not guaranteed. `TYPIN_FONTS_DIR`
    /// overrides the resolved location when set (useful for tests and
    /// sandboxed callers).
    pub fn user_fonts_dir(self) -> PathBuf {
        if let Some(raw) = env::var_os("TYPIN_FONTS_DIR") {
            if !raw.is_empty() {
                return PathBuf::from(raw);
            }
        }

        match self {
            Platform::Windows => env::var_os("WINDIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("C:\\Windows"))
                .join("Fonts"),
            Platform::MacOs => home_dir().join("Library/Fonts"),
            Platform::Linux => home_dir().join(".local/share/fonts"),
            Platform::Other => home_dir().join("fonts"),
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
