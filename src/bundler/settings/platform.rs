//! Target platform descriptor.

use std::{fmt, str::FromStr};

/// Target platform family for the distribution being built.
///
/// Resolved once when settings are built and passed explicitly to everything
/// that branches on the platform, so the branching can be exercised on any
/// host.
///
/// # Examples
///
/// ```no_run
/// use invest_bundler::bundler::Platform;
///
/// let platform: Platform = "windows".parse().unwrap();
/// assert_eq!(platform.executable_suffix(), ".exe");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows - runtime DLLs are injected and executables carry `.exe`.
    Windows,
    /// macOS
    MacOs,
    /// Linux and other Unix-likes
    Linux,
}

impl Platform {
    /// Platform of the machine running the bundler.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// File-name suffix required for executables on this platform.
    pub fn executable_suffix(self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::MacOs | Platform::Linux => "",
        }
    }

    /// Lowercase identifier, matching the serde and CLI spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win32" | "win" => Ok(Platform::Windows),
            "macos" | "darwin" | "osx" => Ok(Platform::MacOs),
            "linux" | "linux2" => Ok(Platform::Linux),
            other => Err(format!(
                "Invalid platform: {other}. Valid platforms: windows, macos, linux"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("win32".parse::<Platform>(), Ok(Platform::Windows));
        assert_eq!("Darwin".parse::<Platform>(), Ok(Platform::MacOs));
        assert_eq!("linux2".parse::<Platform>(), Ok(Platform::Linux));
        assert!("beos".parse::<Platform>().is_err());
    }

    #[test]
    fn only_windows_has_a_suffix() {
        assert_eq!(Platform::Windows.executable_suffix(), ".exe");
        assert_eq!(Platform::MacOs.executable_suffix(), "");
        assert_eq!(Platform::Linux.executable_suffix(), "");
    }
}
