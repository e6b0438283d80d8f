//! Output bundle configuration.

use std::path::PathBuf;

/// Default executable base name.
pub const DEFAULT_NAME: &str = "invest";

/// Default name of the collected distribution directory.
pub const DEFAULT_DIST_NAME: &str = "invest_dist";

/// Bundle layout and executable options.
///
/// # Configuration
///
/// Add to `bundle.toml`:
///
/// ```toml
/// [bundle]
/// name = "invest"
/// dist_name = "invest_dist"
/// exclude_binaries = true
/// console = true
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct BundleSettings {
    /// Executable base name, without any platform suffix.
    ///
    /// Default: `invest`
    pub name: String,

    /// Name of the collected distribution directory under the dist path.
    ///
    /// Default: `invest_dist`
    pub dist_name: String,

    /// Thin-launcher mode.
    ///
    /// When true the executable embeds no binaries and every binary is laid
    /// out next to it in the collected distribution. When false binaries are
    /// embedded in the executable itself.
    ///
    /// Default: true
    pub exclude_binaries: bool,

    /// Console versus windowed executable.
    ///
    /// None defers to the platform policy.
    ///
    /// Default: None
    pub console: Option<bool>,

    /// Ask the launcher to print bootstrap diagnostics.
    ///
    /// Default: false
    pub debug: bool,

    /// Launcher stub prepended to the executable package.
    ///
    /// Default: None (the executable is the package archive alone)
    pub bootloader: Option<PathBuf>,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            dist_name: DEFAULT_DIST_NAME.to_string(),
            exclude_binaries: true,
            console: None,
            debug: false,
            bootloader: None,
        }
    }
}
