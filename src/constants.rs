//! Constants used throughout the application.

use std::time::Duration;

/// RPC connection timeout for Neovim instances
pub const NEOVIM_RPC_TIMEOUT: Duration = Duration::from_secs(2);

/// Upper bound a pre-save hook waits for the host before letting the write through
pub const SAVE_HOOK_WAIT_MS: u64 = 30_000;

/// File extensions eligible for formatting (matched exactly, with the dot)
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".js", ".jsx"];

/// Project manifest looked up when walking towards the filesystem root
pub const MANIFEST_FILE: &str = "package.json";

/// Manifest section holding development dependencies
pub const DEV_DEPENDENCIES: &str = "devDependencies";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "standard-formatter";

/// Settings file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the settings file location
pub const CONFIG_ENV_VAR: &str = "STANDARD_FORMATTER_CONFIG";

/// Name of the user command registered in Neovim
pub const COMMAND_NAME: &str = "StandardFormat";

/// Autocommand group owning every registration made by the host
pub const AUGROUP_NAME: &str = "StandardFormatter";

/// Buffer variable used to hold a write until the host has formatted it
pub const PENDING_VAR: &str = "standard_formatter_pending";

/// Global variable naming the RPC channel that owns the registrations
pub const OWNER_VAR: &str = "standard_formatter_channel";
