use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;

/// Display information about favorite apps.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "glance", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ~/.glance/config.yaml)
    #[arg(long, env = "GLANCE_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// API token (overrides api.token from the config file)
    #[arg(long, env = "GLANCE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the collected dashboard as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        config_path(self.config.clone())
    }
}

pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".glance").join("config.yaml");
    }

    PathBuf::from("glance-config.yaml")
}
