use crate::args::ArgumentOptions;
use anyhow::{anyhow, Context as _, Result};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/framed/config.toml";

/// Bot configuration
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub general: General,
    /// Argument parsing used by commands that don't ask for anything else
    #[serde(default)]
    pub arguments: ArgumentOptions,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct General {
    pub discord_token: String,
    /// Global usernames allowed to run owner-only commands
    #[serde(default)]
    pub bot_owners: Vec<String>,
    pub command_prefixes: Vec<String>,
    /// Also accept `@bot` as a prefix
    #[serde(default)]
    pub mention_prefix: bool,
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.general.command_prefixes.iter().all(String::is_empty) {
            return Err(anyhow!("At least one non-empty command prefix is required"));
        }
        Ok(config)
    }

    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut file = tokio::fs::File::open(&path).await.with_context(|| {
            format!("Could not open configuration at `{}`", path.to_string_lossy())
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).await.with_context(|| {
            format!("Could not read configuration at `{}`", path.to_string_lossy())
        })?;

        Self::parse(&contents).with_context(|| {
            format!("Could not parse configuration at `{}`", path.to_string_lossy())
        })
    }

    pub async fn reload(&mut self) -> Result<()> {
        let new = Self::load().await?;
        *self = new;
        Ok(())
    }
}
