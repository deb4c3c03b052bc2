use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Run settings: defaults, then `ndca.toml` if present, then `NDCA_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub db_path: PathBuf,
    pub pretty: bool,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_sources(Some("ndca"), env_source())
    }

    fn from_sources(file: Option<&str>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("input", "source-data/ndca_2007_08_tesseract_full_vol_read.txt")?
            .set_default("output", "output.json")?
            .set_default("db_path", "data/ndca.sqlite")?
            .set_default("pretty", false)?;
        if let Some(name) = file {
            builder = builder.add_source(File::with_name(name).required(false));
        }
        let settings = builder.add_source(env).build()?.try_deserialize()?;
        Ok(settings)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("NDCA").try_parsing(true)
}
