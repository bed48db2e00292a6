use std::fs::File;
use std::io::BufReader;

use restamp_config::Config;

/// Load the repo-default config.json when present, else built-in defaults
/// with environment overrides.
pub fn load_config() -> Config {
    match load_repo_default_config() {
        Ok(config) => {
            tracing::info!("Loaded config.json");
            config
        }
        Err(e) => {
            tracing::debug!("config.json not loaded ({e}), using defaults");
            Config::new()
        }
    }
}

fn load_repo_default_config() -> anyhow::Result<Config> {
    let file = File::open("config.json")?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}
