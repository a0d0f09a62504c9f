use anyhow::{Context, Result};
use multisearch_infrastructure::ConfigService;

pub fn show(config_service: &ConfigService) -> Result<()> {
    let config = config_service
        .load()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    println!("# {}", config_service.path().display());
    print!("{rendered}");
    if config.is_simulation() {
        println!("# webhook_url is not set: searches run in simulation mode");
    }
    Ok(())
}

pub fn path(config_service: &ConfigService) {
    println!("{}", config_service.path().display());
}
