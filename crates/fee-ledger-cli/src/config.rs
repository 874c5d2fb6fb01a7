use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "\u{20B9}";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize)]
pub struct FeeLedgerConfig {
    pub ledger: LedgerSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl FeeLedgerConfig {
    pub fn new(ledger_path: &Path, currency_symbol: Option<String>) -> Self {
        let mut display = DisplaySection::default();
        if let Some(symbol) = currency_symbol {
            display.currency_symbol = symbol;
        }
        Self {
            ledger: LedgerSection {
                path: ledger_path.to_string_lossy().to_string(),
            },
            display,
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_ledger_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("fees.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<FeeLedgerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &FeeLedgerConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("feeledger"));
        }
    }
    Ok(home_dir()?.join(".config").join("feeledger"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("feeledger"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("feeledger"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_section_defaults_when_missing() {
        let config: FeeLedgerConfig =
            toml::from_str("[ledger]\npath = \"/tmp/fees.db\"\n").expect("parse");
        assert_eq!(config.ledger.path, "/tmp/fees.db");
        assert_eq!(config.display.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
        assert_eq!(config.display.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_partial_display_section() {
        let config: FeeLedgerConfig = toml::from_str(
            "[ledger]\npath = \"fees.db\"\n\n[display]\ncurrency_symbol = \"Rs \"\n",
        )
        .expect("parse");
        assert_eq!(config.display.currency_symbol, "Rs ");
        assert_eq!(config.display.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let config = FeeLedgerConfig::new(Path::new("/data/fees.db"), Some("$".to_string()));
        write_config(&path, &config).expect("write");

        let loaded = read_config(&path).expect("read");
        assert_eq!(loaded.ledger.path, "/data/fees.db");
        assert_eq!(loaded.display.currency_symbol, "$");
    }
}
