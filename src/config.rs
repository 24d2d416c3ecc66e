use std::{env, fmt, str::FromStr};

use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, Offset, Utc};

const DEFAULT_STORE_BASE_URL: &str = "https://shinyroad-us.backendless.app";
const DEFAULT_STORE_TABLE: &str = "formulir";
const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;
const DEFAULT_SOFFICE_BIN: &str = "libreoffice";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings resolved once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub admin_secret: AdminSecret,
    pub store: StoreSettings,
    pub report: ReportSettings,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct StoreSettings {
    pub base_url: String,
    pub table: String,
    pub page_size: u32,
}

#[derive(Clone, Debug)]
pub struct ReportSettings {
    pub utc_offset: FixedOffset,
    pub soffice_bin: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            utc_offset: offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|_| Utc.fix()),
            soffice_bin: DEFAULT_SOFFICE_BIN.to_string(),
        }
    }
}

/// Shared admin secret. Never printed.
#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(***)")
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so tests do not
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_secret = lookup("ADMIN_PASSWORD")
            .filter(|value| !value.is_empty())
            .map(AdminSecret::new)
            .context("ADMIN_PASSWORD env var is missing")?;

        let base_url = lookup("STORE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_STORE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let table = lookup("STORE_TABLE").unwrap_or_else(|| DEFAULT_STORE_TABLE.to_string());
        let page_size = parse_or(&lookup, "STORE_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(anyhow!("STORE_PAGE_SIZE must be greater than zero"));
        }

        let offset_hours = parse_or(&lookup, "REPORT_UTC_OFFSET_HOURS", DEFAULT_UTC_OFFSET_HOURS)?;
        let utc_offset = offset_from_hours(offset_hours)?;
        let soffice_bin =
            lookup("SOFFICE_BIN").unwrap_or_else(|| DEFAULT_SOFFICE_BIN.to_string());

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        Ok(Self {
            admin_secret,
            store: StoreSettings {
                base_url,
                table,
                page_size,
            },
            report: ReportSettings {
                utc_offset,
                soffice_bin,
            },
            port,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

fn offset_from_hours(hours: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| anyhow!("REPORT_UTC_OFFSET_HOURS out of range: {hours}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("ADMIN_PASSWORD", "rahasia")])).unwrap();

        assert!(config.admin_secret.matches("rahasia"));
        assert_eq!(config.store.base_url, DEFAULT_STORE_BASE_URL);
        assert_eq!(config.store.table, "formulir");
        assert_eq!(config.store.page_size, 100);
        assert_eq!(config.report.utc_offset.local_minus_utc(), 7 * 3600);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_secret_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(format!("{err}").contains("ADMIN_PASSWORD"));
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "x"),
            ("STORE_PAGE_SIZE", "banyak"),
        ]))
        .unwrap_err();
        assert!(format!("{err}").contains("STORE_PAGE_SIZE"));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ADMIN_PASSWORD", "x"),
            ("STORE_BASE_URL", "http://localhost:9000/"),
        ]))
        .unwrap();
        assert_eq!(config.store.base_url, "http://localhost:9000");
    }

    #[test]
    fn secret_is_not_leaked_by_debug() {
        let secret = AdminSecret::new("gppi");
        assert_eq!(format!("{secret:?}"), "AdminSecret(***)");
    }
}
