use crate::error::{AppError, Result};
use crate::regions::Region;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub mode: Mode,
    pub source: SourceConfig,
    #[serde(default = "default_region")]
    pub region: String,
}

/// Whether the pipeline should run at all. Maintenance mode is checked
/// once at startup by the binary; the core pipeline only ever runs in
/// active mode and never sees this flag.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Active,
    Maintenance,
}

fn default_region() -> String {
    "mexico".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub country: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_limit() -> u32 {
    200
}

fn default_request_timeout() -> u64 {
    15
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        // Substitute environment variables
        let expanded = expand_env_vars(&content)?;

        let config: Config = serde_yaml::from_str(&expanded)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// The configured region, parsed from its config-file name.
    pub fn region(&self) -> Result<Region> {
        Region::from_name(&self.region)
    }

    /// Validate configuration values
    ///
    /// Checks for:
    /// - Unexpanded environment variables
    /// - Valid HTTPS base URL
    /// - Two-letter country code
    /// - Positive result limit and timeout
    /// - Known region name
    fn validate(&self) -> Result<()> {
        if self.source.base_url.contains("${") {
            return Err(AppError::Config(
                "SOURCE_BASE_URL environment variable is not set. \
                 Please set it or create a .env file. \
                 See .env.example for required variables."
                    .to_string(),
            ));
        }

        // Validate base URL format
        if let Err(e) = url::Url::parse(&self.source.base_url) {
            return Err(AppError::Config(format!(
                "Invalid source base_url '{}': {}",
                self.source.base_url, e
            )));
        }

        // Validate base URL is HTTPS
        if let Ok(parsed) = url::Url::parse(&self.source.base_url) {
            if parsed.scheme() != "https" {
                return Err(AppError::Config(format!(
                    "Source base_url must use HTTPS, got: {}",
                    parsed.scheme()
                )));
            }
        }

        // Validate country code is 2 uppercase characters
        if self.source.country.len() != 2
            || !self
                .source
                .country
                .chars()
                .all(|c| c.is_ascii_uppercase())
        {
            return Err(AppError::Config(format!(
                "Country code '{}' must be exactly 2 uppercase characters (e.g., 'MX')",
                self.source.country
            )));
        }

        if self.source.limit == 0 {
            return Err(AppError::Config(
                "Source limit must be greater than 0".to_string(),
            ));
        }

        if self.source.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "Source request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        // Validate region name is known
        Region::from_name(&self.region)?;

        Ok(())
    }
}

fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}").unwrap();

    let mut missing_vars = Vec::new();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(value) => {
                result = result.replace(&cap[0], &value);
            }
            Err(_) => {
                missing_vars.push(var_name.to_string());
            }
        }
    }

    if !missing_vars.is_empty() {
        return Err(AppError::Config(format!(
            "Missing required environment variable{}: {}\n\n\
             To fix this:\n\
             1. Create a .env file in the project root (copy .env.example)\n\
             2. Set the missing variable{}: export {}=<value>\n\
             3. Or set {} in your environment before running",
            if missing_vars.len() > 1 { "s" } else { "" },
            missing_vars.join(", "),
            if missing_vars.len() > 1 { "s" } else { "" },
            missing_vars[0],
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_yaml() -> &'static str {
        r#"
source:
  base_url: https://api.openaq.org/v2/latest
  country: MX
"#
    }

    #[test]
    fn test_parse_minimal_config_with_defaults() {
        let config: Config = serde_yaml::from_str(base_yaml()).unwrap();
        assert_eq!(config.mode, Mode::Active);
        assert_eq!(config.region, "mexico");
        assert_eq!(config.source.limit, 200);
        assert_eq!(config.source.request_timeout_secs, 15);
    }

    #[test]
    fn test_parse_maintenance_mode() {
        let yaml = r#"
mode: maintenance
source:
  base_url: https://api.openaq.org/v2/latest
  country: MX
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mode, Mode::Maintenance);
    }

    #[test]
    fn test_validate_rejects_http_url() {
        let yaml = r#"
source:
  base_url: http://api.openaq.org/v2/latest
  country: MX
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("HTTPS"));
    }

    #[test]
    fn test_validate_rejects_bad_country_code() {
        let yaml = r#"
source:
  base_url: https://api.openaq.org/v2/latest
  country: mex
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_region() {
        let yaml = r#"
region: jalisco
source:
  base_url: https://api.openaq.org/v2/latest
  country: MX
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_good_config() {
        let config: Config = serde_yaml::from_str(base_yaml()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.region().unwrap(), Region::Mexico);
    }

    #[test]
    fn test_expand_env_vars_substitutes_value() {
        std::env::set_var("OPENAQ_INGEST_TEST_COUNTRY", "MX");
        let expanded = expand_env_vars("country: ${OPENAQ_INGEST_TEST_COUNTRY}").unwrap();
        assert_eq!(expanded, "country: MX");
    }

    #[test]
    fn test_expand_env_vars_reports_missing_variable() {
        let result = expand_env_vars("country: ${OPENAQ_INGEST_TEST_UNSET_VAR}");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("OPENAQ_INGEST_TEST_UNSET_VAR"));
    }
}
