use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub timing: TimingConfig,
    pub table: TableConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Used when no base URL is stored in the browser
    pub base_url: String,
    pub tenant_header: String,
    pub tenant_id: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    /// Delay before a scheduled logout fires
    pub logout_debounce_ms: u32,
    /// Pause between consecutive browser downloads
    pub download_delay_ms: u32,
    pub search_debounce_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub page_size_options: Vec<usize>,
    pub default_page_size: usize,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8000/api"
tenant_header = "X-Tenant-ID"
tenant_id = "dental-lab-admin"

[timing]
logout_debounce_ms = 1500
download_delay_ms = 500
search_debounce_ms = 300

[table]
page_size_options = [10, 25, 50, 100]
default_page_size = 10
"#;

static CONFIG: Lazy<AppConfig> = Lazy::new(|| match load_config(DEFAULT_CONFIG) {
    Ok(config) => config,
    Err(e) => {
        log::error!("Embedded configuration is invalid: {}", e);
        AppConfig::fallback()
    }
});

/// Parse configuration from TOML text
pub fn load_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Process-wide configuration
pub fn config() -> &'static AppConfig {
    &CONFIG
}

impl AppConfig {
    fn fallback() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
                tenant_header: "X-Tenant-ID".to_string(),
                tenant_id: String::new(),
            },
            timing: TimingConfig {
                logout_debounce_ms: 1500,
                download_delay_ms: 500,
                search_debounce_ms: 300,
            },
            table: TableConfig {
                page_size_options: vec![10, 25, 50, 100],
                default_page_size: 10,
            },
        }
    }
}
