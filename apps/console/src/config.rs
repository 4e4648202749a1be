use std::{fs, path::Path};

pub const DEFAULT_CONFIG_FILE: &str = "employees.toml";

const ENV_OVERRIDES: [(&str, &str); 5] = [
    ("EMPLOYEE_API_URL", "api_base_url"),
    ("APP__API_BASE_URL", "api_base_url"),
    ("APP__PAGE_SIZE", "page_size"),
    ("APP__REQUEST_TIMEOUT_SECS", "request_timeout_secs"),
    ("APP__LOG_FILTER", "log_filter"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3003".into(),
            page_size: 5,
            request_timeout_secs: 10,
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then the config file, then the environment. Problems are
/// returned as warnings because logging is not set up yet at this point.
pub fn load_settings(config_path: Option<&Path>) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw, &mut warnings),
        Err(err) if config_path.is_some() => {
            warnings.push(format!("could not read {}: {err}", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, &mut warnings, |key| std::env::var(key).ok());
    (settings, warnings)
}

pub fn apply_file(settings: &mut Settings, raw: &str, warnings: &mut Vec<String>) {
    let table = match toml::from_str::<toml::Table>(raw) {
        Ok(table) => table,
        Err(err) => {
            warnings.push(format!("ignoring malformed config file: {err}"));
            return;
        }
    };

    for (key, value) in table {
        let value = match value {
            toml::Value::String(text) => text,
            other => other.to_string(),
        };
        apply_value(settings, &key, value, warnings);
    }
}

pub fn apply_env(
    settings: &mut Settings,
    warnings: &mut Vec<String>,
    lookup: impl Fn(&str) -> Option<String>,
) {
    for (var, key) in ENV_OVERRIDES {
        if let Some(value) = lookup(var) {
            apply_value(settings, key, value, warnings);
        }
    }
}

fn apply_value(settings: &mut Settings, key: &str, value: String, warnings: &mut Vec<String>) {
    match key {
        "api_base_url" => settings.api_base_url = value,
        "log_filter" => settings.log_filter = value,
        "page_size" => match value.trim().parse::<usize>() {
            Ok(size) if size > 0 => settings.page_size = size,
            _ => warnings.push(format!("page_size must be a positive integer, got {value:?}")),
        },
        "request_timeout_secs" => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => settings.request_timeout_secs = secs,
            _ => warnings.push(format!(
                "request_timeout_secs must be a positive integer, got {value:?}"
            )),
        },
        other => warnings.push(format!("ignoring unknown setting {other:?}")),
    }
}
