use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    /// Grading policy file; `None` means built-in defaults.
    pub grading_config_path: Option<String>,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Reads the variables without touching the global instance.
    pub fn from_env() -> Self {
        let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "grade-calculator".into());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "calculator.log".into());
        let log_to_stdout = env::var("LOG_TO_STDOUT")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let grading_config_path = env::var("GRADING_CONFIG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty());

        Config {
            project_name,
            log_level,
            log_file,
            log_to_stdout,
            grading_config_path,
        }
    }

    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_init(Config::from_env)
    }
}
