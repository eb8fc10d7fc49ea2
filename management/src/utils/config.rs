use crate::utils::logging::*;
use common::grading::utils::match_policy::MatchPolicy;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;

const CONFIG_PATH: &str = "./management.toml";

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

#[derive(Serialize, Deserialize, Debug)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub internal_timestamp: u64, //milliseconds
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub grading_workers: usize,
    pub match_threshold: f64, //IoU
    pub class_aware_matching: bool,
    pub import_folder: String, //path, empty to skip
}

impl Config {
    pub fn new() -> Self {
        //Seriously, the program must be terminated.
        let toml_string = match fs::read_to_string(CONFIG_PATH) {
            Ok(toml_string) => toml_string,
            Err(err) => {
                logging_console!(emergency_entry!("Config", SystemEntry::ConfigNotFound, format!("Err: {err}")));
                panic!("{}", SystemEntry::ConfigNotFound);
            }
        };
        match Self::parse(&toml_string) {
            Ok(config) => config,
            Err(err) => {
                logging_console!(emergency_entry!("Config", SystemEntry::InvalidConfig, format!("Err: {err}")));
                panic!("{}", SystemEntry::InvalidConfig);
            }
        }
    }

    pub fn parse(toml_string: &str) -> Result<Config, String> {
        let config = toml::from_str::<ConfigTable>(toml_string)
            .map_err(|err| err.to_string())?
            .config;
        config.validate()?;
        Ok(config)
    }

    pub async fn now() -> Config {
        CONFIG.read().await.clone()
    }

    pub async fn update(config: Config) {
        *CONFIG.write().await = config
    }

    pub fn save(&self) -> Result<(), String> {
        let config_table = ConfigTable { config: self.clone() };
        let toml_string = toml::to_string_pretty(&config_table).map_err(IOEntry::TomlSerializeError)?;
        let path = Path::new(CONFIG_PATH);
        fs::write(path, toml_string).map_err(|err| IOEntry::WriteFileError(path.display(), err))?;
        Ok(())
    }

    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy::new(self.match_threshold).class_aware(self.class_aware_matching)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !Self::validate_milliseconds(self.internal_timestamp) {
            return Err(format!("internal_timestamp must be within 1..=60000, got {}", self.internal_timestamp));
        }
        if !Self::validate_seconds(self.bind_retry_duration) {
            return Err(format!("bind_retry_duration must be at most 3600, got {}", self.bind_retry_duration));
        }
        if !(1..=64).contains(&self.grading_workers) {
            return Err(format!("grading_workers must be within 1..=64, got {}", self.grading_workers));
        }
        self.match_policy().validate()?;
        Ok(())
    }

    fn validate_milliseconds(milliseconds: u64) -> bool {
        (1..=60000).contains(&milliseconds)
    }

    fn validate_seconds(seconds: u64) -> bool {
        seconds <= 3600
    }
}
