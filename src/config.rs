use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub fov: FovConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub test_data: TestDataConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct FovConfig {
    /// Sight radius in hexes for free-standing queries
    #[serde(default = "default_fov_radius")]
    pub radius: i32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct MapConfig {
    /// Text layout to render; empty means the built-in demo map
    #[serde(default)]
    pub path: String,
    /// Radius of the demo map
    #[serde(default = "default_map_radius")]
    pub radius: i32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// env_logger filter, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct TestDataConfig {
    #[serde(default = "default_test_data_dir")]
    pub dir: String,
}

// Default values
fn default_fov_radius() -> i32 { 8 }
fn default_map_radius() -> i32 { 6 }
fn default_log_level() -> String { "info".to_string() }
fn default_test_data_dir() -> String { "test_data".to_string() }

impl Default for FovConfig {
    fn default() -> Self {
        Self {
            radius: default_fov_radius(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            radius: default_map_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TestDataConfig {
    fn default() -> Self {
        Self {
            dir: default_test_data_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fov: FovConfig::default(),
            map: MapConfig::default(),
            logging: LoggingConfig::default(),
            test_data: TestDataConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it is missing
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    /// Load configuration from `path`, falling back to defaults on any problem.
    /// Runs before the logger exists, so problems go to stderr.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
