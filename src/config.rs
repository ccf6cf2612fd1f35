use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for history-graph.
///
/// Covers the external-reference URL bases used in emitted graphs, the
/// external binaries invoked per package, and the release-tag filter pattern.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub urls: UrlsConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// URL bases for cross-reference links in emitted graphs.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UrlsConfig {
    #[serde(default = "default_pull_request_url")]
    pub pull_request: String,

    #[serde(default = "default_release_tag_url")]
    pub release_tag: String,
}

fn default_pull_request_url() -> String {
    "https://github.com/cms-sw/cmssw/pull".to_string()
}

fn default_release_tag_url() -> String {
    "https://github.com/cms-sw/cmssw/releases/tag".to_string()
}

impl Default for UrlsConfig {
    fn default() -> Self {
        UrlsConfig {
            pull_request: default_pull_request_url(),
            release_tag: default_release_tag_url(),
        }
    }
}

/// Settings for the external revision-log collaborator.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_git_binary")]
    pub binary: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Regex selecting release tags out of decorated log output.
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    r"CMSSW_[0-9]+_[0-9]+_[0-9]+(?:_pre[0-9]+)?".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            binary: default_git_binary(),
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
        }
    }
}

/// Settings for the external graph-rendering collaborator.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_dot_binary")]
    pub dot_binary: String,
}

fn default_dot_binary() -> String {
    "dot".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            dot_binary: default_dot_binary(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            urls: UrlsConfig::default(),
            git: GitConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `historygraph.toml` in current directory
/// 3. `~/.config/.historygraph.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./historygraph.toml").exists() {
        fs::read_to_string("./historygraph.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".historygraph.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;

    // Reject an unusable tag pattern up front rather than per package.
    regex::Regex::new(&config.git.tag_pattern)
        .map_err(|e| format!("invalid tag_pattern: {}", e))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls_point_at_cmssw() {
        let config = Config::default();
        assert!(config.urls.pull_request.contains("cms-sw/cmssw/pull"));
        assert!(config.urls.release_tag.contains("releases/tag"));
    }

    #[test]
    fn test_default_binaries() {
        let config = Config::default();
        assert_eq!(config.git.binary, "git");
        assert_eq!(config.git.remote, "origin");
        assert_eq!(config.render.dot_binary, "dot");
    }

    #[test]
    fn test_default_tag_pattern_compiles() {
        let config = Config::default();
        let re = regex::Regex::new(&config.git.tag_pattern).unwrap();
        assert!(re.is_match("CMSSW_11_2_0_pre6"));
        assert!(re.is_match("CMSSW_11_2_0"));
        assert!(!re.is_match("release-1.2.3"));
    }
}
