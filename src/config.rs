use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Glob patterns, relative to the source root, selecting MR data files
    #[serde(default = "default_transfer_globs")]
    pub transfer_globs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self { transfer_globs: default_transfer_globs() }
    }
}

fn default_transfer_globs() -> Vec<String> {
    vec!["**/*.dcm".to_string(), "**/[MS]R*".to_string()]
}
