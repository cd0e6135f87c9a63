use crate::error::ConfigError;

/// Denylist of filename prefixes excluded from materialization.
#[derive(Debug, Clone, Default)]
pub struct FilenameFilter {
    prefixes: Vec<String>,
}

impl FilenameFilter {
    pub fn new(prefixes: Vec<String>) -> Result<Self, ConfigError> {
        if prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyFilterPrefix);
        }
        Ok(Self { prefixes })
    }

    pub fn is_denied(&self, filename: &str) -> bool {
        self.prefixes.iter().any(|p| filename.starts_with(p.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}
