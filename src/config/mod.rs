//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::error::FieldsError;

/// Configuration of the field selector
///
/// Every key is optional; the defaults give the usual
/// `?fields=id,name&omit=email` behavior.
///
/// ```yaml
/// fields_param: fields
/// omit_param: exclude
/// separator: ","
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Name of the allow-list query parameter
    pub fields_param: String,

    /// Name of the deny-list query parameter
    pub omit_param: String,

    /// Separator between field names inside one parameter
    pub separator: char,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            fields_param: "fields".to_string(),
            omit_param: "omit".to_string(),
            separator: ',',
        }
    }
}

impl SelectorConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both parameters can be told apart
    pub fn validate(&self) -> Result<(), FieldsError> {
        if self.fields_param.is_empty() {
            return Err(FieldsError::Config(
                "fields_param must not be empty".to_string(),
            ));
        }
        if self.omit_param.is_empty() {
            return Err(FieldsError::Config("omit_param must not be empty".to_string()));
        }
        if self.fields_param == self.omit_param {
            return Err(FieldsError::Config(format!(
                "fields_param and omit_param must differ (both are '{}')",
                self.fields_param
            )));
        }
        Ok(())
    }
}
