//! Field directives parsed from query parameters

use std::collections::HashSet;

use super::field::FieldMap;
use super::params::QueryLookup;
use crate::config::SelectorConfig;

/// The `fields` and `omit` directives of one request
///
/// # Format
/// - `?fields=id,name` keeps only `id` and `name`
/// - `?fields` or `?fields=` keeps nothing
/// - `?omit=email` drops `email`
/// - no `fields` parameter keeps everything not omitted
///
/// Empty tokens are dropped (`?fields=id,,name` equals `?fields=id,name`).
/// Tokens are matched verbatim, without trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDirectives {
    /// `None` when the allow-list parameter was not sent
    allowed: Option<HashSet<String>>,
    omitted: HashSet<String>,
}

impl FieldDirectives {
    /// Directives that keep every field
    pub fn none() -> Self {
        Self::default()
    }

    /// Read the directives from a parameter container
    ///
    /// A missing container yields no directives.
    pub fn from_params(params: Option<&dyn QueryLookup>, config: &SelectorConfig) -> Self {
        let Some(params) = params else {
            return Self::none();
        };

        let allowed = params
            .get_param(&config.fields_param)
            .map(|raw| split_names(raw, config.separator));
        let omitted = params
            .get_param(&config.omit_param)
            .map(|raw| split_names(raw, config.separator))
            .unwrap_or_default();

        Self { allowed, omitted }
    }

    /// Restrict the output to the given names
    pub fn allow<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the given names from the output
    pub fn omit<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omitted.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether the allow-list parameter was sent
    pub fn has_allow_list(&self) -> bool {
        self.allowed.is_some()
    }

    /// Whether a field survives both directives
    ///
    /// The deny check runs whatever the allow check says.
    pub fn keeps(&self, name: &str) -> bool {
        let allowed = self
            .allowed
            .as_ref()
            .is_none_or(|allowed| allowed.contains(name));
        let omitted = self.omitted.contains(name);
        allowed && !omitted
    }

    /// Filter a field mapping, preserving its order
    ///
    /// Names that only appear in the directives are ignored.
    pub fn apply(&self, fields: &FieldMap) -> FieldMap {
        fields
            .iter()
            .filter(|(name, _)| self.keeps(name))
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect()
    }
}

fn split_names(raw: &str, separator: char) -> HashSet<String> {
    raw.split(separator)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
