//! Wire format selection.

use std::fmt::Display;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// A textual wire format.  Both formats share the same key mapping and
/// optional-field rules; they differ only in grammar.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON
    Json,
    /// YAML; block style, fields in declaration order
    #[default]
    #[value(alias = "yml")]
    Yaml,
}

impl Format {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        match path.extension()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guess the format from document contents.  A JSON document for a
    /// record always starts with `{`; anything else is treated as YAML.
    pub fn sniff(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }

    /// The canonical upper-case name, used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            Format::from_path(Utf8Path::new("svc.json")),
            Some(Format::Json)
        );
        assert_eq!(
            Format::from_path(Utf8Path::new("/etc/foo/lease.yml")),
            Some(Format::Yaml)
        );
        assert_eq!(Format::from_path(Utf8Path::new("lease.toml")), None);
        assert_eq!(Format::from_path(Utf8Path::new("lease")), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(Format::sniff("  \n{\"port\": 1}"), Format::Json);
        assert_eq!(Format::sniff("port: 1\n"), Format::Yaml);
        assert_eq!(Format::sniff(""), Format::Yaml);
    }
}
