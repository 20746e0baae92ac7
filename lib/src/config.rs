//! # Configuration for the `kubewire` CLI
//!
//! Defaults for output are read from TOML drop-in fragments under
//! `kubewire/` in the usual systemd-style base directories, e.g.
//! `/etc/kubewire/10-output.toml`.  Fragments are applied in name order,
//! later values overriding earlier ones.

use anyhow::{Context, Result};
use fn_error_context::context;
use serde::{Deserialize, Serialize};

use crate::Format;

/// Directories scanned for `kubewire/*.toml`, lowest priority first.
pub(crate) const SYSTEMD_CONVENTIONAL_BASES: &[&str] =
    &["/usr/lib", "/usr/local/lib", "/etc", "/run"];

/// The toplevel config entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub(crate) struct ConfigurationToplevel {
    pub(crate) output: Option<OutputConfiguration>,
}

/// The serialized [output] section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename = "output", rename_all = "kebab-case")]
pub(crate) struct OutputConfiguration {
    /// Format used when `--to` is not given
    pub(crate) format: Option<Format>,
    /// Indent JSON output
    pub(crate) pretty: Option<bool>,
    /// Log keys dropped during conversion
    pub(crate) warn_unknown_keys: Option<bool>,
}

impl OutputConfiguration {
    /// Apply any values in other, overriding any existing values in `self`.
    fn merge(&mut self, other: Self) {
        fn mergeopt<T>(s: &mut Option<T>, o: Option<T>) {
            if let Some(o) = o {
                *s = Some(o);
            }
        }
        mergeopt(&mut self.format, other.format);
        mergeopt(&mut self.pretty, other.pretty);
        mergeopt(&mut self.warn_unknown_keys, other.warn_unknown_keys);
    }

    pub(crate) fn format(&self) -> Format {
        self.format.unwrap_or_default()
    }

    pub(crate) fn pretty(&self) -> bool {
        self.pretty.unwrap_or(false)
    }

    pub(crate) fn warn_unknown_keys(&self) -> bool {
        self.warn_unknown_keys.unwrap_or(true)
    }
}

/// Parse one fragment, logging keys we don't understand.
fn parse_fragment(buf: &str, origin: &str) -> Result<ConfigurationToplevel> {
    let mut unused = std::collections::BTreeSet::new();
    let de = toml::Deserializer::new(buf);
    let c: ConfigurationToplevel = serde_ignored::deserialize(de, |path| {
        unused.insert(path.to_string());
    })
    .with_context(|| format!("Parsing {origin}"))?;
    for key in unused {
        tracing::warn!("{origin}: Unknown key {key}");
    }
    Ok(c)
}

#[context("Loading configuration")]
/// Load the output configuration, merging all found configuration files.
/// Having no configuration at all is fine.
pub(crate) fn load_config(bases: &[&str]) -> Result<OutputConfiguration> {
    let fragments = liboverdrop::scan(bases, "kubewire", &["toml"], true);
    let mut config = OutputConfiguration::default();
    for (_name, path) in fragments {
        let buf = std::fs::read_to_string(&path).with_context(|| format!("Reading {path:?}"))?;
        let c = parse_fragment(&buf, &format!("{path:?}"))?;
        if let Some(output) = c.output {
            tracing::debug!("Merging output config: {output:?}");
            config.merge(output);
        }
    }
    Ok(config)
}
