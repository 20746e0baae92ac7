//! # Kubernetes record conversion CLI
//!
//! Command line tool to convert, check and describe API records.

use std::ffi::OsString;
use std::io::{Read, Write};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fn_error_context::context;

use crate::catalog::Catalog;
use crate::codec::EncodeOptions;
use crate::config::{load_config, OutputConfiguration, SYSTEMD_CONVENTIONAL_BASES};
use crate::Format;

/// Decode a document as a record and encode it again
#[derive(Debug, Parser)]
pub(crate) struct ConvertOpts {
    /// The record to decode as, e.g. `Service` or `v1/Service`
    #[clap(long, short = 'r')]
    pub(crate) record: String,

    /// The input format; guessed from the file extension or contents if not given
    #[clap(long, value_enum)]
    pub(crate) from: Option<Format>,

    /// The output format; defaults to the configured format, or YAML
    #[clap(long, value_enum)]
    pub(crate) to: Option<Format>,

    /// Indent JSON output
    #[clap(long)]
    pub(crate) pretty: bool,

    /// Input file; read from standard input if omitted
    pub(crate) input: Option<Utf8PathBuf>,
}

/// Decode a document and report keys which match no field
#[derive(Debug, Parser)]
pub(crate) struct CheckOpts {
    /// The record to decode as
    #[clap(long, short = 'r')]
    pub(crate) record: String,

    /// The input format; guessed from the file extension or contents if not given
    #[clap(long, value_enum)]
    pub(crate) from: Option<Format>,

    /// Fail if the document has any unknown keys.
    ///
    /// Unknown keys are normally tolerated, as they are expected when
    /// reading documents written against a newer API version.
    #[clap(long)]
    pub(crate) deny_unknown_keys: bool,

    /// Input file; read from standard input if omitted
    pub(crate) input: Option<Utf8PathBuf>,
}

/// Convert Kubernetes API records between JSON and YAML.
///
/// Documents are decoded against a known record type: keys are matched by
/// their wire names, keys the record does not define are dropped, and absent
/// fields stay absent in the output.
#[derive(Debug, Parser)]
#[clap(name = "kubewire")]
#[clap(rename_all = "kebab-case")]
#[clap(version)]
pub(crate) enum Opt {
    /// Decode a document and encode it again, possibly in another format.
    ///
    /// Unknown keys are dropped, and logged as warnings unless disabled in
    /// the `[output]` configuration.
    Convert(ConvertOpts),
    /// Decode a document and print any unknown keys, one per line.
    Check(CheckOpts),
    /// List the known records
    Records,
    /// Print the wire names of a record's fields in declaration order
    Fields {
        /// The record, e.g. `EndpointPort`
        record: String,
    },
    /// Print the JSON schema of a record
    Schema {
        /// The record, e.g. `EndpointPort`
        record: String,
    },
}

/// A document read from a file or standard input.
#[derive(Debug)]
struct Input {
    text: String,
    format: Format,
}

impl Input {
    fn new(text: String, path: Option<&Utf8Path>, from: Option<Format>) -> Self {
        let format = from
            .or_else(|| path.and_then(Format::from_path))
            .unwrap_or_else(|| Format::sniff(&text));
        tracing::debug!("Input format: {format}");
        Self { text, format }
    }
}

#[context("Reading input")]
fn read_input(path: Option<&Utf8Path>, from: Option<Format>) -> Result<Input> {
    let text = if let Some(path) = path {
        std::fs::read_to_string(path).with_context(|| format!("Reading {path}"))?
    } else {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    };
    Ok(Input::new(text, path, from))
}

fn convert(
    catalog: &Catalog,
    config: &OutputConfiguration,
    opts: &ConvertOpts,
    input: &Input,
    out: &mut dyn Write,
) -> Result<()> {
    let entry = catalog.get(&opts.record)?;
    let to = opts.to.unwrap_or_else(|| config.format());
    let options = EncodeOptions {
        pretty: opts.pretty || config.pretty(),
    };
    let r = entry
        .transcode(&input.text, input.format, to, &options)
        .with_context(|| format!("Converting {}", entry.name()))?;
    if config.warn_unknown_keys() {
        for key in r.unknown_keys.iter() {
            tracing::warn!("{}: dropping unknown key {key}", entry.name());
        }
    }
    let text = r.document.as_str();
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn check(catalog: &Catalog, opts: &CheckOpts, input: &Input, out: &mut dyn Write) -> Result<()> {
    let entry = catalog.get(&opts.record)?;
    let unknown = entry
        .check(&input.text, input.format)
        .with_context(|| format!("Checking {}", entry.name()))?;
    for key in unknown.iter() {
        writeln!(out, "{key}")?;
    }
    if opts.deny_unknown_keys && !unknown.is_empty() {
        anyhow::bail!(
            "Found {} unknown key(s) for {}",
            unknown.len(),
            entry.name()
        );
    }
    Ok(())
}

fn records(catalog: &Catalog, out: &mut dyn Write) -> Result<()> {
    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::NOTHING)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic)
        .set_header(["GROUP/VERSION", "NAME", "FIELDS"]);
    for entry in catalog.entries() {
        table.add_row([
            entry.group_version().to_string(),
            entry.name().to_string(),
            entry.fields().len().to_string(),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

fn fields(catalog: &Catalog, record: &str, out: &mut dyn Write) -> Result<()> {
    let entry = catalog.get(record)?;
    for name in entry.fields().wire_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn schema(catalog: &Catalog, record: &str, out: &mut dyn Write) -> Result<()> {
    let entry = catalog.get(record)?;
    serde_json::to_writer_pretty(&mut *out, &entry.json_schema())?;
    writeln!(out)?;
    Ok(())
}

/// Parse the provided arguments and execute.
/// Calls [`clap::Error::exit`] on failure, printing the error message and aborting the program.
pub fn run_from_iter<I>(args: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    run_from_opt(Opt::parse_from(args))
}

/// Internal (non-generic/monomorphized) primary CLI entrypoint
fn run_from_opt(opt: Opt) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match opt {
        Opt::Convert(opts) => {
            let config = load_config(SYSTEMD_CONVENTIONAL_BASES)?;
            let input = read_input(opts.input.as_deref(), opts.from)?;
            convert(&catalog, &config, &opts, &input, &mut out)?;
        }
        Opt::Check(opts) => {
            let input = read_input(opts.input.as_deref(), opts.from)?;
            check(&catalog, &opts, &input, &mut out)?;
        }
        Opt::Records => records(&catalog, &mut out)?,
        Opt::Fields { record } => fields(&catalog, &record, &mut out)?,
        Opt::Schema { record } => schema(&catalog, &record, &mut out)?,
    }
    out.flush().context("Writing to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use similar_asserts::assert_eq;

    use super::*;

    fn convert_opts(args: &[&str]) -> ConvertOpts {
        match Opt::parse_from(["kubewire", "convert"].iter().chain(args)) {
            Opt::Convert(o) => o,
            o => panic!("Expected convert, found {o:?}"),
        }
    }

    fn run_convert(
        opts: &ConvertOpts,
        config: &OutputConfiguration,
        text: &str,
    ) -> Result<String> {
        let catalog = Catalog::builtin()?;
        let input = Input::new(text.to_owned(), opts.input.as_deref(), opts.from);
        let mut out = Vec::new();
        convert(&catalog, config, opts, &input, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_parse_opts() {
        let o = convert_opts(&["-r", "Service", "--to", "json", "svc.yml"]);
        assert_eq!(o.record, "Service");
        assert_eq!(o.from, None);
        assert_eq!(o.to, Some(Format::Json));
        assert_eq!(o.input.as_deref(), Some(Utf8Path::new("svc.yml")));
        let o = convert_opts(&["--record", "Lease", "--from", "yml"]);
        assert_eq!(o.from, Some(Format::Yaml));
        assert!(o.input.is_none());
        assert!(Opt::try_parse_from(["kubewire", "convert", "--to", "xml", "-r", "Lease"]).is_err());
    }

    #[test]
    fn test_convert_json_to_yaml() -> Result<()> {
        let opts = convert_opts(&["-r", "EndpointPort"]);
        let out = run_convert(
            &opts,
            &Default::default(),
            r#"{"port": 8080, "unused": "x", "appProtocol": "http"}"#,
        )?;
        assert_eq!(out, "appProtocol: http\nport: 8080\n");
        Ok(())
    }

    #[test]
    fn test_convert_uses_config() -> Result<()> {
        let opts = convert_opts(&["-r", "EndpointPort"]);
        let config = OutputConfiguration {
            format: Some(Format::Json),
            pretty: Some(true),
            warn_unknown_keys: Some(false),
        };
        let out = run_convert(&opts, &config, "port: 8080\n")?;
        assert_eq!(out, "{\n  \"port\": 8080\n}\n");
        // The command line wins over the configuration
        let opts = convert_opts(&["-r", "EndpointPort", "--to", "yaml"]);
        let out = run_convert(&opts, &config, "port: 8080\n")?;
        assert_eq!(out, "port: 8080\n");
        Ok(())
    }

    #[test]
    fn test_convert_errors() {
        let opts = convert_opts(&["-r", "EndpointPort"]);
        let e = run_convert(&opts, &Default::default(), r#"{"port": "#).unwrap_err();
        let msg = format!("{e:#}");
        assert!(msg.contains("Converting EndpointPort"), "{msg}");
        assert!(msg.contains("Malformed JSON document"), "{msg}");

        let opts = convert_opts(&["-r", "Pod"]);
        let e = run_convert(&opts, &Default::default(), "{}").unwrap_err();
        assert!(format!("{e:#}").contains("Unknown record \"Pod\""));
    }

    #[test]
    fn test_check() -> Result<()> {
        let catalog = Catalog::builtin()?;
        let text = indoc! {"
            port: 80
            colour: blue
        "};
        let input = Input::new(text.to_owned(), None, None);
        assert_eq!(input.format, Format::Yaml);
        let opts = CheckOpts {
            record: "EndpointPort".into(),
            from: None,
            deny_unknown_keys: false,
            input: None,
        };
        let mut out = Vec::new();
        check(&catalog, &opts, &input, &mut out)?;
        assert_eq!(String::from_utf8(out)?, "colour\n");

        let opts = CheckOpts {
            deny_unknown_keys: true,
            ..opts
        };
        let mut out = Vec::new();
        assert!(check(&catalog, &opts, &input, &mut out).is_err());
        Ok(())
    }

    #[test]
    fn test_fields_and_records() -> Result<()> {
        let catalog = Catalog::builtin()?;
        let mut out = Vec::new();
        fields(&catalog, "v1/EndpointPort", &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "appProtocol\nname\nport\nprotocol\n"
        );
        let mut out = Vec::new();
        records(&catalog, &mut out)?;
        let out = String::from_utf8(out)?;
        assert!(out.contains("GROUP/VERSION"));
        assert!(out.contains("coordination.k8s.io/v1"));
        assert!(out.contains("HorizontalPodAutoscaler"));
        Ok(())
    }

    #[test]
    fn test_schema() -> Result<()> {
        let catalog = Catalog::builtin()?;
        let mut out = Vec::new();
        schema(&catalog, "EndpointPort", &mut out)?;
        let v: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(v["title"], "EndpointPort");
        assert!(v["properties"]["appProtocol"].is_object());
        Ok(())
    }
}
