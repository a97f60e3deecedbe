//! `demo-embed` command line
//!
//! Resolves single markers, scans pages and drives the headless viewer
//! harness. Argument parsing lives here so the binary stays a thin shell.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use embed_resolver::{NavigationFragment, ResolvedDemo, Resolver, SiteRoot};
use embed_scanner::{EmbedOutcome, Page, PageFormat, ScannedMarker, Scanner, ScannerConfig};
use embed_viewer::harness::{run_simulation, HeadlessPlatform, RequestPolicy, ViewerEvent};
use embed_viewer::{DeviceProfile, Vendor};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Text to print and whether the command succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Rendered output
    pub text: String,
    /// Exit successfully
    pub success: bool,
}

impl Output {
    fn new(text: String, success: bool) -> Self {
        Self { text, success }
    }
}

/// Install the stderr tracing subscriber
///
/// Honors `RUST_LOG`; `DEMO_EMBED_LOG_JSON=1` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let json = std::env::var("DEMO_EMBED_LOG_JSON").is_ok_and(|v| v == "1");
    if json {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}

/// Command line definition
#[must_use]
pub fn command() -> Command {
    Command::new("demo-embed")
        .version(embed_resolver::VERSION)
        .about("Resolve and inspect interactive demo embeds")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("no-scene-arg")
                .long("no-scene-arg")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Never append ?scene= to demo URLs"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve one marker")
                .arg(Arg::new("marker").required(true).help("Marker text, e.g. 'embed-{$PATH}'"))
                .arg(fragment_arg())
                .arg(site_root_arg()),
        )
        .subcommand(
            Command::new("scan")
                .about("Scan a page for markers")
                .arg(
                    Arg::new("page")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("HTML or Markdown file"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["html", "markdown"])
                        .help("Page format (default: from file extension)"),
                )
                .arg(fragment_arg())
                .arg(site_root_arg()),
        )
        .subcommand(
            Command::new("simulate")
                .about("Drive a viewer against a headless platform")
                .arg(
                    Arg::new("events")
                        .required(true)
                        .num_args(1..)
                        .value_delimiter(',')
                        .value_parser(value_parser!(ViewerEventArg))
                        .help("Events: fullscreen, expand, legacy, escape, double-tap, platform-enter, platform-exit"),
                )
                .arg(
                    Arg::new("mobile")
                        .long("mobile")
                        .action(ArgAction::SetTrue)
                        .help("Simulate a mobile device"),
                )
                .arg(
                    Arg::new("vendors")
                        .long("vendors")
                        .value_delimiter(',')
                        .value_parser(["standard", "webkit", "moz", "none"])
                        .help("Fullscreen APIs the platform offers (default: all)"),
                )
                .arg(policy_arg("frame"))
                .arg(policy_arg("container")),
        )
}

fn fragment_arg() -> Arg {
    Arg::new("fragment")
        .long("fragment")
        .default_value("")
        .help("Current location fragment, e.g. '#/repo/2d/pong/README'")
}

fn site_root_arg() -> Arg {
    Arg::new("site-root")
        .long("site-root")
        .default_value("/")
        .help("Page URL the site root is derived from")
}

fn policy_arg(surface: &'static str) -> Arg {
    Arg::new(surface)
        .long(surface)
        .default_value("grant")
        .value_parser(["grant", "deny", "refuse", "missing"])
        .help("How the platform answers fullscreen requests on this surface")
}

#[derive(Debug, Clone, Copy)]
struct ViewerEventArg(ViewerEvent);

impl std::str::FromStr for ViewerEventArg {
    type Err = embed_viewer::harness::UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Load configuration from an optional TOML file, then apply flag overrides
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: Option<&Path>, no_scene_arg: bool) -> Result<ScannerConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ScannerConfig::default(),
    };
    if no_scene_arg {
        config.resolver.allow_scene_query_arg = false;
    }
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Run the selected subcommand
///
/// # Errors
/// Returns an error for unreadable inputs or configuration. Markers that fail
/// to resolve and failed simulations are reported through [`Output::success`].
pub fn execute(matches: &ArgMatches) -> Result<Output> {
    let Some((name, args)) = matches.subcommand() else {
        bail!("no subcommand given");
    };
    // Global flags are read from the subcommand, where they are always visible.
    let config = load_config(
        args.get_one::<PathBuf>("config").map(PathBuf::as_path),
        args.get_flag("no-scene-arg"),
    )?;
    let json = args.get_flag("json");

    match name {
        "resolve" => resolve_command(args, config, json),
        "scan" => scan_command(args, config, json),
        "simulate" => simulate_command(args, json),
        other => bail!("unknown subcommand '{other}'"),
    }
}

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    marker: &'a str,
    fragment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    demo: Option<ResolvedDemo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

fn resolve_command(args: &ArgMatches, config: ScannerConfig, json: bool) -> Result<Output> {
    let marker = string_arg(args, "marker")?;
    let fragment = string_arg(args, "fragment")?;
    let root = SiteRoot::from_href(string_arg(args, "site-root")?);

    let resolver = Resolver::new(config.resolver);
    let outcome = resolver.resolve(marker, &NavigationFragment::from_hash(fragment));
    let success = outcome.is_ok();
    let report = match outcome {
        Ok(demo) => ResolveReport {
            marker,
            fragment,
            src: Some(demo.absolute_url(&root)),
            demo: Some(demo),
            notice: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Marker did not resolve");
            ResolveReport {
                marker,
                fragment,
                demo: None,
                src: None,
                notice: Some(e.notice()),
            }
        }
    };

    let text = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        match (&report.demo, &report.src, &report.notice) {
            (Some(demo), Some(src), _) => format!(
                "url:   {}\nsrc:   {src}\nscene: {} ({})\nproject-level: {}",
                demo.url, demo.scene_name, demo.scene_identifier, demo.is_project_level_embed
            ),
            (_, _, Some(notice)) => format!("Embed Error: {notice}"),
            _ => String::new(),
        }
    };
    Ok(Output::new(text, success))
}

fn scan_command(args: &ArgMatches, config: ScannerConfig, json: bool) -> Result<Output> {
    let path = args
        .get_one::<PathBuf>("page")
        .context("missing page argument")?;
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page {}", path.display()))?;
    let format = match args.get_one::<String>("format").map(String::as_str) {
        Some("markdown") => PageFormat::Markdown,
        Some(_) => PageFormat::Html,
        None => PageFormat::from_extension(path.extension().and_then(|e| e.to_str()).unwrap_or("")),
    };
    let fragment = NavigationFragment::from_hash(string_arg(args, "fragment")?);
    let root = SiteRoot::from_href(string_arg(args, "site-root")?);

    let mut scanner = Scanner::new(config);
    scanner.begin_route();
    let page = Page {
        source: &source,
        format,
    };
    let scanned = scanner.scan(page, &fragment, &root);
    let success = scanned.iter().all(|s| !s.outcome.is_notice());

    let text = if json {
        serde_json::to_string_pretty(&scanned)?
    } else {
        render_scan(&scanned)
    };
    Ok(Output::new(text, success))
}

fn render_scan(scanned: &[ScannedMarker]) -> String {
    if scanned.is_empty() {
        return "No embed markers found".to_string();
    }
    let mut out = String::new();
    for entry in scanned {
        let _ = write!(out, "@{:<6} {}\n        ", entry.marker.offset, entry.marker.text);
        let _ = match &entry.outcome {
            EmbedOutcome::Viewer(plan) => writeln!(out, "{} -> {}", plan.title, plan.src),
            EmbedOutcome::Notice { message } => writeln!(out, "Embed Error: {message}"),
        };
    }
    out.trim_end().to_string()
}

fn simulate_command(args: &ArgMatches, json: bool) -> Result<Output> {
    let events: Vec<ViewerEvent> = args
        .get_many::<ViewerEventArg>("events")
        .context("missing events")?
        .map(|arg| arg.0)
        .collect();

    let vendors: Vec<Vendor> = match args.get_many::<String>("vendors") {
        Some(names) => names.filter_map(|name| parse_vendor(name)).collect(),
        None => Vendor::ORDER.to_vec(),
    };
    let platform = HeadlessPlatform::new(vendors)
        .with_frame_policy(parse_policy(string_arg(args, "frame")?)?)
        .with_container_policy(parse_policy(string_arg(args, "container")?)?);
    let device = if args.get_flag("mobile") {
        DeviceProfile::mobile()
    } else {
        DeviceProfile::desktop()
    };

    let report = run_simulation(device, platform, &events);
    let text = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.generate_text()
    };
    Ok(Output::new(text, report.passed()))
}

fn string_arg<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument '{name}'"))
}

fn parse_vendor(name: &str) -> Option<Vendor> {
    match name {
        "standard" => Some(Vendor::Standard),
        "webkit" => Some(Vendor::Webkit),
        "moz" => Some(Vendor::Moz),
        _ => None,
    }
}

fn parse_policy(name: &str) -> Result<RequestPolicy> {
    Ok(match name {
        "grant" => RequestPolicy::Grant,
        "deny" => RequestPolicy::Deny,
        "refuse" => RequestPolicy::Refuse,
        "missing" => RequestPolicy::Missing,
        other => bail!("unknown request policy '{other}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn policy_names() {
        assert_eq!(parse_policy("deny").unwrap(), RequestPolicy::Deny);
        assert!(parse_policy("maybe").is_err());
    }

    #[test]
    fn vendor_names() {
        assert_eq!(parse_vendor("webkit"), Some(Vendor::Webkit));
        assert_eq!(parse_vendor(""), None);
    }

    #[test]
    fn scan_rendering_without_markers() {
        assert_eq!(render_scan(&[]), "No embed markers found");
    }
}
