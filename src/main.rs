use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use route_manifest::ManifestResult;
use route_manifest::config::ManifestConfig;
use route_manifest::output::DirectorySink;
use route_manifest::stats::load_stats;
use route_manifest::RouteManifest;

/// Derive a route-to-asset manifest from bundler stats.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
  /// Bundler stats JSON (`webpack --json` output)
  #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
  stats: PathBuf,

  /// Manifest configuration file; `./route-manifest.json` is used when present
  #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
  config: Option<PathBuf>,

  /// Build output directory the manifest is written to
  #[arg(short, long, default_value = "dist", value_hint = clap::ValueHint::DirPath)]
  out_dir: PathBuf,

  /// Override the manifest filename
  #[arg(long)]
  filename: Option<String>,

  /// Emit compact JSON
  #[arg(long)]
  minify: bool,

  /// Keep routes in encounter order
  #[arg(long)]
  no_sort: bool,

  /// Do not inline the manifest into the shared entry script
  #[arg(long)]
  no_inline: bool,

  /// Add a `Link` preload header to every route
  #[arg(long)]
  headers: bool,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let config = load_config(&cli, Path::new(".")).context("failed to load configuration")?;
  let config = apply_overrides(config, &cli);

  let stats = load_stats(&cli.stats)
    .with_context(|| format!("failed to load stats {}", cli.stats.display()))?;
  tracing::info!(
    stats = %cli.stats.display(),
    chunks = stats.chunks.len(),
    modules = stats.modules.len(),
    "loaded build stats"
  );

  let plugin = RouteManifest::new(config.into_options()).context("invalid configuration")?;
  let mut sink = DirectorySink::new(&cli.out_dir);
  let report = plugin
    .run(&stats, &mut sink)
    .with_context(|| format!("failed to write manifest into {}", cli.out_dir.display()))?;

  tracing::info!(
    manifest = %cli.out_dir.join(&report.filename).display(),
    routes = report.manifest.len(),
    "done"
  );
  Ok(())
}

/// An explicit `--config` must exist; otherwise the default file in `dir` is optional.
fn load_config(cli: &Cli, dir: &Path) -> ManifestResult<ManifestConfig> {
  match &cli.config {
    Some(path) => ManifestConfig::from_path(path),
    None => ManifestConfig::discover(dir),
  }
}

fn apply_overrides(mut config: ManifestConfig, cli: &Cli) -> ManifestConfig {
  if let Some(filename) = &cli.filename {
    config.filename = filename.clone();
  }
  config.minify |= cli.minify;
  config.headers |= cli.headers;
  if cli.no_sort {
    config.sort = false;
  }
  if cli.no_inline {
    config.inline = false;
  }
  config
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_the_config_file() {
    let cli = Cli::parse_from([
      "route-manifest",
      "--stats",
      "stats.json",
      "--filename",
      "routes.json",
      "--minify",
      "--no-sort",
      "--no-inline",
      "--headers",
    ]);
    let config = apply_overrides(ManifestConfig::default(), &cli);

    assert_eq!(config.filename, "routes.json");
    assert!(config.minify);
    assert!(config.headers);
    assert!(!config.sort);
    assert!(!config.inline);
  }

  #[test]
  fn config_values_survive_without_flags() {
    let cli = Cli::parse_from(["route-manifest", "--stats", "stats.json"]);
    let config = ManifestConfig {
      minify: true,
      headers: true,
      ..ManifestConfig::default()
    };
    let config = apply_overrides(config, &cli);

    assert_eq!(cli.config, None);
    assert_eq!(cli.out_dir, PathBuf::from("dist"));
    assert!(config.minify);
    assert!(config.headers);
    assert!(config.sort);
    assert!(config.inline);
  }

  #[test]
  fn missing_default_config_falls_back_to_defaults() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let cli = Cli::parse_from(["route-manifest", "--stats", "stats.json"]);

    let config = load_config(&cli, temp.path()).unwrap();
    assert_eq!(config.filename, "manifest.json");
    assert!(config.routes.is_none());
  }

  #[test]
  fn default_config_is_discovered_in_the_working_directory() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(
      temp.path().join(route_manifest::config::DEFAULT_CONFIG_FILE),
      r#"{ "routes": { "Home": "/" }, "minify": true }"#,
    )
    .unwrap();
    let cli = Cli::parse_from(["route-manifest", "--stats", "stats.json"]);

    let config = load_config(&cli, temp.path()).unwrap();
    assert!(config.minify);
    assert!(config.routes.is_some());
  }

  #[test]
  fn explicit_config_must_exist() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let missing = temp.path().join("custom.json");
    let missing = missing.to_str().expect("temp path is valid UTF-8");
    let cli = Cli::parse_from(["route-manifest", "--stats", "stats.json", "--config", missing]);

    assert!(load_config(&cli, temp.path()).is_err());
  }
}
