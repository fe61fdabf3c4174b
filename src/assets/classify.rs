use regex::Regex;

use crate::resolver::Resolver;

fn default_asset_types() -> &'static [(Regex, &'static str)] {
  use std::sync::OnceLock;

  static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
  PATTERNS
    .get_or_init(|| {
      vec![
        (Regex::new(r"(?i)\.js$").expect("invalid script regex"), "script"),
        (
          Regex::new(r"(?i)\.(svg|jpe?g|png|webp)$").expect("invalid image regex"),
          "image",
        ),
        (
          Regex::new(r"(?i)\.(woff2?|otf|ttf|eot)$").expect("invalid font regex"),
          "font",
        ),
        (Regex::new(r"(?i)\.css$").expect("invalid style regex"), "style"),
      ]
    })
    .as_slice()
}

/// Asset type for `file` based on its extension, first match wins.
///
/// Source maps, licenses and any other non-asset output are left unclassified so they never
/// show up in a manifest or a preload header.
pub fn default_asset_type(file: &str) -> Option<&'static str> {
  default_asset_types()
    .iter()
    .find(|(pattern, _)| pattern.is_match(file))
    .map(|(_, kind)| *kind)
}

/// Classify `file` with the configured resolver, falling back to [`default_asset_type`].
pub fn classify_asset(assets: Option<&Resolver>, file: &str) -> Option<String> {
  match assets {
    Some(resolver) => resolver.resolve(file),
    None => default_asset_type(file).map(str::to_string),
  }
}
