//! Color and series-name resolution

use chat_charts_config::{NormalizerConfig, DEFAULT_PALETTE};
use chat_charts_shared::Presentation;
use std::collections::HashSet;

/// Keys every point already uses; a series may not take them
const RESERVED_KEYS: [&str; 2] = ["category", "color"];

/// Color for slot `index`, cycling through `palette`
///
/// An empty palette falls back to the built-in one.
pub fn resolve_color(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string();
    }
    palette[index % palette.len()].clone()
}

/// The supplied palette when it has tokens, the configured default otherwise
pub fn effective_palette<'a>(presentation: &'a Presentation, config: &'a NormalizerConfig) -> &'a [String] {
    if presentation.color_palette.is_empty() {
        config.default_palette.as_slice()
    } else {
        presentation.color_palette.as_slice()
    }
}

/// First `slots` colors of the effective palette
pub fn resolve_colors(palette: &[String], slots: usize) -> Vec<String> {
    (0..slots).map(|i| resolve_color(palette, i)).collect()
}

/// Names for `count` series, unique by index
///
/// Explicit names win; blank or missing ones become `"{prefix} {n}"` and are
/// never altered. An explicit name that repeats an earlier name, a synthesized
/// one or a reserved point key gets its 1-based index appended.
pub fn resolve_series_names(
    presentation: &Presentation,
    config: &NormalizerConfig,
    count: usize,
) -> Vec<String> {
    let explicit: Vec<Option<&str>> = (0..count).map(|i| presentation.series_name(i)).collect();
    let mut taken: HashSet<String> = explicit
        .iter()
        .enumerate()
        .filter(|(_, name)| name.is_none())
        .map(|(index, _)| config.synthesized_name(index))
        .collect();

    explicit
        .iter()
        .enumerate()
        .map(|(index, name)| match name {
            None => config.synthesized_name(index),
            Some(name) => {
                let mut resolved = name.to_string();
                let mut suffix = index + 1;
                while RESERVED_KEYS.contains(&resolved.as_str()) || taken.contains(&resolved) {
                    log::warn!(
                        "Series name '{}' at index {} is already in use, disambiguating",
                        resolved,
                        index
                    );
                    resolved = format!("{} ({})", name, suffix);
                    suffix += 1;
                }
                taken.insert(resolved.clone());
                resolved
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_color_resolution_is_cyclic() {
        let p = palette(&["a", "b", "c"]);
        for s in 0..20 {
            assert_eq!(resolve_color(&p, s), p[s % 3]);
        }
    }

    #[test]
    fn test_empty_palette_uses_builtin() {
        assert_eq!(resolve_color(&[], 0), DEFAULT_PALETTE[0]);
        assert_eq!(resolve_color(&[], 9), DEFAULT_PALETTE[1]);
    }

    #[test]
    fn test_effective_palette_prefers_presentation() {
        let config = NormalizerConfig::default();
        let mut presentation = Presentation::default();
        assert_eq!(effective_palette(&presentation, &config), &config.default_palette[..]);

        presentation.color_palette = palette(&["#123"]);
        assert_eq!(effective_palette(&presentation, &config), &["#123".to_string()][..]);
    }

    #[test]
    fn test_missing_names_are_synthesized_by_index() {
        let config = NormalizerConfig::default();
        let presentation = Presentation {
            series_names: palette(&["Wind"]),
            ..Presentation::default()
        };

        let names = resolve_series_names(&presentation, &config, 3);
        assert_eq!(names, vec!["Wind", "Series 2", "Series 3"]);
    }

    #[test]
    fn test_blank_name_slot_is_synthesized() {
        let config = NormalizerConfig::default();
        let presentation = Presentation {
            series_names: palette(&["", "Solar"]),
            ..Presentation::default()
        };

        let names = resolve_series_names(&presentation, &config, 2);
        assert_eq!(names, vec!["Series 1", "Solar"]);
    }

    #[test]
    fn test_colliding_names_are_disambiguated() {
        let config = NormalizerConfig::default();
        let presentation = Presentation {
            series_names: palette(&["Load", "Load", "category"]),
            ..Presentation::default()
        };

        let names = resolve_series_names(&presentation, &config, 3);
        assert_eq!(names, vec!["Load", "Load (2)", "category (3)"]);
    }

    #[test]
    fn test_explicit_name_yields_to_synthesized_name() {
        let config = NormalizerConfig::default();
        let presentation = Presentation {
            series_names: palette(&["Series 2"]),
            ..Presentation::default()
        };

        let names = resolve_series_names(&presentation, &config, 2);
        assert_eq!(names, vec!["Series 2 (1)", "Series 2"]);
    }
}
