//! Helpers shared by the suggestion providers of this crate.
//!
//! Candidate matching is by word boundary: `pi` matches `pig` and
//! `zombie_piglin` but not `spider`.

use sigil_dispatch::SuggestionsBuilder;

use crate::resource::ResourceLocation;
use crate::source::TextCoordinates;

/// Returns true if `input` is a prefix of `candidate` or of any part of it
/// that follows an underscore.
#[must_use]
pub fn matches_sub_str(input: &str, candidate: &str) -> bool {
    let mut offset = 0;
    loop {
        if candidate[offset..].starts_with(input) {
            return true;
        }
        match candidate[offset..].find('_') {
            Some(index) => offset += index + 1,
            None => return false,
        }
    }
}

/// Suggests every candidate matching the builder's partial token.
pub fn suggest<I, T>(candidates: I, builder: &mut SuggestionsBuilder)
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let remaining = builder.remaining_lowercase().to_string();
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if matches_sub_str(&remaining, &candidate.to_lowercase()) {
            builder.suggest(candidate);
        }
    }
}

/// Suggests every candidate with a tooltip, filtered like [`suggest`].
pub fn suggest_with_tooltips<'a, I>(candidates: I, builder: &mut SuggestionsBuilder)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let remaining = builder.remaining_lowercase().to_string();
    for (candidate, tooltip) in candidates {
        if matches_sub_str(&remaining, &candidate.to_lowercase()) {
            builder.suggest_with_tooltip(candidate, tooltip);
        }
    }
}

fn matches_resource(remaining: &str, id: &ResourceLocation) -> bool {
    if remaining.contains(':') {
        matches_sub_str(remaining, &id.to_string())
    } else {
        matches_sub_str(remaining, id.namespace())
            || (id.namespace() == crate::resource::DEFAULT_NAMESPACE
                && matches_sub_str(remaining, id.path()))
    }
}

/// Suggests identifiers. Without a `:` typed, identifiers in the default
/// namespace also match on their path alone.
pub fn suggest_resource<'a, I>(resources: I, builder: &mut SuggestionsBuilder)
where
    I: IntoIterator<Item = &'a ResourceLocation>,
{
    let remaining = builder.remaining_lowercase().to_string();
    for id in resources {
        if matches_resource(&remaining, id) {
            builder.suggest(id.to_string());
        }
    }
}

/// Suggests identifiers written after `prefix` (such as `!` or `#`).
///
/// An empty partial token suggests everything; otherwise the typed text
/// must start with (a prefix of) `prefix`.
pub fn suggest_resource_with_prefix<'a, I>(
    resources: I,
    builder: &mut SuggestionsBuilder,
    prefix: &str,
) where
    I: IntoIterator<Item = &'a ResourceLocation>,
{
    let remaining = builder.remaining_lowercase().to_string();
    if remaining.is_empty() {
        for id in resources {
            builder.suggest(format!("{prefix}{id}"));
        }
        return;
    }
    let common = common_prefix(&remaining, prefix);
    if common.is_empty() {
        return;
    }
    let rest = &remaining[common.len()..];
    for id in resources {
        if matches_resource(rest, id) {
            builder.suggest(format!("{prefix}{id}"));
        }
    }
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((index, c), _)| index + c.len_utf8());
    &a[..len]
}

/// Suggests three-component coordinates completing the partial token.
///
/// With nothing typed every hint is offered, along with its first one and
/// two components. Otherwise the typed components are kept and the hint
/// supplies the rest. Only candidates `is_valid` accepts are offered.
pub fn suggest_coordinates<F>(
    remaining: &str,
    hints: &[TextCoordinates],
    builder: &mut SuggestionsBuilder,
    is_valid: F,
) where
    F: Fn(&str) -> bool,
{
    let mut candidates = Vec::new();
    if remaining.is_empty() {
        for hint in hints {
            let full = format!("{} {} {}", hint.x, hint.y, hint.z);
            if is_valid(&full) {
                candidates.push(hint.x.clone());
                candidates.push(format!("{} {}", hint.x, hint.y));
                candidates.push(full);
            }
        }
    } else {
        let parts = split_components(remaining);
        match parts.as_slice() {
            [x] => {
                for hint in hints {
                    let candidate = format!("{x} {} {}", hint.y, hint.z);
                    if is_valid(&candidate) {
                        candidates.push(format!("{x} {}", hint.y));
                        candidates.push(candidate);
                    }
                }
            }
            [x, y] => {
                for hint in hints {
                    let candidate = format!("{x} {y} {}", hint.z);
                    if is_valid(&candidate) {
                        candidates.push(candidate);
                    }
                }
            }
            _ => {}
        }
    }
    suggest(candidates, builder);
}

/// Suggests two-component (x and z) coordinates completing the partial token.
pub fn suggest_2d_coordinates<F>(
    remaining: &str,
    hints: &[TextCoordinates],
    builder: &mut SuggestionsBuilder,
    is_valid: F,
) where
    F: Fn(&str) -> bool,
{
    let mut candidates = Vec::new();
    if remaining.is_empty() {
        for hint in hints {
            let full = format!("{} {}", hint.x, hint.z);
            if is_valid(&full) {
                candidates.push(hint.x.clone());
                candidates.push(full);
            }
        }
    } else if let [x] = split_components(remaining).as_slice() {
        for hint in hints {
            let candidate = format!("{x} {}", hint.z);
            if is_valid(&candidate) {
                candidates.push(candidate);
            }
        }
    }
    suggest(candidates, builder);
}

/// Splits on spaces, dropping trailing empty components.
fn split_components(remaining: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = remaining.split(' ').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(input: &str) -> SuggestionsBuilder {
        SuggestionsBuilder::new(input, 0)
    }

    #[test]
    fn sub_str_matches_word_boundaries() {
        assert!(matches_sub_str("pi", "pig"));
        assert!(matches_sub_str("pi", "zombie_piglin"));
        assert!(!matches_sub_str("pi", "spider"));
        assert!(matches_sub_str("", "anything"));
    }

    #[test]
    fn suggest_filters_case_insensitively() {
        let mut b = builder("AL");
        suggest(["Alice", "alfred", "Bob"], &mut b);
        assert_eq!(b.build().texts(), vec!["alfred", "Alice"]);
    }

    #[test]
    fn resources_match_on_path_in_default_namespace() {
        let ids: Vec<ResourceLocation> = ["minecraft:pig", "minecraft:zombie_pigman", "mod:pickle"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let mut b = builder("pi");
        suggest_resource(&ids, &mut b);
        assert_eq!(b.build().texts(), vec!["minecraft:pig", "minecraft:zombie_pigman"]);

        let mut b = builder("mod:");
        suggest_resource(&ids, &mut b);
        assert_eq!(b.build().texts(), vec!["mod:pickle"]);
    }

    #[test]
    fn resources_with_prefix() {
        let ids: Vec<ResourceLocation> = vec!["minecraft:pig".parse().unwrap()];
        let mut b = builder("!p");
        suggest_resource_with_prefix(&ids, &mut b, "!");
        assert_eq!(b.build().texts(), vec!["!minecraft:pig"]);

        let mut b = builder("p");
        suggest_resource_with_prefix(&ids, &mut b, "!");
        assert!(b.build().is_empty());

        let mut b = builder("");
        suggest_resource_with_prefix(&ids, &mut b, "!#");
        assert_eq!(b.build().texts(), vec!["!#minecraft:pig"]);
    }

    #[test]
    fn coordinates_from_nothing() {
        let mut b = builder("");
        suggest_coordinates("", &[TextCoordinates::global()], &mut b, |_| true);
        assert_eq!(b.build().texts(), vec!["~", "~ ~", "~ ~ ~"]);
    }

    #[test]
    fn coordinates_keep_typed_components() {
        let mut b = builder("5 ");
        suggest_coordinates("5 ", &[TextCoordinates::global()], &mut b, |_| true);
        assert_eq!(b.build().texts(), vec!["5 ~", "5 ~ ~"]);

        let mut b = builder("5 6");
        suggest_coordinates("5 6", &[TextCoordinates::global()], &mut b, |_| true);
        assert_eq!(b.build().texts(), vec!["5 6 ~"]);
    }

    #[test]
    fn coordinates_respect_validator() {
        let mut b = builder("");
        suggest_coordinates("", &[TextCoordinates::global()], &mut b, |_| false);
        assert!(b.build().is_empty());
    }

    #[test]
    fn two_dimensional_coordinates() {
        let mut b = builder("");
        suggest_2d_coordinates("", &[TextCoordinates::global()], &mut b, |_| true);
        assert_eq!(b.build().texts(), vec!["~", "~ ~"]);

        let mut b = builder("3");
        suggest_2d_coordinates("3", &[TextCoordinates::global()], &mut b, |_| true);
        assert_eq!(b.build().texts(), vec!["3 ~"]);
    }
}
