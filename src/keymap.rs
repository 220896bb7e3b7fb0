//! Key-list selector resolution (spec.md §4.5/§6): the `left` side of a
//! colon-split argument names one or more keys by index, selector, or name.

use crate::device::KeymapEntry;

const MAX_NAME_LEN: usize = 10;

/// Resolve a comma-separated key-list `left` (spec.md §6 grammar:
/// `selector (',' selector)*`, selector ∈ `all | #<dec> | #x<hex> | <name>`)
/// against a keymap, producing the set of matched scancode indices in
/// first-match order. Unrecognized or out-of-range selectors are dropped
/// silently (spec.md §7 kind 1); duplicates are preserved, matching the
/// reference semantics of invoking the vtable once per selector.
pub fn resolve_key_list(left: &str, keymap: &[KeymapEntry]) -> Vec<usize> {
    let n_keys = keymap.len();
    left.split(',')
        .flat_map(|selector| resolve_selector(selector, keymap, n_keys))
        .collect()
}

fn resolve_selector(selector: &str, keymap: &[KeymapEntry], n_keys: usize) -> Vec<usize> {
    if selector == "all" {
        return (0..n_keys).collect();
    }
    if let Some(dec) = selector.strip_prefix('#') {
        if let Some(hex) = dec.strip_prefix('x') {
            return parse_index(hex, 16, n_keys).into_iter().collect();
        }
        return parse_index(dec, 10, n_keys).into_iter().collect();
    }
    if selector.len() <= MAX_NAME_LEN {
        if let Some(idx) = keymap
            .iter()
            .position(|entry| entry.name.as_deref() == Some(selector))
        {
            return vec![idx];
        }
    }
    Vec::new()
}

fn parse_index(text: &str, radix: u32, n_keys: usize) -> Option<usize> {
    let idx = usize::from_str_radix(text, radix).ok()?;
    if idx < n_keys {
        Some(idx)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keymap_with_names(names: &[Option<&str>]) -> Vec<KeymapEntry> {
        names
            .iter()
            .map(|n| KeymapEntry {
                name: n.map(String::from),
            })
            .collect()
    }

    #[test]
    fn all_expands_to_every_index() {
        let keymap = keymap_with_names(&[None, None, None]);
        assert_eq!(resolve_key_list("all", &keymap), vec![0, 1, 2]);
    }

    #[test]
    fn decimal_selector_resolves_index() {
        let keymap = keymap_with_names(&[None; 5]);
        assert_eq!(resolve_key_list("#3", &keymap), vec![3]);
    }

    #[test]
    fn hex_selector_resolves_index() {
        let keymap = keymap_with_names(&[None; 20]);
        assert_eq!(resolve_key_list("#xa", &keymap), vec![10]);
    }

    #[test]
    fn out_of_range_decimal_is_dropped() {
        let keymap = keymap_with_names(&[None; 3]);
        assert!(resolve_key_list("#5", &keymap).is_empty());
    }

    #[test]
    fn name_selector_matches_keymap_entry() {
        let keymap = keymap_with_names(&[Some("esc"), Some("tab"), None]);
        assert_eq!(resolve_key_list("tab", &keymap), vec![1]);
    }

    #[test]
    fn name_longer_than_ten_chars_never_matches() {
        let long_name = "a".repeat(11);
        let keymap = vec![KeymapEntry {
            name: Some(long_name.clone()),
        }];
        assert!(resolve_key_list(&long_name, &keymap).is_empty());
    }

    #[test]
    fn comma_separated_selectors_resolve_in_order() {
        let keymap = keymap_with_names(&[Some("esc"), None, None]);
        assert_eq!(resolve_key_list("esc,#2", &keymap), vec![0, 2]);
    }

    #[test]
    fn unknown_selector_contributes_nothing() {
        let keymap = keymap_with_names(&[None, None]);
        assert_eq!(resolve_key_list("bogus,#1", &keymap), vec![1]);
    }
}
