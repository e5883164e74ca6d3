//! Scalar and collection converters.
//!
//! Unset configuration values become absent domain fields and absent or empty
//! domain fields flatten to unset, never to a zero value. String sets expand in
//! lexicographic order so repeated reads of an unchanged object agree.

use alertdef_core::{AlertDefError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Attribute path of a child node
pub(crate) fn child(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Attribute path of a list element
pub(crate) fn index(parent: &str, i: usize) -> String {
    format!("{parent}[{i}]")
}

pub fn expand_string_set(set: Option<&BTreeSet<String>>) -> Vec<String> {
    set.map(|set| set.iter().cloned().collect())
        .unwrap_or_default()
}

pub fn flatten_string_set(values: &[String]) -> Option<BTreeSet<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().cloned().collect())
    }
}

pub fn expand_string_list(list: Option<&Vec<String>>) -> Vec<String> {
    list.cloned().unwrap_or_default()
}

pub fn flatten_string_list(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

pub fn expand_string_map(map: Option<&BTreeMap<String, String>>) -> HashMap<String, String> {
    map.map(|map| {
        map.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    })
    .unwrap_or_default()
}

pub fn flatten_string_map(map: &HashMap<String, String>) -> Option<BTreeMap<String, String>> {
    if map.is_empty() {
        None
    } else {
        Some(
            map.iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

/// Nullable integer to an unsigned 32-bit domain value
pub fn expand_u32(value: Option<i64>, path: &str) -> Result<Option<u32>> {
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| {
                AlertDefError::invalid(path, format!("{v} is out of range 0..={}", u32::MAX))
            })
        })
        .transpose()
}

/// Like [`expand_u32`], additionally rejecting zero
pub fn expand_positive_u32(value: Option<i64>, path: &str) -> Result<Option<u32>> {
    match expand_u32(value, path)? {
        Some(0) => Err(AlertDefError::invalid(path, "must be a positive integer")),
        other => Ok(other),
    }
}

/// Nullable integer to a percentage, 0 to 100
pub fn expand_percentage(value: Option<i64>, path: &str) -> Result<Option<u32>> {
    match expand_u32(value, path)? {
        Some(pct) if pct > 100 => Err(AlertDefError::invalid(
            path,
            format!("{pct} is not a percentage between 0 and 100"),
        )),
        other => Ok(other),
    }
}

pub fn flatten_u32(value: Option<u32>) -> Option<i64> {
    value.map(i64::from)
}

/// Percentage back to configuration; anything above 100 would not expand again
pub fn flatten_percentage(value: Option<u32>, field: &str) -> Result<Option<i64>> {
    match value {
        Some(pct) if pct > 100 => Err(AlertDefError::unmapped(field, pct)),
        other => Ok(flatten_u32(other)),
    }
}

/// Nullable integer to an unsigned 64-bit domain value
pub fn expand_u64(value: Option<i64>, path: &str) -> Result<Option<u64>> {
    value
        .map(|v| {
            u64::try_from(v)
                .map_err(|_| AlertDefError::invalid(path, format!("{v} must not be negative")))
        })
        .transpose()
}

/// Unsigned 64-bit domain value to a nullable integer.
///
/// Values beyond `i64::MAX` cannot be represented in configuration.
pub fn flatten_u64(value: Option<u64>, field: &str) -> Result<Option<i64>> {
    value
        .map(|v| i64::try_from(v).map_err(|_| AlertDefError::unmapped(field, v)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_paths() {
        assert_eq!(child("", "name"), "name");
        assert_eq!(child("type_definition", "flow"), "type_definition.flow");
        assert_eq!(index("rules", 2), "rules[2]");
    }

    #[test]
    fn test_empty_collections_flatten_to_null() {
        assert_eq!(flatten_string_set(&[]), None);
        assert_eq!(flatten_string_list(&[]), None);
        assert_eq!(flatten_string_map(&HashMap::new()), None);
        assert!(expand_string_set(None).is_empty());
        assert!(expand_string_list(None).is_empty());
        assert!(expand_string_map(None).is_empty());
    }

    #[test]
    fn test_list_keeps_declared_order() {
        let list = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        let expanded = expand_string_list(Some(&list));
        assert_eq!(expanded, list);
        assert_eq!(flatten_string_list(&expanded), Some(list));
    }

    #[test]
    fn test_integer_ranges() {
        assert_eq!(expand_u32(None, "x").unwrap(), None);
        assert_eq!(expand_u32(Some(0), "x").unwrap(), Some(0));
        assert!(expand_u32(Some(-1), "x").unwrap_err().is_validation_error());
        assert!(expand_positive_u32(Some(0), "x").is_err());
        assert_eq!(expand_positive_u32(Some(5), "x").unwrap(), Some(5));
        assert!(expand_percentage(Some(101), "x").is_err());
        assert_eq!(expand_percentage(Some(100), "x").unwrap(), Some(100));
        assert_eq!(flatten_percentage(Some(100), "x").unwrap(), Some(100));
        assert!(flatten_percentage(Some(101), "x").unwrap_err().is_mapping_error());
        assert!(flatten_u64(Some(u64::MAX), "x").unwrap_err().is_mapping_error());
        assert_eq!(flatten_u64(Some(250), "x").unwrap(), Some(250));
    }

    #[quickcheck]
    fn prop_string_set_expansion_is_sorted_and_stable(values: Vec<String>) -> bool {
        let set: BTreeSet<String> = values.into_iter().collect();
        let expanded = expand_string_set(Some(&set));
        let sorted = expanded.windows(2).all(|w| w[0] < w[1]);
        let again = flatten_string_set(&expanded).unwrap_or_default();
        sorted && again == set
    }
}
