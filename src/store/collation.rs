//! Name ordering for the process collection.
//!
//! Names compare case-insensitively and ignore accents first, the way a
//! Portuguese-locale collator would put "Matrícula" next to "matricula". Ties
//! fall back to the accented lowercase form, then to case with lowercase
//! first ("a" before "A"), then to the raw name so the order is total.
use crate::model::Process;
use itertools::Itertools;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Precomputed sort key for a process name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    base: String,
    accented: String,
    lower_first: String,
    raw: String,
}

impl CollationKey {
    pub fn new(name: &str) -> Self {
        let base = name
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let accented = name.nfc().flat_map(char::to_lowercase).collect();
        Self {
            base,
            accented,
            lower_first: invert_case(name),
            raw: name.to_string(),
        }
    }
}

/// Swaps the case of every letter, so a plain comparison puts lowercase first.
fn invert_case(name: &str) -> String {
    name.nfc()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect_vec()
            } else {
                c.to_uppercase().collect_vec()
            }
        })
        .collect()
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Sorts processes by name in place. Equal names keep their relative order.
pub fn sort_by_name(processes: &mut [Process]) {
    processes.sort_by_cached_key(|p| CollationKey::new(&p.name));
}

pub fn is_sorted_by_name(processes: &[Process]) -> bool {
    processes
        .iter()
        .tuple_windows()
        .all(|(a, b)| compare_names(&a.name, &b.name) != Ordering::Greater)
}
