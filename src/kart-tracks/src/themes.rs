//! Theme display-name inference
//!
//! Proposes a human-readable name for each theme code by majority vote over
//! the translated names of its tracks. Track names usually look like
//! `[Mode] Theme Track`, so the candidate is the first word after the
//! bracketed prefix. The output is advisory input for a translation
//! dictionary; records are never modified.

use std::collections::BTreeMap;

use crate::record::MapRecord;

/// Inference settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeInference {
    /// Locale whose names are voted on
    pub locale: String,
    /// Substrings marking a generic (non-theme) winner
    pub generic_markers: Vec<String>,
}

impl Default for ThemeInference {
    fn default() -> Self {
        Self {
            locale: "cn".to_string(),
            generic_markers: vec!["模式".to_string(), "竞技场".to_string()],
        }
    }
}

/// Candidate theme name from a track display name
///
/// Drops everything up to and including the first `]`, then keeps the first
/// whitespace-delimited word.
pub fn clean_candidate(name: &str) -> Option<&str> {
    let rest = match name.split_once(']') {
        Some((_, rest)) => rest,
        None => name,
    };
    rest.split_whitespace().next()
}

/// Most frequent value, ties going to the one seen first
fn majority<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &candidate in candidates {
        match counts.iter_mut().find(|(c, _)| *c == candidate) {
            Some((_, n)) => *n += 1,
            None => counts.push((candidate, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (candidate, n) in counts {
        if best.map_or(true, |(_, best_n)| n > best_n) {
            best = Some((candidate, n));
        }
    }
    best.map(|(candidate, _)| candidate)
}

impl ThemeInference {
    /// Cleaned candidates per theme, in record order
    pub fn candidates<'a, I>(&self, records: I) -> BTreeMap<&'a str, Vec<&'a str>>
    where
        I: IntoIterator<Item = &'a MapRecord>,
    {
        let mut candidates: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for record in records {
            let Some(candidate) = record.name(&self.locale).and_then(clean_candidate) else {
                continue;
            };
            candidates.entry(record.theme()).or_default().push(candidate);
        }
        candidates
    }

    fn is_generic(&self, name: &str) -> bool {
        self.generic_markers
            .iter()
            .any(|marker| name.contains(marker.as_str()))
    }

    /// Winning name per theme, omitting themes whose winner is generic
    pub fn infer<'a, I>(&self, records: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'a MapRecord>,
    {
        self.candidates(records)
            .into_iter()
            .filter_map(|(theme, names)| {
                let winner = majority(&names)?;
                if self.is_generic(winner) {
                    return None;
                }
                Some((theme.to_string(), winner.to_string()))
            })
            .collect()
    }
}

/// Infer theme names with the default settings
pub fn infer_theme_names<'a, I>(records: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a MapRecord>,
{
    ThemeInference::default().infer(records)
}
