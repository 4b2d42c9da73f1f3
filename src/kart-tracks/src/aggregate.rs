//! Track aggregation across the base metadata file and locale files
//!
//! Three passes over an unpack directory:
//!
//! 1. Base metadata (`track@zz.bml`): creates one record per id, collects
//!    `gameType` tags and primary-element difficulty.
//! 2. Locale files (`trackLocale@<lang>.bml`): fills translations for known
//!    ids and flags tracks referenced by reverse variants directly under the
//!    document root.
//! 3. Derived fields: recomputes the game type from each id.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::element::{ElementKind, ElementScan, TrackElement};
use crate::layout::TrackLayout;
use crate::progress::Progress;
use crate::record::MapRecord;
use crate::{Error, Result};

/// Finished aggregation: id -> record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub records: BTreeMap<String, MapRecord>,
}

impl Aggregation {
    /// Number of distinct ids
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MapRecord> {
        self.records.get(id)
    }

    /// Records grouped by theme code, ids ascending within each theme
    pub fn by_theme(&self) -> BTreeMap<&str, Vec<&MapRecord>> {
        let mut themes: BTreeMap<&str, Vec<&MapRecord>> = BTreeMap::new();
        for record in self.records.values() {
            themes.entry(record.theme()).or_default().push(record);
        }
        themes
    }
}

/// Aggregates track records from an unpack directory
///
/// Holds no state between runs; each [`Aggregator::aggregate`] call builds
/// and returns its own record set.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    layout: TrackLayout,
    cancel: Option<Arc<AtomicBool>>,
}

impl Aggregator {
    pub fn new(layout: TrackLayout) -> Self {
        Self {
            layout,
            cancel: None,
        }
    }

    /// Abandon the run between files once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// Run all three passes over `base_dir`
    ///
    /// Missing or undecodable files are reported through `progress` and never
    /// abort the run. The only error is cancellation.
    pub fn aggregate(&self, base_dir: &Path, progress: &mut dyn Progress) -> Result<Aggregation> {
        self.check_cancelled()?;

        let mut records = BTreeMap::new();
        self.merge_base(base_dir, &mut records, progress);
        self.merge_locales(base_dir, &mut records, progress)?;

        for record in records.values_mut() {
            record.refresh_derived();
        }

        Ok(Aggregation { records })
    }

    /// Pass 1: create records from the base metadata file
    ///
    /// A decode failure discards the whole file; nothing from a partially
    /// read base file is kept.
    fn merge_base(
        &self,
        base_dir: &Path,
        records: &mut BTreeMap<String, MapRecord>,
        progress: &mut dyn Progress,
    ) {
        let path = self.layout.base_path(base_dir);
        if !path.is_file() {
            progress.warning(&format!(
                "Base metadata file not found: {}",
                path.display()
            ));
            return;
        }

        let root = match kart_bml::read_document(&path) {
            Ok(root) => root,
            Err(e) => {
                progress.error(&format!("Failed to parse {}: {}", path.display(), e));
                return;
            }
        };

        let scan = ElementScan::collect(&root, &self.layout.tags);
        for element in scan.all() {
            let Some(id) = element.identifier() else {
                continue;
            };

            let record = records
                .entry(id.to_string())
                .or_insert_with(|| MapRecord::new(id));

            if let Some(game_type) = element.game_type() {
                record.add_tag(game_type);
            }

            if element.kind == ElementKind::Primary {
                if let Some(difficulty) = element.difficulty() {
                    record.set_difficulty_once(difficulty);
                }
            }
        }

        progress.info(&format!(
            "Parsed base metadata {}: {} map ids",
            file_label(&path),
            records.len()
        ));
    }

    /// Locale files in the locale directory as (language, path), by file name
    fn locale_files(&self, dir: &Path) -> Vec<(String, PathBuf)> {
        walkdir::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let name = e.file_name().to_str()?;
                let lang = self.layout.locale_code(name)?.to_string();
                Some((lang, e.into_path()))
            })
            .collect()
    }

    /// Pass 2: merge translations and reverse-mode flags
    fn merge_locales(
        &self,
        base_dir: &Path,
        records: &mut BTreeMap<String, MapRecord>,
        progress: &mut dyn Progress,
    ) -> Result<()> {
        let dir = self.layout.locale_dir(base_dir);
        if !dir.is_dir() {
            progress.warning(&format!("Locale directory not found: {}", dir.display()));
            return Ok(());
        }

        for (lang, path) in self.locale_files(&dir) {
            self.check_cancelled()?;

            let root = match kart_bml::read_document(&path) {
                Ok(root) => root,
                Err(e) => {
                    progress.warning(&format!(
                        "Skipping locale '{}': failed to parse {}: {}",
                        lang,
                        file_label(&path),
                        e
                    ));
                    continue;
                }
            };

            let scan = ElementScan::collect(&root, &self.layout.tags);

            let mut named = 0usize;
            for element in scan.named() {
                let (Some(id), Some(name)) = (element.id(), element.name()) else {
                    continue;
                };
                if let Some(record) = records.get_mut(id) {
                    record.translations.insert(lang.clone(), name.to_string());
                    named += 1;
                }
            }

            // Reverse references are only honoured directly under the root
            let mut reversed = 0usize;
            let reverse_tag = self.layout.tags.reverse_variant.as_str();
            for node in root.children_named(reverse_tag) {
                let element = TrackElement::new(ElementKind::ReverseVariant, node);
                if let Some(record) = element.ref_id().and_then(|id| records.get_mut(id)) {
                    record.has_reverse_mode = true;
                    reversed += 1;
                }
            }

            progress.info(&format!(
                "Processed locale '{}' ({}): {} names, {} reverse references",
                lang,
                file_label(&path),
                named,
                reversed
            ));
        }

        Ok(())
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Aggregate `base_dir` with the default layout
pub fn aggregate(base_dir: &Path, progress: &mut dyn Progress) -> Result<Aggregation> {
    Aggregator::default().aggregate(base_dir, progress)
}
