//! Import pipeline: aggregate, infer theme names, persist

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::aggregate::Aggregator;
use crate::progress::Progress;
use crate::record::MapRecord;
use crate::themes::ThemeInference;
use crate::Result;

/// Destination for a finished record batch, keyed by record id
pub trait MapSink {
    /// Insert or replace every record in `records`
    fn save_maps_batch(&mut self, records: &[MapRecord]) -> Result<()>;
}

/// Sink that keeps nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl MapSink for NullSink {
    fn save_maps_batch(&mut self, _records: &[MapRecord]) -> Result<()> {
        Ok(())
    }
}

impl MapSink for Vec<MapRecord> {
    fn save_maps_batch(&mut self, records: &[MapRecord]) -> Result<()> {
        self.extend_from_slice(records);
        Ok(())
    }
}

/// Result of an import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Number of distinct track ids
    pub count: usize,
    pub records: BTreeMap<String, MapRecord>,
    /// Proposed theme code -> display name
    pub theme_names: BTreeMap<String, String>,
}

/// Import settings
#[derive(Debug, Clone, Default)]
pub struct Importer {
    pub aggregator: Aggregator,
    pub inference: ThemeInference,
}

impl Importer {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            inference: ThemeInference::default(),
        }
    }

    /// Aggregate `base_dir` and hand the records to `sink`
    ///
    /// The sink is not called when no records were found.
    pub fn run(
        &self,
        base_dir: &Path,
        sink: &mut dyn MapSink,
        progress: &mut dyn Progress,
    ) -> Result<ImportSummary> {
        let aggregation = self.aggregator.aggregate(base_dir, progress)?;
        progress.info(&format!(
            "Aggregation complete, {} unique map ids",
            aggregation.count()
        ));

        if aggregation.is_empty() {
            progress.warning("No map data aggregated, store not updated");
            return Ok(ImportSummary::default());
        }

        let theme_names = self.inference.infer(aggregation.records.values());

        let batch: Vec<MapRecord> = aggregation.records.values().cloned().collect();
        sink.save_maps_batch(&batch)?;
        progress.info(&format!("Saved {} maps", batch.len()));

        Ok(ImportSummary {
            count: aggregation.count(),
            records: aggregation.records,
            theme_names,
        })
    }
}

/// Import `base_dir` with the default layout and inference settings
pub fn import(
    base_dir: &Path,
    sink: &mut dyn MapSink,
    progress: &mut dyn Progress,
) -> Result<ImportSummary> {
    Importer::default().run(base_dir, sink, progress)
}
