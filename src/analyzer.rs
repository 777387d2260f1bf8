//! End-to-end pipeline: transcript text in, structured record and
//! statistics out.
//!
//! # Example
//!
//! ```
//! use chatstats::analyzer::Analyzer;
//! use chatstats::config::AnalyzerConfig;
//!
//! # fn main() -> chatstats::Result<()> {
//! let analyzer = Analyzer::new(AnalyzerConfig::default())?;
//! let analysis = analyzer.analyze_str(
//!     "12/01/23, 9:00 AM - Alice: Hello there https://x.co 😀\n\
//!      12/01/23, 9:05 AM - Bob: <Media omitted>\n",
//! )?;
//!
//! assert_eq!(analysis.record.len(), 2);
//! assert_eq!(analysis.aggregate.link_shared, 1);
//! assert_eq!(analysis.aggregate.media_message, 1);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::{debug, info};

use crate::config::{AnalyzerConfig, Preset};
use crate::error::{ChatstatsError, Result};
use crate::features::FeatureExtractor;
use crate::grammar::{LineGrammar, detect_preset_in};
use crate::segmenter::{MessageSegmenter, OrphanLine};
use crate::stats::{AggregateStats, AuthorStats, StatisticsEngine};
use crate::table::{StructuredRecord, TableBuilder};

/// Result of analyzing one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Row-per-message table
    pub record: StructuredRecord,
    /// Lines discarded before the first message
    pub orphans: Vec<OrphanLine>,
    /// Headline numbers
    pub aggregate: AggregateStats,
}

/// Compiled pipeline for one configuration.
///
/// Compiled patterns are immutable and can be reused across transcripts.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    detected: Option<Preset>,
    grammar: LineGrammar,
    extractor: FeatureExtractor,
    table: TableBuilder,
    stats: StatisticsEngine,
}

impl Analyzer {
    /// Validates `config` and compiles every component.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grammar: LineGrammar::new(&config)?,
            extractor: FeatureExtractor::new(&config)?,
            table: TableBuilder::new(),
            stats: StatisticsEngine::new(&config)?,
            detected: None,
            config,
        })
    }

    /// Builds an analyzer for the layout detected in `text`, keeping every
    /// non-format option of `base`.
    ///
    /// # Errors
    ///
    /// [`ChatstatsError::UnrecognizedTranscriptFormat`] if no preset
    /// matches the first lines.
    pub fn auto(base: AnalyzerConfig, text: &str) -> Result<Self> {
        let Some(preset) = detect_preset_in(text) else {
            let (line, preview) = text
                .lines()
                .enumerate()
                .find(|(_, l)| !l.trim().is_empty())
                .unwrap_or((0, ""));
            return Err(ChatstatsError::unrecognized(line, preview));
        };
        info!(%preset, "detected transcript layout");
        let mut analyzer = Self::new(base.with_preset(preset))?;
        analyzer.detected = Some(preset);
        Ok(analyzer)
    }

    /// Layout picked by [`Analyzer::auto`], if any.
    pub fn detected_preset(&self) -> Option<Preset> {
        self.detected
    }

    /// The configuration this analyzer was built from.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The statistics engine, for breakdowns and rankings.
    pub fn stats(&self) -> &StatisticsEngine {
        &self.stats
    }

    /// Runs segmentation, feature extraction and table building.
    pub fn build_record(&self, text: &str) -> Result<(StructuredRecord, Vec<OrphanLine>)> {
        let segmentation =
            MessageSegmenter::new(&self.grammar, self.config.strict_header).segment(text)?;

        let rows = segmentation
            .messages
            .iter()
            .map(|raw| self.extractor.extract(raw))
            .collect();
        let record = self.table.build(rows);

        debug!(
            rows = record.len(),
            malformed = record.malformed_count(),
            "built structured record"
        );
        Ok((record, segmentation.orphans))
    }

    /// Analyzes transcript text.
    pub fn analyze_str(&self, text: &str) -> Result<Analysis> {
        let (record, orphans) = self.build_record(text)?;
        let aggregate = self.stats.aggregate(&record);
        Ok(Analysis {
            record,
            orphans,
            aggregate,
        })
    }

    /// Reads and analyzes a UTF-8 transcript file.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<Analysis> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|source| ChatstatsError::Utf8 {
            context: path.display().to_string(),
            source,
        })?;
        self.analyze_str(&text)
    }

    /// Breakdown for one author; see [`StatisticsEngine::author_breakdown`].
    pub fn author_breakdown(&self, analysis: &Analysis, author: &str) -> Result<AuthorStats> {
        self.stats.author_breakdown(&analysis.record, author)
    }
}
