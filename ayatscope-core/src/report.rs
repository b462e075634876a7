//! One-shot, non-interactive analysis of a whole corpus.
//!
//! [`analyze`] runs every pipeline stage and keeps the intermediate results
//! for callers that want to query them (e.g. the transition table);
//! [`run_analysis`] condenses them into a serializable [`AnalysisReport`].
//!
//! License: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ayatscope_entropy::statistics::pearson_correlation;

use crate::aggregate::{
    aggregate_by_category, aggregate_by_group, compare_categories, CategoryBreakdown,
    CategoryComparison, GroupStat,
};
use crate::analysis::{entropy_pairs, score_verses, tokenize_corpus, TokenLevel, VerseStat};
use crate::catalog::GroupClassifier;
use crate::config::AnalysisConfig;
use crate::corpus::Corpus;
use crate::errors::AnalysisError;
use crate::transition::{StreamMode, TransitionTable};

/// Every intermediate product of one pipeline run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub verse_stats: Vec<VerseStat>,
    pub groups: Vec<GroupStat>,
    pub breakdown: CategoryBreakdown,
    pub comparison: CategoryComparison,
    /// Built over word tokens regardless of the entropy token level.
    pub transitions: TransitionTable,
}

impl Analysis {
    /// Pearson correlation between verse length (tokens) and verse entropy.
    pub fn length_entropy_correlation(&self) -> Option<f64> {
        let lengths: Vec<f64> = self.verse_stats.iter().map(|s| s.token_count as f64).collect();
        let entropies: Vec<f64> = self.verse_stats.iter().map(|s| s.entropy).collect();
        pearson_correlation(&lengths, &entropies)
    }
}

/// Runs tokenization, scoring, aggregation, comparison and transition building.
///
/// # Errors
///
/// [`AnalysisError::EmptyCorpus`] for a corpus without verses, and
/// [`AnalysisError::UnknownGroup`] for a surah the classifier cannot label.
pub fn analyze<C>(corpus: &Corpus, classifier: &C, config: &AnalysisConfig) -> Result<Analysis, AnalysisError>
where
    C: GroupClassifier + ?Sized,
{
    if corpus.is_empty() {
        return Err(AnalysisError::EmptyCorpus);
    }

    let verse_stats = score_verses(corpus, config.token_level);
    debug!("Scored {} verses at {:?} level.", verse_stats.len(), config.token_level);

    let groups = aggregate_by_group(entropy_pairs(&verse_stats), classifier)?;
    let breakdown = aggregate_by_category(entropy_pairs(&verse_stats), classifier)?;
    let comparison = compare_categories(&breakdown, config.comparison.equal_variance);

    let sequences = tokenize_corpus(corpus, TokenLevel::Word);
    let transitions = TransitionTable::from_sequences(&sequences, config.transitions.stream_mode);

    Ok(Analysis {
        verse_stats,
        groups,
        breakdown,
        comparison,
        transitions,
    })
}

/// Serializable summary of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub corpus_fingerprint: String,
    pub verse_count: usize,
    pub token_level: TokenLevel,
    pub stream_mode: StreamMode,
    pub groups: Vec<GroupStat>,
    pub comparison: CategoryComparison,
    pub length_entropy_correlation: Option<f64>,
    pub vocabulary_size: usize,
    pub bigram_count: usize,
    pub transition_count: u64,
}

impl AnalysisReport {
    pub fn from_analysis(corpus: &Corpus, analysis: &Analysis, config: &AnalysisConfig) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            corpus_fingerprint: corpus.fingerprint(),
            verse_count: corpus.len(),
            token_level: config.token_level,
            stream_mode: config.transitions.stream_mode,
            groups: analysis.groups.clone(),
            comparison: analysis.comparison.clone(),
            length_entropy_correlation: analysis.length_entropy_correlation(),
            vocabulary_size: analysis.transitions.vocabulary_size(),
            bigram_count: analysis.transitions.bigram_count(),
            transition_count: analysis.transitions.transition_count(),
        }
    }
}

/// Runs the full pipeline and returns its report.
pub fn run_analysis<C>(corpus: &Corpus, classifier: &C, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError>
where
    C: GroupClassifier + ?Sized,
{
    let analysis = analyze(corpus, classifier, config)?;
    let report = AnalysisReport::from_analysis(corpus, &analysis, config);
    info!(
        "Analysis {} complete: {} verses, {} groups, {} distinct bigrams.",
        report.run_id,
        report.verse_count,
        report.groups.len(),
        report.bigram_count
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SurahCatalog;
    use crate::corpus::Verse;

    #[test]
    fn test_empty_corpus_is_rejected() {
        let corpus = Corpus::default();
        let err = run_analysis(&corpus, SurahCatalog::default_catalog(), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyCorpus));
    }

    #[test]
    fn test_report_counts() {
        let corpus = Corpus::from_verses(vec![
            Verse::new(1, 1, "Dia Dia Dia"),
            Verse::new(1, 2, "Allah Maha Besar"),
        ]);
        let report = run_analysis(&corpus, SurahCatalog::default_catalog(), &AnalysisConfig::default()).unwrap();
        assert_eq!(report.verse_count, 2);
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.vocabulary_size, 4);
        assert_eq!(report.transition_count, 5);
        assert_eq!(report.corpus_fingerprint, corpus.fingerprint());
        // Two points cannot define a correlation.
        assert!(report.length_entropy_correlation.is_none());
    }
}
