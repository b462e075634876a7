//! Group-level and category-level aggregation of verse entropies.
//!
//! Groups with no verses never appear in the output: they are simply never
//! inserted into the accumulator, so no zero or NaN placeholders exist.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use ayatscope_entropy::statistics::compute_stats;

use crate::catalog::{Category, GroupClassifier};
use crate::errors::AnalysisError;
use crate::significance::{independent_t_test, TTestKind};

/// Mean entropy of one surah.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStat {
    pub group_id: u32,
    pub name: Option<String>,
    pub verse_count: usize,
    pub mean_entropy: f64,
    pub category: Category,
}

/// Entropy summary of one category across all of its verses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: Category,
    pub group_count: usize,
    pub verse_count: usize,
    pub mean_entropy: f64,
    pub std_dev: f64,
}

/// Averages entropies per group, ordered by ascending `group_id`.
///
/// # Errors
///
/// Returns [`AnalysisError::UnknownGroup`] if `classifier` has no category
/// for a group present in `pairs`.
pub fn aggregate_by_group<I, C>(pairs: I, classifier: &C) -> Result<Vec<GroupStat>, AnalysisError>
where
    I: IntoIterator<Item = (u32, f64)>,
    C: GroupClassifier + ?Sized,
{
    let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for (group_id, entropy) in pairs {
        let slot = sums.entry(group_id).or_insert((0.0, 0));
        slot.0 += entropy;
        slot.1 += 1;
    }

    let stats = sums
        .into_iter()
        .map(|(group_id, (sum, count))| {
            let category = classifier
                .category(group_id)
                .ok_or(AnalysisError::UnknownGroup(group_id))?;
            Ok(GroupStat {
                group_id,
                name: classifier.name(group_id).map(str::to_string),
                verse_count: count,
                mean_entropy: sum / count as f64,
                category,
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    debug!("Aggregated entropies into {} groups.", stats.len());
    Ok(stats)
}

/// Verse entropies partitioned by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    samples: BTreeMap<Category, Vec<f64>>,
    groups: BTreeMap<Category, BTreeSet<u32>>,
}

impl CategoryBreakdown {
    /// Verse entropies observed for `category`, in input order.
    pub fn samples(&self, category: Category) -> &[f64] {
        self.samples.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Per-category summaries; categories without verses are omitted.
    pub fn stats(&self) -> Vec<CategoryStat> {
        self.samples
            .iter()
            .filter_map(|(&category, values)| {
                let stats = compute_stats(values)?;
                Some(CategoryStat {
                    category,
                    group_count: self.groups.get(&category).map_or(0, BTreeSet::len),
                    verse_count: stats.count,
                    mean_entropy: stats.mean,
                    std_dev: stats.std_dev,
                })
            })
            .collect()
    }
}

/// Partitions verse entropies by category across all groups.
///
/// # Errors
///
/// Returns [`AnalysisError::UnknownGroup`] for a group the classifier cannot label.
pub fn aggregate_by_category<I, C>(pairs: I, classifier: &C) -> Result<CategoryBreakdown, AnalysisError>
where
    I: IntoIterator<Item = (u32, f64)>,
    C: GroupClassifier + ?Sized,
{
    let mut breakdown = CategoryBreakdown::default();
    for (group_id, entropy) in pairs {
        let category = classifier
            .category(group_id)
            .ok_or(AnalysisError::UnknownGroup(group_id))?;
        breakdown.samples.entry(category).or_default().push(entropy);
        breakdown.groups.entry(category).or_default().insert(group_id);
    }
    Ok(breakdown)
}

/// Serializable outcome of the Makkiyah vs Madaniyah t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceTest {
    /// `true` for the pooled-variance (Student) test, `false` for Welch.
    pub equal_variance: bool,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
}

/// Category summaries plus the two-sample test between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryComparison {
    pub categories: Vec<CategoryStat>,
    /// Makkiyah minus Madaniyah; `None` when either side has fewer than two
    /// verses or zero variance.
    pub t_test: Option<SignificanceTest>,
}

impl CategoryComparison {
    pub fn stat_for(&self, category: Category) -> Option<&CategoryStat> {
        self.categories.iter().find(|s| s.category == category)
    }
}

/// Compares Makkiyah and Madaniyah verse entropies with an independent t-test.
pub fn compare_categories(breakdown: &CategoryBreakdown, equal_variance: bool) -> CategoryComparison {
    let kind = if equal_variance { TTestKind::Student } else { TTestKind::Welch };
    let t_test = independent_t_test(
        breakdown.samples(Category::Makkiyah),
        breakdown.samples(Category::Madaniyah),
        kind,
    )
    .map(|result| SignificanceTest {
        equal_variance,
        t_statistic: result.t_statistic,
        degrees_of_freedom: result.degrees_of_freedom,
        p_value: result.p_value,
    });

    if t_test.is_none() {
        debug!("Category t-test undefined for the given samples.");
    }

    CategoryComparison {
        categories: breakdown.stats(),
        t_test,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SurahCatalog;

    fn odd_even(id: u32) -> Option<Category> {
        match id {
            0 => None,
            id if id % 2 == 0 => Some(Category::Madaniyah),
            _ => Some(Category::Makkiyah),
        }
    }

    #[test]
    fn test_group_mean_of_three_verses() {
        let pairs = vec![(1, 2.0), (1, 3.0), (1, 4.0)];
        let stats = aggregate_by_group(pairs, &odd_even).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].verse_count, 3);
        assert!((stats[0].mean_entropy - 3.0).abs() < 1e-12);
        assert_eq!(stats[0].category, Category::Makkiyah);
    }

    #[test]
    fn test_groups_sorted_and_empty_groups_absent() {
        let pairs = vec![(7, 1.0), (2, 2.0), (7, 3.0)];
        let stats = aggregate_by_group(pairs, &odd_even).unwrap();
        let ids: Vec<u32> = stats.iter().map(|s| s.group_id).collect();
        assert_eq!(ids, vec![2, 7]);
        assert!(stats.iter().all(|s| s.mean_entropy.is_finite()));
        assert!((stats[1].mean_entropy - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_input_no_groups() {
        let stats = aggregate_by_group(Vec::<(u32, f64)>::new(), &odd_even).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_unknown_group_is_an_error() {
        let err = aggregate_by_group(vec![(0, 1.0)], &odd_even).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownGroup(0)));
    }

    #[test]
    fn test_group_names_come_from_catalog() {
        let stats = aggregate_by_group(vec![(2, 1.0)], SurahCatalog::default_catalog()).unwrap();
        assert_eq!(stats[0].name.as_deref(), Some("Al-Baqarah"));
        assert_eq!(stats[0].category, Category::Madaniyah);
    }

    #[test]
    fn test_category_breakdown() {
        let pairs = vec![(1, 1.0), (3, 3.0), (2, 4.0), (2, 6.0), (4, 8.0)];
        let breakdown = aggregate_by_category(pairs, &odd_even).unwrap();
        assert_eq!(breakdown.samples(Category::Makkiyah), &[1.0, 3.0]);

        let stats = breakdown.stats();
        let madaniyah = stats.iter().find(|s| s.category == Category::Madaniyah).unwrap();
        assert_eq!(madaniyah.group_count, 2);
        assert_eq!(madaniyah.verse_count, 3);
        assert!((madaniyah.mean_entropy - 6.0).abs() < 1e-12);
        assert!((madaniyah.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_compare_categories() {
        let pairs = vec![
            (1, 1.0), (1, 2.0), (3, 3.0), (3, 4.0), (5, 5.0),
            (2, 3.0), (2, 4.0), (4, 5.0), (4, 6.0), (6, 7.0),
        ];
        let breakdown = aggregate_by_category(pairs, &odd_even).unwrap();
        let comparison = compare_categories(&breakdown, true);
        let test = comparison.t_test.unwrap();
        assert!((test.t_statistic + 2.0).abs() < 1e-10);
        assert!((test.degrees_of_freedom - 8.0).abs() < 1e-10);
        assert!(comparison.stat_for(Category::Makkiyah).is_some());
    }

    #[test]
    fn test_compare_categories_single_category() {
        let breakdown = aggregate_by_category(vec![(1, 1.0), (3, 2.0)], &odd_even).unwrap();
        let comparison = compare_categories(&breakdown, false);
        assert!(comparison.t_test.is_none());
        assert_eq!(comparison.categories.len(), 1);
    }
}
