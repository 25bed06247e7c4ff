use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::sentiment_analysis::{ClassificationResult, Label};

/// Label frequencies over a batch of classifier results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSummary {
    counts: BTreeMap<Label, usize>,
}

impl DistributionSummary {
    /// Count every label in `results`.
    pub fn aggregate<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassificationResult>,
    {
        let mut summary = Self::default();
        for result in results {
            summary.record(result.label);
        }
        summary
    }

    pub fn record(&mut self, label: Label) {
        *self.counts.entry(label).or_insert(0) += 1;
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: &DistributionSummary) {
        for (label, count) in &other.counts {
            *self.counts.entry(*label).or_insert(0) += count;
        }
    }

    pub fn count(&self, label: Label) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels present in the batch, most frequent first.
    pub fn ranked(&self) -> Vec<(Label, usize)> {
        let mut ranked: Vec<(Label, usize)> = self.counts.iter().map(|(l, c)| (*l, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, usize)> + '_ {
        self.counts.iter().map(|(l, c)| (*l, *c))
    }
}
