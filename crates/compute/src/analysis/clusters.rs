//! Mean-center aggregation over contiguous observation groups.
//!
//! Each label's observations are split, in their original order, into
//! consecutive groups of `cluster_size` members (the last group may be
//! shorter). Every group is summarized by the arithmetic mean of its
//! coordinates. Groups never overlap and together cover the whole sequence.
//!
//! Ordering is explicit throughout: labels keep insertion order and groups
//! keep sequence order, so output iteration is deterministic.

use std::num::NonZeroUsize;
use std::ops::Range;

use foundation::{GeoPoint, MeanCenter, ValidationError};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::statistics::Statistics;

/// Per-label observation sequences in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledObservations {
    entries: Vec<(String, Vec<GeoPoint>)>,
}

impl LabeledObservations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label. Re-inserting an existing label replaces its
    /// observations in place and keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, observations: Vec<GeoPoint>) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = observations,
            None => self.entries.push((label, observations)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[GeoPoint]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, obs)| obs.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GeoPoint])> {
        self.entries
            .iter()
            .map(|(label, obs)| (label.as_str(), obs.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_observations(&self) -> usize {
        self.entries.iter().map(|(_, obs)| obs.len()).sum()
    }
}

impl<L: Into<String>> FromIterator<(L, Vec<GeoPoint>)> for LabeledObservations {
    fn from_iter<I: IntoIterator<Item = (L, Vec<GeoPoint>)>>(iter: I) -> Self {
        let mut out = LabeledObservations::new();
        for (label, obs) in iter {
            out.insert(label, obs);
        }
        out
    }
}

/// Contiguous index ranges covering `0..len` in strides of `cluster_size`.
pub fn group_ranges(
    len: usize,
    cluster_size: NonZeroUsize,
) -> impl Iterator<Item = Range<usize>> {
    let size = cluster_size.get();
    (0..len)
        .step_by(size)
        .map(move |start| start..(start + size).min(len))
}

/// Mean center of one group, keyed by its zero-based index as a string.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCenter {
    pub key: String,
    pub count: usize,
    pub center: MeanCenter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelCenters {
    pub label: String,
    pub groups: Vec<GroupCenter>,
}

impl LabelCenters {
    pub fn group(&self, key: &str) -> Option<&MeanCenter> {
        self.groups.iter().find(|g| g.key == key).map(|g| &g.center)
    }

    /// Number of observations covered by all groups of this label.
    pub fn observation_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}

/// Aggregation output: label -> group key -> mean center, order-preserving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeanCenters {
    labels: Vec<LabelCenters>,
}

impl MeanCenters {
    pub fn get(&self, label: &str) -> Option<&LabelCenters> {
        self.labels.iter().find(|l| l.label == label)
    }

    pub fn center(&self, label: &str, key: &str) -> Option<&MeanCenter> {
        self.get(label)?.group(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelCenters> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

struct GroupsAsMap<'a>(&'a [GroupCenter]);

impl Serialize for GroupsAsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in self.0 {
            map.serialize_entry(&group.key, &group.center)?;
        }
        map.end()
    }
}

impl Serialize for MeanCenters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.labels.len()))?;
        for label in &self.labels {
            map.serialize_entry(&label.label, &GroupsAsMap(&label.groups))?;
        }
        map.end()
    }
}

/// Groups each label's observations and computes per-group mean centers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClusterAggregator {
    cluster_size: NonZeroUsize,
}

impl ClusterAggregator {
    pub fn new(cluster_size: usize) -> Result<Self, ValidationError> {
        let cluster_size =
            NonZeroUsize::new(cluster_size).ok_or(ValidationError::ClusterSizeNotPositive)?;
        Ok(Self { cluster_size })
    }

    pub fn cluster_size(&self) -> usize {
        self.cluster_size.get()
    }

    /// Fails before producing any output if a coordinate is not finite.
    pub fn aggregate(
        &self,
        observations: &LabeledObservations,
    ) -> Result<MeanCenters, ValidationError> {
        for (_, points) in observations.iter() {
            for p in points {
                p.validate()?;
            }
        }

        let labels = observations
            .iter()
            .map(|(label, points)| LabelCenters {
                label: label.to_string(),
                groups: self.aggregate_label(label, points),
            })
            .collect();

        Ok(MeanCenters { labels })
    }

    fn aggregate_label(&self, label: &str, points: &[GeoPoint]) -> Vec<GroupCenter> {
        if points.is_empty() {
            debug!(label, "no observations for label, emitting empty group mapping");
            return Vec::new();
        }

        group_ranges(points.len(), self.cluster_size)
            .enumerate()
            .filter_map(|(index, range)| {
                let members = &points[range];
                Statistics::mean_center(members).map(|center| GroupCenter {
                    key: index.to_string(),
                    count: members.len(),
                    center,
                })
            })
            .collect()
    }
}

/// Convenience wrapper around [`ClusterAggregator`].
pub fn aggregate(
    observations: &LabeledObservations,
    cluster_size: usize,
) -> Result<MeanCenters, ValidationError> {
    ClusterAggregator::new(cluster_size)?.aggregate(observations)
}
