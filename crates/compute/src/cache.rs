use std::collections::BTreeMap;

use foundation::ValidationError;
use tracing::debug;

use crate::analysis::clusters::{ClusterAggregator, LabeledObservations, MeanCenters};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    pub dataset_id: String,
    pub cluster_size: usize,
}

impl CacheKey {
    pub fn new(dataset_id: impl Into<String>, cluster_size: usize) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            cluster_size,
        }
    }
}

/// Memoized mean centers for static datasets.
///
/// Mean centers depend only on the dataset and the cluster size, so each
/// pair is aggregated once and reused across render passes. Entries live in a
/// `BTreeMap` for stable traversal order.
#[derive(Debug, Default)]
pub struct MeanCenterCache {
    entries: BTreeMap<CacheKey, MeanCenters>,
    hits: u64,
    misses: u64,
}

impl MeanCenterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `dataset_id` must change whenever the observations do.
    pub fn get_or_compute(
        &mut self,
        dataset_id: &str,
        observations: &LabeledObservations,
        cluster_size: usize,
    ) -> Result<&MeanCenters, ValidationError> {
        let key = CacheKey::new(dataset_id, cluster_size);
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            let centers = ClusterAggregator::new(cluster_size)?.aggregate(observations)?;
            debug!(dataset_id, cluster_size, labels = centers.len(), "cached mean centers");
            self.misses += 1;
            self.entries.insert(key.clone(), centers);
        }
        Ok(&self.entries[&key])
    }

    pub fn get(&self, dataset_id: &str, cluster_size: usize) -> Option<&MeanCenters> {
        self.entries.get(&CacheKey::new(dataset_id, cluster_size))
    }

    /// Drop every cluster size computed for `dataset_id`. Returns how many
    /// entries were removed.
    pub fn invalidate(&mut self, dataset_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| k.dataset_id != dataset_id);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use foundation::{GeoPoint, ValidationError};

    use super::MeanCenterCache;
    use crate::analysis::clusters::LabeledObservations;

    fn observations() -> LabeledObservations {
        [(
            "elephant",
            vec![GeoPoint::new(1.0, 1.0), GeoPoint::new(3.0, 3.0)],
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let mut cache = MeanCenterCache::new();
        let obs = observations();
        let first = cache.get_or_compute("ds", &obs, 2).unwrap().clone();
        let second = cache.get_or_compute("ds", &obs, 2).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cluster_size_is_part_of_the_key() {
        let mut cache = MeanCenterCache::new();
        let obs = observations();
        cache.get_or_compute("ds", &obs, 1).unwrap();
        cache.get_or_compute("ds", &obs, 2).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("ds", 1).unwrap().get("elephant").unwrap().groups.len(), 2);
        assert_eq!(cache.get("ds", 2).unwrap().get("elephant").unwrap().groups.len(), 1);
    }

    #[test]
    fn invalid_cluster_size_is_not_cached() {
        let mut cache = MeanCenterCache::new();
        assert_eq!(
            cache.get_or_compute("ds", &observations(), 0).err(),
            Some(ValidationError::ClusterSizeNotPositive)
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_drops_only_that_dataset() {
        let mut cache = MeanCenterCache::new();
        let obs = observations();
        cache.get_or_compute("a", &obs, 1).unwrap();
        cache.get_or_compute("a", &obs, 2).unwrap();
        cache.get_or_compute("b", &obs, 1).unwrap();
        assert_eq!(cache.invalidate("a"), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("b", 1).is_some());
    }
}
