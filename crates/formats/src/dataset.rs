//! Species observation dataset.
//!
//! On disk the dataset is a JSON object mapping a species name to its
//! observation sites:
//!
//! ```json
//! { "Elephant": [ { "lat": 6.41, "lang": 81.47 } ] }
//! ```
//!
//! `lang` holds the longitude. The field name is kept on the wire for
//! compatibility with existing files; in memory it is `GeoPoint::longitude`.
//! Species order follows the file.

use std::fmt;
use std::fs;
use std::path::Path;

use compute::LabeledObservations;
use foundation::{GeoPoint, ValidationError};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct WireLocation {
    lat: f64,
    lang: f64,
}

impl From<WireLocation> for GeoPoint {
    fn from(w: WireLocation) -> Self {
        GeoPoint::new(w.lat, w.lang)
    }
}

impl From<&GeoPoint> for WireLocation {
    fn from(p: &GeoPoint) -> Self {
        WireLocation {
            lat: p.latitude,
            lang: p.longitude,
        }
    }
}

/// Species entries in file order.
struct OrderedSpecies(Vec<(String, Vec<WireLocation>)>);

struct OrderedSpeciesVisitor;

impl<'de> Visitor<'de> for OrderedSpeciesVisitor {
    type Value = OrderedSpecies;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object mapping species names to observation arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((species, sites)) = map.next_entry::<String, Vec<WireLocation>>()? {
            out.push((species, sites));
        }
        Ok(OrderedSpecies(out))
    }
}

impl<'de> Deserialize<'de> for OrderedSpecies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedSpeciesVisitor)
    }
}

struct SitesAsWire<'a>(&'a [GeoPoint]);

impl Serialize for SitesAsWire<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(WireLocation::from))
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.observations.len()))?;
        for (species, sites) in self.observations.iter() {
            map.serialize_entry(species, &SitesAsWire(sites))?;
        }
        map.end()
    }
}

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Serialize(serde_json::Error),
    Invalid {
        label: String,
        index: usize,
        source: ValidationError,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "I/O error: {err}"),
            DatasetError::Parse(err) => write!(f, "dataset parse error: {err}"),
            DatasetError::Serialize(err) => write!(f, "dataset serialize error: {err}"),
            DatasetError::Invalid {
                label,
                index,
                source,
            } => write!(f, "invalid observation {label}[{index}]: {source}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Parse(err) | DatasetError::Serialize(err) => Some(err),
            DatasetError::Invalid { source, .. } => Some(source),
        }
    }
}

/// A loaded, immutable observation dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    id: String,
    observations: LabeledObservations,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let bytes = fs::read(path.as_ref()).map_err(DatasetError::Io)?;
        let dataset = Self::from_json_slice(&bytes)?;
        debug!(
            path = %path.as_ref().display(),
            species = dataset.observations.len(),
            sites = dataset.observations.total_observations(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_json_str(payload: &str) -> Result<Self, DatasetError> {
        Self::from_json_slice(payload.as_bytes())
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DatasetError> {
        let OrderedSpecies(species) =
            serde_json::from_slice::<OrderedSpecies>(bytes).map_err(DatasetError::Parse)?;
        let observations: LabeledObservations = species
            .into_iter()
            .map(|(label, sites)| (label, sites.into_iter().map(GeoPoint::from).collect()))
            .collect();
        Self::from_observations(id_for_bytes(bytes), observations)
    }

    /// Build from in-memory observations; `id` must identify their content.
    pub fn from_observations(
        id: impl Into<String>,
        observations: LabeledObservations,
    ) -> Result<Self, DatasetError> {
        for (label, sites) in observations.iter() {
            for (index, site) in sites.iter().enumerate() {
                site.validate().map_err(|source| DatasetError::Invalid {
                    label: label.to_string(),
                    index,
                    source,
                })?;
            }
        }
        Ok(Self {
            id: id.into(),
            observations,
        })
    }

    /// Content hash of the source bytes, stable across loads.
    pub fn dataset_id(&self) -> &str {
        &self.id
    }

    pub fn observations(&self) -> &LabeledObservations {
        &self.observations
    }

    pub fn to_json_string(&self) -> Result<String, DatasetError> {
        serde_json::to_string_pretty(self).map_err(DatasetError::Serialize)
    }
}

pub fn id_for_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
