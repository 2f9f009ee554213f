//! Earthquake catalogue of residual fields and correlation models.
//!
//! ## Purpose
//!
//! This module reads the data directory that backs the estimator: an
//! availability table (`models.json`) and one JSON document per earthquake
//! holding the event source, rupture, station residuals, sill, event term and
//! posterior correlation-model samples for each intensity measure.
//!
//! ## Design notes
//!
//! * **Typed parsing**: Documents are deserialized with `serde` into raw
//!   structs, then validated and converted into domain types.
//! * **Scalar or array**: Single-segment ruptures may give fault fields as
//!   scalars.
//! * **Realization count**: Taken from the catalogue arrays, never assumed.
//!
//! ## Invariants
//!
//! * With [`CorrelationSet::All`] the MAP model is the last realization.
//! * Station latitude, longitude and residual arrays have equal length.
//!
//! ## Non-goals
//!
//! * This module does not write or modify catalogue files.

// External dependencies
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// Internal dependencies
use crate::algorithms::correlation::{CorrelationModel, CorrelationParams};
use crate::algorithms::rupture::{Fault, FaultSegment};
use crate::primitives::errors::KrigerError;
use crate::primitives::intensity::{CorrelationSet, IntensityMeasure};
use crate::primitives::seismic::{Region, Tectonic};

/// Environment variable naming the default data directory.
pub const DATA_DIR_ENV: &str = "GMKRIGER_DATA_DIR";

/// Availability table file name.
pub const AVAILABILITY_FILE: &str = "models.json";

// ============================================================================
// Raw Documents
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(f64),
    Many(Vec<f64>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<f64> {
        match self {
            Self::One(v) => vec![v],
            Self::Many(v) => v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawHypocenter {
    hypo_lat: f64,
    hypo_lon: f64,
    #[serde(rename = "hypo_Z")]
    hypo_z: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFault {
    length: OneOrMany,
    width: OneOrMany,
    strike: OneOrMany,
    dip: OneOrMany,
    rake: OneOrMany,
    #[serde(rename = "ULC_lat")]
    ulc_lat: OneOrMany,
    #[serde(rename = "ULC_lon")]
    ulc_lon: OneOrMany,
    #[serde(rename = "Ztor")]
    ztor: OneOrMany,
}

#[derive(Debug, Clone, Deserialize)]
struct RawRealizations {
    le: Vec<f64>,
    gammae: Vec<f64>,
    la: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawMap {
    le: f64,
    gammae: f64,
    la: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawModels {
    #[serde(default)]
    all: BTreeMap<String, RawRealizations>,
    #[serde(default)]
    map: BTreeMap<String, RawMap>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawEvent {
    #[serde(rename = "M")]
    magnitude: f64,
    tectonic: String,
    region: String,
    hypocenter: RawHypocenter,
    fault: RawFault,
    #[serde(rename = "WER")]
    wer: BTreeMap<String, Vec<f64>>,
    sill: BTreeMap<String, f64>,
    eta: BTreeMap<String, f64>,
    #[serde(default)]
    model: RawModels,
}

#[derive(Debug, Clone, Deserialize)]
struct AvailabilityRecord {
    earthquake: String,
    #[serde(flatten)]
    flags: BTreeMap<String, u8>,
}

// ============================================================================
// Domain Types
// ============================================================================

/// Catalogued earthquake.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Catalogue name.
    pub name: String,

    /// Moment magnitude.
    pub magnitude: f64,

    /// Hypocentre latitude.
    pub hypo_lat: f64,

    /// Hypocentre longitude.
    pub hypo_lon: f64,

    /// Hypocentre depth in km.
    pub hypo_depth: f64,

    /// Tectonic setting.
    pub tectonic: Tectonic,

    /// Ground-motion region.
    pub region: Region,
}

/// Within-event residuals observed at stations for one intensity measure.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualField {
    /// Station latitudes.
    pub lat: Vec<f64>,

    /// Station longitudes.
    pub lon: Vec<f64>,

    /// Within-event residuals (ln units).
    pub values: Vec<f64>,

    /// Field variance.
    pub sill: f64,

    /// Event term added to the GMM median (ln units).
    pub eta: f64,
}

impl ResidualField {
    /// Number of stations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field has no stations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Indices of targets that coincide exactly with a station.
    pub fn coincident_targets(&self, lat: &[f64], lon: &[f64]) -> Vec<usize> {
        lat.iter()
            .zip(lon)
            .enumerate()
            .filter(|(_, (&la, &lo))| {
                self.lat
                    .iter()
                    .zip(&self.lon)
                    .any(|(&sla, &slo)| sla == la && slo == lo)
            })
            .map(|(i, _)| i)
            .collect()
    }
}

/// Everything needed to estimate one intensity measure for one earthquake.
#[derive(Debug, Clone)]
pub struct EventData {
    /// Source description.
    pub event: Event,

    /// Finite rupture.
    pub fault: Fault,

    /// Station residual field.
    pub field: ResidualField,

    /// Correlation-model realizations, MAP last for [`CorrelationSet::All`].
    pub realizations: Vec<CorrelationModel>,
}

// ============================================================================
// Catalogue
// ============================================================================

/// Catalogue rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    records: Vec<AvailabilityRecord>,
}

impl Catalog {
    /// Default data directory: `$GMKRIGER_DATA_DIR`, else `./data`.
    pub fn default_dir() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Open the catalogue in a data directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, KrigerError> {
        let root = root.as_ref().to_path_buf();
        let path = root.join(AVAILABILITY_FILE);
        let text = fs::read_to_string(&path)
            .map_err(|e| KrigerError::Io(format!("{}: {e}", path.display())))?;
        let records: Vec<AvailabilityRecord> = serde_json::from_str(&text)?;
        debug!(root = %root.display(), events = records.len(), "opened catalogue");
        Ok(Self { root, records })
    }

    /// Catalogued earthquake names.
    pub fn earthquakes(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.earthquake.as_str()).collect()
    }

    /// Check that correlation models exist for an earthquake and measure.
    pub fn availability(
        &self,
        earthquake: &str,
        im: IntensityMeasure,
    ) -> Result<(), KrigerError> {
        let record = self
            .records
            .iter()
            .find(|r| r.earthquake == earthquake)
            .ok_or_else(|| KrigerError::UnknownEarthquake(earthquake.to_string()))?;

        match record.flags.get(im.key()) {
            Some(&flag) if flag != 0 => Ok(()),
            _ => Err(KrigerError::UnavailableIntensityMeasure {
                earthquake: earthquake.to_string(),
                intensity: im.key(),
            }),
        }
    }

    /// Availability table with Yes / No cells.
    pub fn models(&self) -> AvailabilityTable {
        let rows = self
            .records
            .iter()
            .map(|r| {
                let flags = IntensityMeasure::ALL
                    .iter()
                    .map(|im| r.flags.get(im.key()).is_some_and(|&f| f != 0))
                    .collect();
                (r.earthquake.clone(), flags)
            })
            .collect();
        AvailabilityTable { rows }
    }

    /// Load the event, rupture, residual field and correlation realizations.
    pub fn load_event(
        &self,
        earthquake: &str,
        im: IntensityMeasure,
        set: CorrelationSet,
    ) -> Result<EventData, KrigerError> {
        self.availability(earthquake, im)?;

        let path = self.root.join(format!("{earthquake}.json"));
        let text = fs::read_to_string(&path)
            .map_err(|e| KrigerError::Io(format!("{}: {e}", path.display())))?;
        let raw: RawEvent = serde_json::from_str(&text)?;

        let data = convert_event(earthquake, raw, im, set)?;
        info!(
            earthquake,
            intensity = im.key(),
            set = set.name(),
            stations = data.field.len(),
            realizations = data.realizations.len(),
            segments = data.fault.len(),
            "loaded catalogue event"
        );
        Ok(data)
    }
}

// ============================================================================
// Conversion
// ============================================================================

fn convert_event(
    earthquake: &str,
    raw: RawEvent,
    im: IntensityMeasure,
    set: CorrelationSet,
) -> Result<EventData, KrigerError> {
    let key = im.key();

    let event = Event {
        name: earthquake.to_string(),
        magnitude: raw.magnitude,
        hypo_lat: raw.hypocenter.hypo_lat,
        hypo_lon: raw.hypocenter.hypo_lon,
        hypo_depth: raw.hypocenter.hypo_z,
        tectonic: Tectonic::parse(&raw.tectonic),
        region: Region::for_event(earthquake, &raw.region),
    };

    let fault = convert_fault(raw.fault)?;

    let column = |name: String| -> Result<Vec<f64>, KrigerError> {
        raw.wer
            .get(&name)
            .cloned()
            .ok_or_else(|| KrigerError::MalformedData(format!("WER lacks '{name}'")))
    };
    let field = ResidualField {
        lat: column(format!("lat_{key}"))?,
        lon: column(format!("lon_{key}"))?,
        values: column(key.to_string())?,
        sill: *raw
            .sill
            .get(key)
            .ok_or_else(|| KrigerError::MalformedData(format!("sill lacks '{key}'")))?,
        eta: *raw
            .eta
            .get(key)
            .ok_or_else(|| KrigerError::MalformedData(format!("eta lacks '{key}'")))?,
    };

    let realizations = convert_realizations(&raw.model, key, set)?;

    Ok(EventData {
        event,
        fault,
        field,
        realizations,
    })
}

fn convert_fault(raw: RawFault) -> Result<Fault, KrigerError> {
    let columns = [
        raw.length.into_vec(),
        raw.width.into_vec(),
        raw.strike.into_vec(),
        raw.dip.into_vec(),
        raw.rake.into_vec(),
        raw.ulc_lat.into_vec(),
        raw.ulc_lon.into_vec(),
        raw.ztor.into_vec(),
    ];
    let n = columns[0].len();
    if columns.iter().any(|c| c.len() != n) {
        return Err(KrigerError::MalformedData(
            "fault fields have unequal numbers of segments".to_string(),
        ));
    }

    let segments = (0..n)
        .map(|i| FaultSegment {
            length: columns[0][i],
            width: columns[1][i],
            strike: columns[2][i],
            dip: columns[3][i],
            rake: columns[4][i],
            ulc_lat: columns[5][i],
            ulc_lon: columns[6][i],
            ztor: columns[7][i],
        })
        .collect();

    Fault::new(segments)
}

fn convert_realizations(
    models: &RawModels,
    key: &str,
    set: CorrelationSet,
) -> Result<Vec<CorrelationModel>, KrigerError> {
    let posterior = || -> Result<Vec<CorrelationModel>, KrigerError> {
        let raw = models.all.get(key).ok_or_else(|| {
            KrigerError::MalformedData(format!("model.all lacks '{key}'"))
        })?;
        if raw.le.len() != raw.gammae.len() || raw.le.len() != raw.la.len() {
            return Err(KrigerError::MalformedData(format!(
                "model.all.{key} has unequal le/gammae/la lengths"
            )));
        }
        raw.le
            .iter()
            .zip(&raw.gammae)
            .zip(&raw.la)
            .map(|((&le, &g), &la)| {
                CorrelationParams::new(le, g, la).map(CorrelationModel::new)
            })
            .collect()
    };
    let map = || -> Result<CorrelationModel, KrigerError> {
        let raw = models.map.get(key).ok_or_else(|| {
            KrigerError::MalformedData(format!("model.map lacks '{key}'"))
        })?;
        CorrelationParams::new(raw.le, raw.gammae, raw.la).map(CorrelationModel::new)
    };

    match set {
        CorrelationSet::Realizations => posterior(),
        CorrelationSet::Map => Ok(vec![map()?]),
        CorrelationSet::All => {
            let mut all = posterior()?;
            all.push(map()?);
            Ok(all)
        }
    }
}

// ============================================================================
// Availability Table
// ============================================================================

/// Which intensity measures have correlation models, per earthquake.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityTable {
    /// Earthquake name and one flag per [`IntensityMeasure::ALL`] entry.
    pub rows: Vec<(String, Vec<bool>)>,
}

impl Display for AvailabilityTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name_width = self
            .rows
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("earthquake".len());

        write!(f, "{:<name_width$}", "earthquake")?;
        for im in IntensityMeasure::ALL {
            write!(f, " {:>9}", im.key())?;
        }
        writeln!(f)?;
        writeln!(f, "{:-<width$}", "", width = name_width + 10 * IntensityMeasure::ALL.len())?;

        for (name, flags) in &self.rows {
            write!(f, "{name:<name_width$}")?;
            for &flag in flags {
                write!(f, " {:>9}", if flag { "Yes" } else { "No" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
