use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::DistanceMatrixError;

pub const LOCATION_DELIMITER: &str = "|";

pub const DEFAULT_MODE: &str = "driving";
pub const DEFAULT_TRAFFIC_MODEL: &str = "best_guess";
pub const DEFAULT_UNITS: &str = "metric";
pub const DEFAULT_LANGUAGE: &str = "en";

/// One side of a matrix query. `Many` marks the side as batched even when
/// the list holds a single location.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum LocationSpec {
    Single(String),
    Many(Vec<String>),
}

impl LocationSpec {
    pub fn is_batch(&self) -> bool {
        matches!(self, LocationSpec::Many(_))
    }

    /// The wire form: `Many` entries joined with the fixed delimiter.
    pub fn joined(&self) -> String {
        match self {
            LocationSpec::Single(location) => location.clone(),
            LocationSpec::Many(locations) => locations.join(LOCATION_DELIMITER),
        }
    }
}

impl From<&str> for LocationSpec {
    fn from(location: &str) -> Self {
        LocationSpec::Single(location.to_string())
    }
}

impl From<String> for LocationSpec {
    fn from(location: String) -> Self {
        LocationSpec::Single(location)
    }
}

impl From<Vec<String>> for LocationSpec {
    fn from(locations: Vec<String>) -> Self {
        LocationSpec::Many(locations)
    }
}

/// Authorization sent with every request. The business pair replaces the
/// plain API key when both halves are configured.
#[derive(Debug, Clone)]
pub enum Credential {
    Key(String),
    Business { client_id: String, signature: String },
}

#[derive(Debug, Clone, Default)]
pub struct DistanceQuery {
    pub origins: Option<LocationSpec>,
    pub destinations: Option<LocationSpec>,
    pub mode: Option<String>,
    pub departure_time: Option<Timestamp>,
    pub traffic_model: Option<String>,
    pub units: Option<String>,
    pub language: Option<String>,
    pub avoid: Option<String>,
    pub sensor: Option<bool>,
    pub index: Option<String>,
}

#[derive(Default)]
pub struct DistanceQueryBuilder {
    origins: Option<LocationSpec>,
    destinations: Option<LocationSpec>,
    mode: Option<String>,
    departure_time: Option<Timestamp>,
    traffic_model: Option<String>,
    units: Option<String>,
    language: Option<String>,
    avoid: Option<String>,
    sensor: Option<bool>,
    index: Option<String>,
}

impl DistanceQueryBuilder {
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origins = Some(LocationSpec::Single(origin.into()));
        self
    }

    pub fn with_origins(mut self, origins: Vec<String>) -> Self {
        self.origins = Some(LocationSpec::Many(origins));
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destinations = Some(LocationSpec::Single(destination.into()));
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<String>) -> Self {
        self.destinations = Some(LocationSpec::Many(destinations));
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_departure_time(mut self, departure_time: Timestamp) -> Self {
        self.departure_time = Some(departure_time);
        self
    }

    pub fn with_iso_departure_time(mut self, departure_time: &str) -> Self {
        self.departure_time = Some(departure_time.parse().expect("Error parsing ISO"));
        self
    }

    pub fn with_traffic_model(mut self, traffic_model: impl Into<String>) -> Self {
        self.traffic_model = Some(traffic_model.into());
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_avoid(mut self, avoid: impl Into<String>) -> Self {
        self.avoid = Some(avoid.into());
        self
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn build(self) -> DistanceQuery {
        DistanceQuery {
            origins: self.origins,
            destinations: self.destinations,
            mode: self.mode,
            departure_time: self.departure_time,
            traffic_model: self.traffic_model,
            units: self.units,
            language: self.language,
            avoid: self.avoid,
            sensor: self.sensor,
            index: self.index,
        }
    }
}

/// A fully resolved query: every default applied, both sides joined into
/// their wire form, one credential selected.
#[derive(Debug, Clone)]
pub struct CanonicalQuery {
    pub origins: String,
    pub destinations: String,
    pub mode: String,
    pub departure_time: i64,
    pub traffic_model: String,
    pub units: String,
    pub language: String,
    pub avoid: Option<String>,
    pub sensor: bool,
    pub batch_mode: bool,
    pub index: Option<String>,
    pub credential: Credential,
}

impl CanonicalQuery {
    /// Resolve caller arguments against a credential. `now` supplies the
    /// departure time when the caller did not, which makes default-valued
    /// queries time-dependent.
    pub fn resolve(
        query: &DistanceQuery,
        credential: Credential,
        now: Timestamp,
    ) -> Result<CanonicalQuery, DistanceMatrixError> {
        let origins = query
            .origins
            .as_ref()
            .map(LocationSpec::joined)
            .unwrap_or_default();
        if origins.is_empty() {
            return Err(DistanceMatrixError::InvalidOrigin);
        }

        let destinations = query
            .destinations
            .as_ref()
            .map(LocationSpec::joined)
            .unwrap_or_default();
        if destinations.is_empty() {
            return Err(DistanceMatrixError::InvalidDestination);
        }

        let batch_mode = query.origins.as_ref().is_some_and(LocationSpec::is_batch)
            || query
                .destinations
                .as_ref()
                .is_some_and(LocationSpec::is_batch);

        Ok(CanonicalQuery {
            origins,
            destinations,
            mode: query.mode.clone().unwrap_or_else(|| DEFAULT_MODE.to_string()),
            departure_time: query
                .departure_time
                .map(|departure_time| departure_time.as_second())
                .unwrap_or_else(|| now.as_second()),
            traffic_model: query
                .traffic_model
                .clone()
                .unwrap_or_else(|| DEFAULT_TRAFFIC_MODEL.to_string()),
            units: query
                .units
                .clone()
                .unwrap_or_else(|| DEFAULT_UNITS.to_string()),
            language: query
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            avoid: query.avoid.clone(),
            sensor: query.sensor.unwrap_or(false),
            batch_mode,
            index: query.index.clone(),
            credential,
        })
    }

    /// Outbound query parameters in wire order. `avoid` is omitted when
    /// absent, the credential contributes `key` or `client` + `signature`.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("origins", self.origins.clone()),
            ("destinations", self.destinations.clone()),
            ("mode", self.mode.clone()),
            ("departure_time", self.departure_time.to_string()),
            ("traffic_model", self.traffic_model.clone()),
            ("units", self.units.clone()),
            ("language", self.language.clone()),
        ];

        if let Some(avoid) = &self.avoid {
            pairs.push(("avoid", avoid.clone()));
        }

        pairs.push(("sensor", self.sensor.to_string()));

        match &self.credential {
            Credential::Key(key) => pairs.push(("key", key.clone())),
            Credential::Business {
                client_id,
                signature,
            } => {
                pairs.push(("client", client_id.clone()));
                pairs.push(("signature", signature.clone()));
            }
        }

        pairs
    }
}
