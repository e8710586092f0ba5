use serde::Serialize;

/// One normalized origin-destination pair. The origin and destination hold
/// the service-resolved address strings, not the raw request strings; the
/// trailing fields echo the canonical query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceRecord {
    pub index: Option<String>,
    pub distance: String,
    pub distance_value: i64,
    pub duration: String,
    pub duration_value: i64,
    pub duration_in_traffic: String,
    pub duration_in_traffic_value: i64,
    pub origin: String,
    pub destination: String,
    pub mode: String,
    pub units: String,
    pub language: String,
    pub avoid: Option<String>,
    pub sensor: bool,
}

/// Output shape of a query: a lone record for a plain single-pair call, the
/// full ordered sequence whenever either side was supplied as a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DistanceResults {
    Single(DistanceRecord),
    Batch(Vec<DistanceRecord>),
}

impl DistanceResults {
    pub fn records(&self) -> &[DistanceRecord] {
        match self {
            DistanceResults::Single(record) => std::slice::from_ref(record),
            DistanceResults::Batch(records) => records,
        }
    }

    pub fn into_vec(self) -> Vec<DistanceRecord> {
        match self {
            DistanceResults::Single(record) => vec![record],
            DistanceResults::Batch(records) => records,
        }
    }
}
