use jiff::Timestamp;
use serde::Deserialize;
use tracing::debug;

use crate::{
    distance_query::{CanonicalQuery, Credential, DistanceQuery},
    distance_record::DistanceResults,
    error::DistanceMatrixError,
    normalize::normalize,
};

pub const DISTANCE_MATRIX_API_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

#[derive(Deserialize, Debug, Clone)]
pub struct TextValue {
    pub text: String,
    pub value: i64,
}

/// One cell of the origin×destination matrix. Non-OK cells omit the
/// distance and duration fields.
#[derive(Deserialize, Debug, Clone)]
pub struct MatrixElement {
    pub status: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub duration_in_traffic: Option<TextValue>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MatrixRow {
    pub elements: Vec<MatrixElement>,
}

/// The service response. Address lists and rows are empty on service-level
/// failures, so they default rather than fail deserialization.
#[derive(Deserialize, Debug, Clone)]
pub struct MatrixResponse {
    pub status: String,
    pub error_message: Option<String>,

    #[serde(default)]
    pub origin_addresses: Vec<String>,

    #[serde(default)]
    pub destination_addresses: Vec<String>,

    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

pub struct GoogleMatrixClientParams {
    pub api_key: Option<String>,
    pub client_id: Option<String>,
    pub signature: Option<String>,
    pub base_url: String,
}

impl Default for GoogleMatrixClientParams {
    fn default() -> Self {
        Self {
            api_key: None,
            client_id: None,
            signature: None,
            base_url: DISTANCE_MATRIX_API_URL.to_string(),
        }
    }
}

impl GoogleMatrixClientParams {
    /// The business pair replaces the plain API key when both halves are
    /// configured. The key falls back to an empty string when unset.
    pub fn credential(&self) -> Credential {
        match (&self.client_id, &self.signature) {
            (Some(client_id), Some(signature)) => Credential::Business {
                client_id: client_id.clone(),
                signature: signature.clone(),
            },
            _ => Credential::Key(self.api_key.clone().unwrap_or_default()),
        }
    }
}

pub struct GoogleMatrixClient {
    params: GoogleMatrixClientParams,
    client: reqwest::Client,
}

impl GoogleMatrixClient {
    pub fn new(params: GoogleMatrixClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// Resolve the query, issue one GET, normalize the response matrix.
    /// One round-trip per call; batching happens server-side.
    pub async fn fetch_distance(
        &self,
        query: &DistanceQuery,
    ) -> Result<DistanceResults, DistanceMatrixError> {
        let canonical =
            CanonicalQuery::resolve(query, self.params.credential(), Timestamp::now())?;
        let raw = self.fetch(&canonical).await?;

        normalize(&raw, &canonical)
    }

    async fn fetch(&self, query: &CanonicalQuery) -> Result<MatrixResponse, DistanceMatrixError> {
        debug!(
            "GoogleMatrixApi: Requesting matrix for {} -> {}",
            query.origins, query.destinations
        );

        let response = self
            .client
            .get(&self.params.base_url)
            .query(&query.to_query_pairs())
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.text().await?;
            let raw = serde_json::from_str(&body)?;
            Ok(raw)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(DistanceMatrixError::Api { status, message })
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::distance_query::DistanceQueryBuilder;

    #[test]
    fn test_parse_matrix_response() {
        let body = r#"{
            "status": "OK",
            "origin_addresses": ["Vancouver, BC, Canada"],
            "destination_addresses": ["San Francisco, CA, USA"],
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "distance": { "text": "1,529 km", "value": 1528699 },
                    "duration": { "text": "15 hours 49 mins", "value": 56920 }
                }]
            }]
        }"#;

        let raw: MatrixResponse = serde_json::from_str(body).unwrap();

        assert_eq!(raw.status, "OK");
        assert_eq!(raw.origin_addresses.len(), 1);
        assert_eq!(raw.rows.len(), 1);

        let element = &raw.rows[0].elements[0];
        assert_eq!(element.distance.as_ref().unwrap().value, 1528699);
        assert!(element.duration_in_traffic.is_none());
    }

    #[test]
    fn test_parse_error_response_without_rows() {
        let body = r#"{
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }"#;

        let raw: MatrixResponse = serde_json::from_str(body).unwrap();

        assert_eq!(raw.status, "REQUEST_DENIED");
        assert!(raw.rows.is_empty());
    }

    #[test]
    fn test_business_credential_takes_priority_over_key() {
        let params = GoogleMatrixClientParams {
            api_key: Some(String::from("test-key")),
            client_id: Some(String::from("test-client")),
            signature: Some(String::from("test-signature")),
            ..GoogleMatrixClientParams::default()
        };

        assert!(matches!(
            params.credential(),
            Credential::Business { .. }
        ));
    }

    #[test]
    fn test_partial_business_pair_falls_back_to_key() {
        let params = GoogleMatrixClientParams {
            api_key: Some(String::from("test-key")),
            client_id: Some(String::from("test-client")),
            ..GoogleMatrixClientParams::default()
        };

        match params.credential() {
            Credential::Key(key) => assert_eq!(key, "test-key"),
            other => panic!("expected key credential, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_origin_fails_before_any_request() {
        // Unroutable base URL: a transport attempt would surface as a
        // Request error, not an argument error.
        let client = GoogleMatrixClient::new(GoogleMatrixClientParams {
            base_url: String::from("http://127.0.0.1:0"),
            ..GoogleMatrixClientParams::default()
        });

        let query = DistanceQueryBuilder::default()
            .with_destination("San Francisco CA")
            .build();

        let error = client.fetch_distance(&query).await.unwrap_err();
        assert!(matches!(error, DistanceMatrixError::InvalidOrigin));
    }
}
