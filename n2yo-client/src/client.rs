///! N2YO REST API client
///!
///! Endpoints follow the pattern
///! `https://api.n2yo.com/rest/v1/satellite/<op>/<params...>&apiKey=<key>`.
///! The key is appended after a literal `&apiKey=` rather than a `?` query
///! separator; the API accepts exactly this shape, so the builder reproduces
///! it verbatim. Segments and key are embedded without URL-encoding.

use crate::decode;
use crate::error::{DecodeError, Error, Result, TransportError};
use crate::transport::{HttpTransport, Transport};
use crate::types::{PositionQueryResult, RadioPassQueryResult, VisiblePassQueryResult};
use serde_json::Value;
use std::time::Duration;

const API_BASE: &str = "https://api.n2yo.com/rest/v1/satellite";

/// Client for the N2YO satellite-tracking REST API.
///
/// Holds the API key and a reusable transport. The client adds no locking
/// of its own: concurrent calls on one instance are safe exactly when the
/// transport is, which the bundled [`HttpTransport`] is.
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use n2yo_client::Client;
///
/// let client = Client::new(std::env::var("N2YO_API_KEY")?)?;
/// let result = client.get_positions(25544, 41.702, -76.014, 0.0, 2).await?;
/// println!("{} positions", result.context.positions.len());
/// # Ok(())
/// # }
/// ```
pub struct Client<T: Transport> {
    transport: T,
    api_key: String,
}

impl Client<HttpTransport> {
    /// Create a client over the bundled HTTP transport.
    pub fn new(api_key: String) -> Result<Self, TransportError> {
        Ok(Self::with_transport(HttpTransport::new()?, api_key))
    }
}

impl<T: Transport> Client<T> {
    /// Create a client over a caller-supplied transport.
    pub fn with_transport(transport: T, api_key: String) -> Self {
        Self { transport, api_key }
    }

    /// Future positions of a satellite as seen from an observer.
    ///
    /// Returns `count` positions, one per second starting now.
    /// Latitude/longitude are in decimal degrees, altitude in meters.
    pub async fn get_positions(
        &self,
        id: u32,
        latitude: f32,
        longitude: f32,
        altitude: f32,
        count: u32,
    ) -> Result<PositionQueryResult> {
        tracing::debug!("Requesting {} positions for satellite {}", count, id);
        let segments = [
            "positions".to_string(),
            id.to_string(),
            latitude.to_string(),
            longitude.to_string(),
            altitude.to_string(),
            count.to_string(),
        ];
        let result = self.execute_query(&segments, decode::positions).await?;
        tracing::debug!(
            "Fetched {} positions for {} ({} transactions used)",
            result.context.positions.len(),
            result.context.satellite.name,
            result.transaction_count
        );
        Ok(result)
    }

    /// Upcoming radio passes of a satellite over an observer.
    ///
    /// Predicts over the next `days` days (API maximum 10) and reports
    /// only passes peaking at or above `min_elevation` degrees.
    pub async fn get_radio_passes(
        &self,
        id: u32,
        latitude: f32,
        longitude: f32,
        altitude: f32,
        days: u32,
        min_elevation: u32,
    ) -> Result<RadioPassQueryResult> {
        tracing::debug!(
            "Requesting radio passes for satellite {} over {} days",
            id,
            days
        );
        let segments = [
            "radiopasses".to_string(),
            id.to_string(),
            latitude.to_string(),
            longitude.to_string(),
            altitude.to_string(),
            days.to_string(),
            min_elevation.to_string(),
        ];
        let result = self.execute_query(&segments, decode::radio_passes).await?;
        tracing::debug!(
            "Fetched {} radio passes for {} ({} transactions used)",
            result.context.passes.len(),
            result.context.satellite.name,
            result.transaction_count
        );
        Ok(result)
    }

    /// Upcoming optically visible passes of a satellite over an observer.
    ///
    /// Predicts over the next `days` days and reports only passes visible
    /// for at least `min_visible` (sent to the API as whole seconds).
    pub async fn get_visual_passes(
        &self,
        id: u32,
        latitude: f32,
        longitude: f32,
        altitude: f32,
        days: u32,
        min_visible: Duration,
    ) -> Result<VisiblePassQueryResult> {
        tracing::debug!(
            "Requesting visual passes for satellite {} over {} days",
            id,
            days
        );
        let segments = [
            "visualpasses".to_string(),
            id.to_string(),
            latitude.to_string(),
            longitude.to_string(),
            altitude.to_string(),
            days.to_string(),
            min_visible.as_secs().to_string(),
        ];
        let result = self.execute_query(&segments, decode::visual_passes).await?;
        tracing::debug!(
            "Fetched {} visual passes for {} ({} transactions used)",
            result.context.passes.len(),
            result.context.satellite.name,
            result.transaction_count
        );
        Ok(result)
    }

    /// Assemble the request target from path segments and the held key.
    fn build_uri(&self, segments: &[String]) -> String {
        let mut uri = String::from(API_BASE);
        for segment in segments {
            uri.push('/');
            uri.push_str(segment);
        }
        uri.push_str("&apiKey=");
        uri.push_str(&self.api_key);
        uri
    }

    /// Run one request/decode cycle: fetch the URI, parse the body as
    /// JSON, fail on a server-reported `error` field, then hand the
    /// document to the endpoint decoder.
    async fn execute_query<R>(
        &self,
        segments: &[String],
        decode_fn: fn(&Value) -> Result<R, DecodeError>,
    ) -> Result<R> {
        let uri = self.build_uri(segments);

        let body = self
            .transport
            .fetch_text(&uri)
            .await
            .map_err(|source| Error::Download {
                uri: uri.clone(),
                source,
            })?;

        // A body that is not JSON counts as a download failure, not a
        // decode failure
        let doc: Value = serde_json::from_str(&body).map_err(|source| Error::Download {
            uri,
            source: source.into(),
        })?;

        // The server reports request-level errors in-band; checked before
        // any decoding
        if let Some(message) = doc.get("error") {
            let message = match message.as_str() {
                Some(s) => s.to_string(),
                None => message.to_string(),
            };
            return Err(Error::Api(message));
        }

        decode_fn(&doc).map_err(Error::Decode)
    }
}
