///! Endpoint decoders mapping parsed JSON documents to typed results
///!
///! Each decoder deserializes the document into a private raw struct
///! mirroring the wire schema, then maps it onto the public result types.
///! Pass responses declare their entry count in `info.passescount`; a
///! mismatch with the actual array length fails the decode.

use crate::error::DecodeError;
use crate::types::{
    PassAzimuth, PositionContext, PositionQueryResult, QueryResult, RadioPass, RadioPassContext,
    RadioPassQueryResult, Satellite, SatellitePass, SatellitePosition, VisiblePass,
    VisiblePassContext, VisiblePassQueryResult,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Raw positions response
#[derive(Debug, Deserialize)]
struct PositionsDocument {
    info: PositionsInfo,
    #[serde(default)]
    positions: Vec<RawPosition>,
}

#[derive(Debug, Deserialize)]
struct PositionsInfo {
    satid: u32,
    satname: String,
    transactionscount: u32,
}

/// Raw pass response, shared by the radio and visual endpoints
#[derive(Debug, Deserialize)]
struct PassesDocument<P> {
    info: PassesInfo,
    // A bare `default` would add a `P: Default` bound to the derived impl
    #[serde(default = "Vec::new")]
    passes: Vec<P>,
}

#[derive(Debug, Deserialize)]
struct PassesInfo {
    satid: u32,
    satname: String,
    transactionscount: u32,
    passescount: u32,
}

/// One entry of the `positions` array
#[derive(Debug, Deserialize)]
struct RawPosition {
    ra: f32,
    dec: f32,
    timestamp: f64,
    azimuth: f32,
    elevation: f32,
    satlatitude: f32,
    satlongitude: f32,
}

/// One entry of the `passes` array, fields common to both pass kinds
#[derive(Debug, Deserialize)]
struct RawPass {
    #[serde(rename = "startUTC")]
    start_utc: i64,
    #[serde(rename = "endUTC")]
    end_utc: i64,
    #[serde(rename = "startAz")]
    start_az: f32,
    #[serde(rename = "maxAz")]
    max_az: f32,
    #[serde(rename = "endAz")]
    end_az: f32,
    #[serde(rename = "maxEl")]
    max_el: f32,
}

/// One entry of the `passes` array on the visual endpoint
#[derive(Debug, Deserialize)]
struct RawVisualPass {
    #[serde(flatten)]
    base: RawPass,
    duration: u64,
    mag: f32,
}

impl RawPosition {
    fn into_position(self) -> Result<SatellitePosition, DecodeError> {
        Ok(SatellitePosition {
            ra: self.ra,
            dec: self.dec,
            // The wire carries fractional epoch seconds; truncated here
            timestamp: epoch_to_utc(self.timestamp as i64)?,
            azimuth: self.azimuth,
            elevation: self.elevation,
            latitude: self.satlatitude,
            longitude: self.satlongitude,
        })
    }
}

impl RawPass {
    fn into_pass(self) -> Result<SatellitePass, DecodeError> {
        Ok(SatellitePass {
            rise: epoch_to_utc(self.start_utc)?,
            set: epoch_to_utc(self.end_utc)?,
            elevation: self.max_el,
            azimuth: PassAzimuth {
                start: self.start_az,
                max: self.max_az,
                end: self.end_az,
            },
        })
    }
}

fn epoch_to_utc(secs: i64) -> Result<DateTime<Utc>, DecodeError> {
    DateTime::from_timestamp(secs, 0).ok_or(DecodeError::EpochOutOfRange(secs))
}

fn check_pass_count(declared: usize, actual: usize) -> Result<(), DecodeError> {
    if declared != actual {
        return Err(DecodeError::CountMismatch { declared, actual });
    }
    Ok(())
}

/// Decode a positions response. A missing `positions` array means zero
/// positions, not a schema error.
pub(crate) fn positions(doc: &Value) -> Result<PositionQueryResult, DecodeError> {
    let doc = PositionsDocument::deserialize(doc)?;

    let mut positions = Vec::with_capacity(doc.positions.len());
    for raw in doc.positions {
        positions.push(raw.into_position()?);
    }

    Ok(QueryResult {
        context: PositionContext {
            satellite: Satellite {
                id: doc.info.satid,
                name: doc.info.satname,
            },
            positions,
        },
        transaction_count: doc.info.transactionscount,
    })
}

/// Decode a radio-pass response.
pub(crate) fn radio_passes(doc: &Value) -> Result<RadioPassQueryResult, DecodeError> {
    let doc: PassesDocument<RawPass> = PassesDocument::deserialize(doc)?;

    let declared = doc.info.passescount as usize;
    check_pass_count(declared, doc.passes.len())?;

    let mut passes = Vec::with_capacity(declared);
    for raw in doc.passes {
        passes.push(RadioPass {
            pass: raw.into_pass()?,
        });
    }

    Ok(QueryResult {
        context: RadioPassContext {
            satellite: Satellite {
                id: doc.info.satid,
                name: doc.info.satname,
            },
            passes,
        },
        transaction_count: doc.info.transactionscount,
    })
}

/// Decode a visual-pass response.
pub(crate) fn visual_passes(doc: &Value) -> Result<VisiblePassQueryResult, DecodeError> {
    let doc: PassesDocument<RawVisualPass> = PassesDocument::deserialize(doc)?;

    let declared = doc.info.passescount as usize;
    check_pass_count(declared, doc.passes.len())?;

    let mut passes = Vec::with_capacity(declared);
    for raw in doc.passes {
        passes.push(VisiblePass {
            pass: raw.base.into_pass()?,
            duration: Duration::from_secs(raw.duration),
            magnitude: raw.mag,
        });
    }

    Ok(QueryResult {
        context: VisiblePassContext {
            satellite: Satellite {
                id: doc.info.satid,
                name: doc.info.satname,
            },
            passes,
        },
        transaction_count: doc.info.transactionscount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_positions_two_entries() {
        // Extra fields like "sataltitude" and "eclipsed" must be ignored
        let doc = parse(
            r#"{
            "info": {"satname": "SPACE STATION", "satid": 25544, "transactionscount": 5},
            "positions": [
                {"satlatitude": -39.903, "satlongitude": 158.289, "sataltitude": 417.85,
                 "azimuth": 254.31, "elevation": -69.09, "ra": 44.77, "dec": -43.99,
                 "timestamp": 1521354418, "eclipsed": true},
                {"satlatitude": -39.85, "satlongitude": 158.35, "sataltitude": 417.84,
                 "azimuth": 254.27, "elevation": -69.06, "ra": 44.81, "dec": -43.97,
                 "timestamp": 1521354419, "eclipsed": true}
            ]
        }"#,
        );

        let result = positions(&doc).unwrap();
        assert_eq!(result.transaction_count, 5);
        assert_eq!(result.context.satellite.id, 25544);
        assert_eq!(result.context.satellite.name, "SPACE STATION");
        assert_eq!(result.context.positions.len(), 2);

        let p = &result.context.positions[0];
        assert_eq!(p.ra, 44.77);
        assert_eq!(p.dec, -43.99);
        assert_eq!(p.azimuth, 254.31);
        assert_eq!(p.elevation, -69.09);
        assert_eq!(p.latitude, -39.903);
        assert_eq!(p.longitude, 158.289);
        assert_eq!(p.timestamp, DateTime::from_timestamp(1521354418, 0).unwrap());
        assert_eq!(
            result.context.positions[1].timestamp,
            DateTime::from_timestamp(1521354419, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_positions_missing_array_is_empty() {
        let doc = parse(
            r#"{"info": {"satname": "SPACE STATION", "satid": 25544, "transactionscount": 3}}"#,
        );
        let result = positions(&doc).unwrap();
        assert_eq!(result.context.positions.len(), 0);
        assert_eq!(result.transaction_count, 3);
    }

    #[test]
    fn test_decode_positions_fractional_timestamp_truncates() {
        let doc = parse(
            r#"{
            "info": {"satname": "SPACE STATION", "satid": 25544, "transactionscount": 1},
            "positions": [
                {"satlatitude": 0.0, "satlongitude": 0.0, "azimuth": 0.0, "elevation": 0.0,
                 "ra": 0.0, "dec": 0.0, "timestamp": 1521354418.75}
            ]
        }"#,
        );
        let result = positions(&doc).unwrap();
        assert_eq!(
            result.context.positions[0].timestamp,
            DateTime::from_timestamp(1521354418, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_missing_satid_names_field() {
        let doc = parse(
            r#"{"info": {"satname": "SPACE STATION", "transactionscount": 1}, "positions": []}"#,
        );
        let err = positions(&doc).unwrap_err();
        match &err {
            DecodeError::Schema(e) => assert!(e.to_string().contains("satid")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_radio_passes() {
        let doc = parse(
            r#"{
            "info": {"satid": 25544, "satname": "SPACE STATION", "transactionscount": 4, "passescount": 2},
            "passes": [
                {"startAz": 311.57, "startAzCompass": "NW", "startUTC": 1521368025,
                 "maxAz": 37.98, "maxAzCompass": "NE", "maxEl": 52.19, "maxUTC": 1521368345,
                 "endAz": 118.6, "endAzCompass": "ESE", "endUTC": 1521368660},
                {"startAz": 287.75, "startAzCompass": "WNW", "startUTC": 1521451295,
                 "maxAz": 215.5, "maxAzCompass": "SW", "maxEl": 43.94, "maxUTC": 1521451615,
                 "endAz": 143.3, "endAzCompass": "SE", "endUTC": 1521451925}
            ]
        }"#,
        );

        let result = radio_passes(&doc).unwrap();
        assert_eq!(result.transaction_count, 4);
        assert_eq!(result.context.satellite.name, "SPACE STATION");
        assert_eq!(result.context.passes.len(), 2);

        let pass = &result.context.passes[0].pass;
        assert_eq!(pass.rise, DateTime::from_timestamp(1521368025, 0).unwrap());
        assert_eq!(pass.set, DateTime::from_timestamp(1521368660, 0).unwrap());
        assert_eq!(pass.elevation, 52.19);
        assert_eq!(pass.azimuth.start, 311.57);
        assert_eq!(pass.azimuth.max, 37.98);
        assert_eq!(pass.azimuth.end, 118.6);
    }

    #[test]
    fn test_decode_visual_passes() {
        let doc = parse(
            r#"{
            "info": {"satid": 25544, "satname": "SPACE STATION", "transactionscount": 2, "passescount": 1},
            "passes": [
                {"startAz": 307.21, "startEl": 13.08, "startUTC": 1521451295,
                 "maxAz": 225.45, "maxEl": 78.27, "maxUTC": 1521451615,
                 "endAz": 132.82, "endEl": 0.0, "endUTC": 1521451925,
                 "mag": -2.4, "duration": 485}
            ]
        }"#,
        );

        let result = visual_passes(&doc).unwrap();
        assert_eq!(result.context.passes.len(), 1);

        let pass = &result.context.passes[0];
        assert_eq!(pass.duration, Duration::from_secs(485));
        assert_eq!(pass.magnitude, -2.4);
        assert_eq!(pass.pass.rise, DateTime::from_timestamp(1521451295, 0).unwrap());
        assert_eq!(pass.pass.set, DateTime::from_timestamp(1521451925, 0).unwrap());
        assert_eq!(pass.pass.elevation, 78.27);
        assert_eq!(pass.pass.azimuth.max, 225.45);
    }

    #[test]
    fn test_decode_pass_count_overdeclared_fails() {
        let doc = parse(
            r#"{
            "info": {"satid": 25544, "satname": "SPACE STATION", "transactionscount": 1, "passescount": 3},
            "passes": [
                {"startAz": 311.57, "startUTC": 1521368025, "maxAz": 37.98, "maxEl": 52.19,
                 "endAz": 118.6, "endUTC": 1521368660}
            ]
        }"#,
        );
        let err = radio_passes(&doc).unwrap_err();
        match err {
            DecodeError::CountMismatch { declared, actual } => {
                assert_eq!(declared, 3);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_pass_count_underdeclared_fails() {
        let doc = parse(
            r#"{
            "info": {"satid": 25544, "satname": "SPACE STATION", "transactionscount": 1, "passescount": 0},
            "passes": [
                {"startAz": 311.57, "startUTC": 1521368025, "maxAz": 37.98, "maxEl": 52.19,
                 "endAz": 118.6, "endUTC": 1521368660}
            ]
        }"#,
        );
        let err = radio_passes(&doc).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CountMismatch {
                declared: 0,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_decode_pass_count_missing_array_fails() {
        // An absent array decodes as zero passes, which the declared count
        // must still match
        let doc = parse(
            r#"{"info": {"satid": 25544, "satname": "SPACE STATION", "transactionscount": 1, "passescount": 3}}"#,
        );
        let err = visual_passes(&doc).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CountMismatch {
                declared: 3,
                actual: 0
            }
        ));
    }

    #[test]
    fn test_decode_epoch_out_of_range_fails() {
        let doc = parse(
            r#"{
            "info": {"satid": 25544, "satname": "SPACE STATION", "transactionscount": 1, "passescount": 1},
            "passes": [
                {"startAz": 311.57, "startUTC": 9223372036854775807, "maxAz": 37.98,
                 "maxEl": 52.19, "endAz": 118.6, "endUTC": 1521368660}
            ]
        }"#,
        );
        let err = radio_passes(&doc).unwrap_err();
        assert!(matches!(err, DecodeError::EpochOutOfRange(_)));
    }
}
