//! Location capture stub
//!
//! There is no geocoder behind this: coordinates typed by the user are
//! validated and paired with an address drawn from a fixed dataset.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Addresses handed out by [`detect_location`]
pub const ADDRESS_DATASET: [&str; 8] = [
    "123 Main Street, Downtown, Springfield",
    "456 Oak Avenue, Residential Area, Springfield",
    "789 Elm Street, Springfield, USA",
    "321 Pine Road, Green Valley, Springfield",
    "654 Maple Drive, Central Park Area, Springfield",
    "987 Cedar Lane, Industrial District, Springfield",
    "147 Birch Street, North Side, Springfield",
    "258 Willow Court, South Springfield",
];

/// Address shown before any detection ran
pub const DEFAULT_ADDRESS: &str = "789 Elm Street, Springfield, USA";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("Please enter valid latitude and longitude values.")]
    Missing,
    #[error("Invalid latitude: {0}")]
    Latitude(String),
    #[error("Invalid longitude: {0}")]
    Longitude(String),
}

/// Result of a location detection
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLocation {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// "Lat: {lat} N, Lon: {lon} W", using the inputs as typed
    pub coordinates: String,
}

/// Parse typed latitude/longitude inputs
pub fn parse_coordinates(lat_input: &str, lon_input: &str) -> Result<(f64, f64), CoordinateError> {
    let (lat_input, lon_input) = (lat_input.trim(), lon_input.trim());
    if lat_input.is_empty() || lon_input.is_empty() {
        return Err(CoordinateError::Missing);
    }

    let latitude = lat_input
        .parse::<f64>()
        .ok()
        .filter(|lat| lat.is_finite() && (-90.0..=90.0).contains(lat))
        .ok_or_else(|| CoordinateError::Latitude(lat_input.to_string()))?;
    let longitude = lon_input
        .parse::<f64>()
        .ok()
        .filter(|lon| lon.is_finite() && (-180.0..=180.0).contains(lon))
        .ok_or_else(|| CoordinateError::Longitude(lon_input.to_string()))?;

    Ok((latitude, longitude))
}

pub fn coordinate_label(lat_input: &str, lon_input: &str) -> String {
    format!("Lat: {} N, Lon: {} W", lat_input.trim(), lon_input.trim())
}

/// Validate the inputs and pick an address from the dataset
pub fn detect_location(lat_input: &str, lon_input: &str) -> Result<DetectedLocation, CoordinateError> {
    detect_location_with(&mut rand::thread_rng(), lat_input, lon_input)
}

pub fn detect_location_with<R: Rng + ?Sized>(
    rng: &mut R,
    lat_input: &str,
    lon_input: &str,
) -> Result<DetectedLocation, CoordinateError> {
    let (latitude, longitude) = parse_coordinates(lat_input, lon_input)?;
    let address = ADDRESS_DATASET
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_ADDRESS);

    tracing::debug!(latitude, longitude, address, "Location detected");

    Ok(DetectedLocation {
        address: address.to_string(),
        latitude,
        longitude,
        coordinates: coordinate_label(lat_input, lon_input),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates(" 34.0522 ", "118.2437"), Ok((34.0522, 118.2437)));
        assert_eq!(parse_coordinates("", "1"), Err(CoordinateError::Missing));
        assert_eq!(parse_coordinates("1", "   "), Err(CoordinateError::Missing));
        assert_eq!(
            parse_coordinates("north", "1"),
            Err(CoordinateError::Latitude("north".into()))
        );
        assert_eq!(
            parse_coordinates("12", "181"),
            Err(CoordinateError::Longitude("181".into()))
        );
    }

    #[test]
    fn test_detect_location_picks_from_dataset() {
        let mut rng = StdRng::seed_from_u64(7);
        let detected = detect_location_with(&mut rng, "34.0522", "118.2437").unwrap();

        assert!(ADDRESS_DATASET.contains(&detected.address.as_str()));
        assert_eq!(detected.coordinates, "Lat: 34.0522 N, Lon: 118.2437 W");
        assert_eq!(detected.latitude, 34.0522);
    }

    #[test]
    fn test_detect_location_rejects_blank_input() {
        assert_eq!(detect_location("", ""), Err(CoordinateError::Missing));
    }
}
