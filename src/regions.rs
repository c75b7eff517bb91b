//! Region definitions.
//!
//! The canonical list of selectable regions, their city allow-lists,
//! the country bounding box, and the map presets handed to the
//! presentation layer. Other modules reference regions from here rather
//! than hardcoding city names.

use crate::error::{AppError, Result};

/// Geographic scope for a pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Whole-country view; filtering by this region is the identity.
    Mexico,
    /// Guanajuato state, selected by city allow-list.
    Guanajuato,
}

/// Cities counted as part of the Guanajuato subregion. Matching is
/// case-sensitive and exact — these spellings mirror what the upstream
/// API reports.
pub static GUANAJUATO_CITIES: &[&str] =
    &["Leon", "Celaya", "Irapuato", "Salamanca", "Guanajuato"];

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lon
            && longitude <= self.max_lon
    }
}

/// Geographic bounds of Mexico, used to sanitize coordinate outliers
/// before mapping.
pub const MEXICO_BOUNDS: BoundingBox = BoundingBox {
    min_lat: 14.0,
    max_lat: 33.0,
    min_lon: -118.5,
    max_lon: -86.0,
};

/// Default map center and zoom for a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Region {
    /// Cities belonging to this region, or `None` for the whole country.
    pub fn city_allow_list(&self) -> Option<&'static [&'static str]> {
        match self {
            Region::Mexico => None,
            Region::Guanajuato => Some(GUANAJUATO_CITIES),
        }
    }

    /// Map preset shown before any point is plotted.
    pub fn map_view(&self) -> MapView {
        match self {
            Region::Mexico => MapView {
                latitude: 23.6345,
                longitude: -102.5528,
                zoom: 4.5,
            },
            Region::Guanajuato => MapView {
                latitude: 21.019,
                longitude: -101.257,
                zoom: 8.0,
            },
        }
    }

    /// Parses a region name as written in the config file.
    pub fn from_name(name: &str) -> Result<Region> {
        match name {
            "mexico" => Ok(Region::Mexico),
            "guanajuato" => Ok(Region::Guanajuato),
            other => Err(AppError::Config(format!(
                "Unknown region '{}', expected 'mexico' or 'guanajuato'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Mexico => write!(f, "Mexico (whole country)"),
            Region::Guanajuato => write!(f, "Guanajuato"),
        }
    }
}
