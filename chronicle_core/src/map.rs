// Map markers for the named points of interest.
// Marker rendering and popups belong to the page's tile-map library; this side
// owns the point table and turns a marker activation into a location key.

use serde::Serialize;

use crate::types::{GeoCoord, LocationKey};

pub const MAP_CENTER: GeoCoord = GeoCoord::new(22.5726, 88.3639);
pub const MAP_ZOOM: u8 = 12;
pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

const MAP_POINTS: [(&str, GeoCoord); 24] = [
    ("College Street", GeoCoord::new(22.5744, 88.364)),
    ("Howrah Bridge", GeoCoord::new(22.585, 88.3468)),
    ("Dakshineswar", GeoCoord::new(22.655, 88.3593)),
    ("Esplanade", GeoCoord::new(22.5651, 88.3532)),
    ("Park Street", GeoCoord::new(22.5534, 88.3529)),
    ("Kumartuli", GeoCoord::new(22.6071, 88.362)),
    ("Prinsep Ghat", GeoCoord::new(22.5521, 88.3316)),
    ("Kalighat", GeoCoord::new(22.5203, 88.342)),
    ("Shobhabazar", GeoCoord::new(22.6055, 88.363)),
    ("Borobazar", GeoCoord::new(22.589, 88.357)),
    ("Jorasanko", GeoCoord::new(22.5943, 88.3644)),
    ("Gariahat", GeoCoord::new(22.5145, 88.365)),
    ("Sealdah", GeoCoord::new(22.5685, 88.3747)),
    ("Victoria Memorial", GeoCoord::new(22.5448, 88.3426)),
    ("Tram Depot", GeoCoord::new(22.579, 88.365)),
    ("Ganga Ghat", GeoCoord::new(22.6375, 88.3577)),
    ("Dalhousie", GeoCoord::new(22.5722, 88.3504)),
    ("Cathedral", GeoCoord::new(22.5482, 88.3491)),
    ("Belur Math", GeoCoord::new(22.6315, 88.357)),
    ("Fort William", GeoCoord::new(22.543, 88.3388)),
    ("Indian Museum", GeoCoord::new(22.557, 88.3512)),
    ("Indian Coffee House", GeoCoord::new(22.5847, 88.3635)),
    ("Metcalfe Hall", GeoCoord::new(22.571, 88.3469)),
    ("Shaheed Minar", GeoCoord::new(22.5655, 88.3515)),
];

/// One marker as handed to the map library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: &'static str,
    pub coord: GeoCoord,
    /// Lower-cased display name; what the popup action selects.
    pub key: LocationKey,
    pub popup_html: String,
}

/// Initial view plus every marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSetup {
    pub center: GeoCoord,
    pub zoom: u8,
    pub tile_url: &'static str,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MapView;

impl MapView {
    pub fn new() -> Self {
        MapView
    }

    pub fn markers(&self) -> Vec<MapMarker> {
        MAP_POINTS
            .iter()
            .filter_map(|(name, coord)| {
                let key = LocationKey::parse(name)?;
                Some(MapMarker {
                    name: *name,
                    coord: *coord,
                    popup_html: popup_html(name, &key),
                    key,
                })
            })
            .collect()
    }

    pub fn setup(&self) -> MapSetup {
        MapSetup {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            tile_url: TILE_URL_TEMPLATE,
            markers: self.markers(),
        }
    }

    /// Location key selected by a marker's action control. Accepts either the
    /// display name or the key carried in the popup markup.
    pub fn activate(&self, marker: &str) -> Option<LocationKey> {
        let key = LocationKey::parse(marker)?;
        MAP_POINTS
            .iter()
            .any(|(name, _)| LocationKey::parse(name).as_ref() == Some(&key))
            .then_some(key)
    }
}

fn popup_html(name: &str, key: &LocationKey) -> String {
    format!(
        "<b>{}</b><br><button class=\"map-open\" data-loc=\"{}\">Open Time Travel 🚀</button>",
        name, key
    )
}
