// Fixed location catalogue shown in the selector and the quick-select grid.

use serde::Serialize;

use crate::types::LocationKey;

/// Every selectable location, in display order.
pub const LOCATIONS: [&str; 24] = [
    "college street",
    "howrah bridge",
    "dhakhineswar",
    "esplanade",
    "park street",
    "kumartuli",
    "princep ghat",
    "kalighat",
    "shobhabazar",
    "borobazar",
    "jorasanko",
    "gariahat",
    "sealdah",
    "victoria",
    "tram depot",
    "ganga ghat",
    "dalhousie",
    "cathedral",
    "belur math",
    "fort william",
    "indian museum",
    "indian coffee house",
    "metcalfe hall",
    "shaheed minar",
];

/// Selector option / quick-select button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationOption {
    pub key: LocationKey,
    pub title: String,
}

/// All locations as `{key, title}` pairs.
pub fn location_options() -> Vec<LocationOption> {
    LOCATIONS
        .iter()
        .filter_map(|raw| LocationKey::parse(raw))
        .map(|key| LocationOption {
            title: key.title(),
            key,
        })
        .collect()
}

pub fn is_known(key: &LocationKey) -> bool {
    LOCATIONS.contains(&key.as_str())
}
