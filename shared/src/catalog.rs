use crate::Coordinate;

/// Built-in destinations, in the order the UI renders them.
pub const DESTINATIONS: &[(&str, Coordinate)] = &[
    (
        "Google HQ",
        Coordinate {
            lat: 37.422,
            lon: -122.084,
        },
    ),
    (
        "Mountain View Library",
        Coordinate {
            lat: 37.395682,
            lon: -122.078713,
        },
    ),
    (
        "Shoreline Amphitheatre",
        Coordinate {
            lat: 37.4266,
            lon: -122.08,
        },
    ),
    (
        "NASA Ames Research Center",
        Coordinate {
            lat: 37.408824,
            lon: -122.064114,
        },
    ),
    (
        "Stanford University",
        Coordinate {
            lat: 37.4275,
            lon: -122.1697,
        },
    ),
];

pub fn resolve(name: &str) -> Option<Coordinate> {
    DESTINATIONS
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, coord)| *coord)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    DESTINATIONS.iter().map(|(name, _)| *name)
}
