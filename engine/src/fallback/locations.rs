//! Capital-city lookup table for location search

use sdk::Coordinates;

/// A city the engine knows without any provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownLocation {
    pub key: &'static str,
    pub coordinates: Coordinates,
    pub description: &'static str,
}

/// Region reported for every location summary
pub const REGION: &str = "Australia";

pub const LOCATIONS: [KnownLocation; 8] = [
    KnownLocation {
        key: "sydney",
        coordinates: Coordinates::new(-33.8688, 151.2093),
        description: "Australia's largest city, known for its iconic Opera House and Harbour Bridge.",
    },
    KnownLocation {
        key: "melbourne",
        coordinates: Coordinates::new(-37.8136, 144.9631),
        description: "Cultural capital of Australia, famous for its coffee culture and street art.",
    },
    KnownLocation {
        key: "brisbane",
        coordinates: Coordinates::new(-27.4698, 153.0251),
        description: "Subtropical capital of Queensland, gateway to the Gold Coast.",
    },
    KnownLocation {
        key: "perth",
        coordinates: Coordinates::new(-31.9505, 115.8605),
        description: "Western Australia's capital, one of the most isolated major cities in the world.",
    },
    KnownLocation {
        key: "adelaide",
        coordinates: Coordinates::new(-34.9285, 138.6007),
        description: "City of churches, known for its festivals and wine regions.",
    },
    KnownLocation {
        key: "darwin",
        coordinates: Coordinates::new(-12.4634, 130.8456),
        description: "Tropical capital of the Northern Territory, gateway to Asia.",
    },
    KnownLocation {
        key: "canberra",
        coordinates: Coordinates::new(-35.2809, 149.1300),
        description: "Australia's planned capital city, home to national institutions.",
    },
    KnownLocation {
        key: "hobart",
        coordinates: Coordinates::new(-42.8821, 147.3272),
        description: "Tasmania's capital, known for MONA and its historic waterfront.",
    },
];

/// Best table entry for a free-text query.
///
/// Exact key first, then the first key that contains or is contained in the
/// query, then Sydney.
pub fn best_match(query: &str) -> &'static KnownLocation {
    let normalized = query.trim().to_lowercase();

    LOCATIONS
        .iter()
        .find(|location| location.key == normalized)
        .or_else(|| {
            LOCATIONS.iter().find(|location| {
                location.key.contains(normalized.as_str()) || normalized.contains(location.key)
            })
        })
        .unwrap_or(&LOCATIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(best_match("  HOBART ").key, "hobart");
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(best_match("Greater Perth area").key, "perth");
        assert_eq!(best_match("adel").key, "adelaide");
    }

    #[test]
    fn test_unknown_defaults_to_sydney() {
        let location = best_match("Wagga Wagga");
        assert_eq!(location.key, "sydney");
        assert_eq!(location.coordinates, Coordinates::new(-33.8688, 151.2093));
    }
}
