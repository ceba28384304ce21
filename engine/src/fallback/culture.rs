//! Cultural fallbacks: insight sections, city recommendations and
//! location stories

use super::location_key;
use sdk::{DataSource, RecommendationRecord};

fn item(name: String, category: &str, description: String, url: Option<&str>) -> RecommendationRecord {
    RecommendationRecord {
        name,
        category: category.to_string(),
        description,
        url: url.map(str::to_string),
        data_source: DataSource::Fallback,
    }
}

pub fn art(location: &str) -> Vec<RecommendationRecord> {
    vec![
        item(
            format!("{location} Art Gallery"),
            "Various",
            format!("Main art gallery in {location}"),
            None,
        ),
        item(
            "Aboriginal Art Center".to_string(),
            "Traditional",
            "Traditional Aboriginal art and culture".to_string(),
            None,
        ),
        item(
            "Contemporary Exhibitions".to_string(),
            "Mixed Media",
            "Contemporary art exhibitions".to_string(),
            None,
        ),
    ]
}

pub fn food(location: &str) -> Vec<RecommendationRecord> {
    vec![
        item(
            format!("{location} Specialties"),
            "Regional",
            format!("Local food specialties of {location}"),
            None,
        ),
        item(
            "Bush Tucker".to_string(),
            "Traditional",
            "Native Australian ingredients and dishes".to_string(),
            None,
        ),
        item(
            "Local Markets".to_string(),
            "Fresh Produce",
            "Fresh local produce and artisan foods".to_string(),
            None,
        ),
    ]
}

pub fn events(location: &str) -> Vec<RecommendationRecord> {
    vec![
        item(
            format!("{location} Festival"),
            "Annual",
            format!("Main cultural festival in {location}"),
            None,
        ),
        item(
            "NAIDOC Week".to_string(),
            "July",
            "Aboriginal and Torres Strait Islander culture celebration".to_string(),
            Some("https://www.naidoc.org.au"),
        ),
        item(
            "Community Markets".to_string(),
            "Weekly",
            "Local community markets and events".to_string(),
            None,
        ),
    ]
}

/// Music, movies and books for one city
pub struct CityRecommendations {
    pub music: Vec<RecommendationRecord>,
    pub movies: Vec<RecommendationRecord>,
    pub books: Vec<RecommendationRecord>,
}

struct CityTable {
    music: &'static [&'static str],
    movies: &'static [&'static str],
    books: &'static [&'static str],
}

const SYDNEY: CityTable = CityTable {
    music: &["Midnight Oil", "INXS", "Silverchair"],
    movies: &["The Castle", "Muriel's Wedding"],
    books: &["Cloudstreet", "The Thorn Birds"],
};

const MELBOURNE: CityTable = CityTable {
    music: &["Nick Cave", "Crowded House", "Jet"],
    movies: &["Animal Kingdom", "The Dish"],
    books: &["The Secret River", "Picnic at Hanging Rock"],
};

const BRISBANE: CityTable = CityTable {
    music: &["Powderfinger", "Savage Garden", "The Saints"],
    movies: &["Crocodile Dundee", "Australia"],
    books: &["The Book Thief", "Shantaram"],
};

/// Hand-picked recommendations; unknown cities get Sydney's list
pub fn recommendations(location: &str) -> CityRecommendations {
    let table = match location_key(location).as_str() {
        "melbourne" => &MELBOURNE,
        "brisbane" => &BRISBANE,
        _ => &SYDNEY,
    };

    CityRecommendations {
        music: table
            .music
            .iter()
            .map(|name| {
                item(
                    name.to_string(),
                    "Australian Music",
                    format!("Popular Australian artist from the {location} music scene"),
                    None,
                )
            })
            .collect(),
        movies: table
            .movies
            .iter()
            .map(|name| {
                item(
                    name.to_string(),
                    "Movie",
                    format!("Australian film featuring themes from {location}"),
                    None,
                )
            })
            .collect(),
        books: table
            .books
            .iter()
            .map(|name| {
                item(
                    name.to_string(),
                    "Book",
                    format!("Australian literature with connections to {location}"),
                    None,
                )
            })
            .collect(),
    }
}

/// Short heritage story for a location card
pub fn location_story(location: &str) -> String {
    match location_key(location).as_str() {
        "sydney" => "From the ancient Gadigal people to modern multicultural metropolis, Sydney's story spans millennia.".to_string(),
        "melbourne" => "Built on Kulin Nation lands, Melbourne grew from a small settlement to Australia's cultural capital.".to_string(),
        "brisbane" => "The Brisbane River winds through country that has been home to the Turrbal and Jagera peoples for thousands of years.".to_string(),
        _ => format!("Discover the rich heritage of {location}, where ancient Aboriginal culture meets modern Australia."),
    }
}

pub const STORY_INSIGHTS: [&str; 4] = [
    "Indigenous heritage and traditional custodians",
    "Colonial history and early settlement",
    "Modern multicultural community",
    "Connection to land and waterways",
];

/// Insights attached to a story sourced from live search
pub const RESEARCHED_STORY_INSIGHTS: [&str; 4] = [
    "Historical significance from Tavily research",
    "Cultural traditions and practices",
    "Indigenous heritage connections",
    "Modern community development",
];
