//! Themed narrative fallbacks and the queries used to source live context

use super::location_key;

/// The four themes of a multi-story collection, in display order
pub const STORY_THEMES: [&str; 4] = [
    "cultural heritage",
    "pioneering spirit",
    "natural landscape",
    "community resilience",
];

pub const DEFAULT_THEME: &str = "cultural heritage";

fn location_specific(key: &str, theme: &str) -> Option<&'static str> {
    match (key, theme) {
        ("canberra", "cultural heritage") => Some(
            "Canberra, Australia's planned capital, represents a unique blend of Indigenous heritage and modern Australian identity. The Ngunnawal people have been custodians of this land for over 20,000 years, with their cultural sites still visible throughout the region. When Canberra was established in 1913, it became a symbol of Australian federation and democracy, housing Parliament House and national institutions that tell the story of our nation.",
        ),
        ("canberra", "pioneering spirit") => Some(
            "Canberra's creation was itself an act of pioneering vision - building a capital city from scratch in the Australian bush. The city's founders, including Walter Burley Griffin, imagined a garden city that would embody Australian values. Today, Canberra continues this pioneering tradition through innovation in government, education, and technology, making it a hub for forward-thinking Australians.",
        ),
        ("canberra", "natural landscape") => Some(
            "Nestled in the Australian Capital Territory, Canberra is surrounded by native bushland, rolling hills, and the iconic Lake Burley Griffin. The city's design incorporates the natural landscape, with native vegetation and wildlife corridors preserved throughout urban areas. From Mount Ainslie to the Brindabella Ranges, Canberra offers stunning vistas that change with the seasons.",
        ),
        ("canberra", "community resilience") => Some(
            "Canberra's community has faced significant challenges, including the devastating 2003 bushfires that reached the city's suburbs. The response showed the strength of Canberrans - neighbors helping neighbors, emergency services working tirelessly, and the community rebuilding stronger. This resilience continues today as Canberra adapts to climate change and grows as a sustainable, liveable city.",
        ),
        _ => None,
    }
}

fn generic(location: &str, theme: &str) -> String {
    match theme {
        "cultural heritage" => format!(
            "{location} stands as a testament to Australia's rich cultural tapestry. Here, ancient Aboriginal traditions blend with colonial history and modern multicultural influences. The land holds stories of traditional custodians who have maintained their connection to country for thousands of years, alongside tales of early settlers who built communities with determination and hope."
        ),
        "pioneering spirit" => format!(
            "The pioneering spirit of {location} reflects the resilience and determination that built rural Australia. From early explorers and settlers to modern farmers and entrepreneurs, this region has been shaped by people willing to take on challenges and build something lasting. Their legacy lives on in the strong communities and thriving industries that define {location} today."
        ),
        "natural landscape" => format!(
            "{location}'s natural landscape tells a story of ancient geology and diverse ecosystems. From rolling hills to vast plains, from native bushland to cultivated fields, the environment here has shaped both human settlement and wildlife habitats. This land continues to inspire visitors with its raw beauty and ecological significance."
        ),
        "community resilience" => format!(
            "The people of {location} have shown remarkable resilience through droughts, floods, and other challenges that test rural Australian communities. Their ability to come together, support one another, and rebuild stronger demonstrates the enduring spirit that defines regional Australia. This resilience continues to be the foundation of community life."
        ),
        _ => format!(
            "Discover the remarkable story of {location}, where Australian heritage and community spirit create something truly special."
        ),
    }
}

/// Fallback narrative for a location and theme.
///
/// A location-specific entry wins over the theme template, which wins over
/// the catch-all template.
pub fn story(location: &str, theme: &str) -> String {
    location_specific(&location_key(location), theme)
        .map(str::to_string)
        .unwrap_or_else(|| generic(location, theme))
}

/// Search query used to source live context for a themed narrative
pub fn context_query(location: &str, theme: &str) -> String {
    match theme {
        "cultural heritage" => format!("{location} Australia Indigenous culture history"),
        "pioneering spirit" => format!("{location} Australia pioneers settlers farming"),
        "natural landscape" => format!("{location} Australia landscape geography"),
        "community resilience" => format!("{location} Australia community challenges recovery"),
        _ => format!("{location} Australia history"),
    }
}

/// Upper-case the first character ("natural landscape" -> "Natural landscape")
pub fn capitalize(theme: &str) -> String {
    let mut chars = theme.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
