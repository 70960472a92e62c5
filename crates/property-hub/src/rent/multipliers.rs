/// Neighbourhoods treated as high-value. Matched as case-sensitive substrings.
pub const PREMIUM_LOCATIONS: [&str; 4] = ["Ikoyi", "Victoria Island", "Lekki", "Banana Island"];

pub fn is_premium_location(location: &str) -> bool {
    PREMIUM_LOCATIONS
        .iter()
        .any(|premium| location.contains(premium))
}

/// Bedroom adjustment; counts outside 1-5 are neutral.
pub fn bedroom_multiplier(bedrooms: u8) -> f64 {
    match bedrooms {
        1 => 0.8,
        2 => 1.0,
        3 => 1.2,
        4 => 1.4,
        5 => 1.6,
        _ => 1.0,
    }
}
