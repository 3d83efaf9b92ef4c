//! WMO weather-code descriptions.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Short human-readable label for a WMO weather code. Unknown codes fall
/// back to "Sunny". Pure and total.
pub fn describe(code: i32) -> &'static str {
    match code {
        0 => "Clear Sky",
        1 => "Mostly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Rime Fog",
        51 => "Light Drizzle",
        53 => "Moderate Drizzle",
        55 => "Heavy Drizzle",
        61 => "Light Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        71 => "Light Snow",
        73 => "Moderate Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80 => "Light Showers",
        81 => "Moderate Showers",
        82 => "Heavy Showers",
        85 => "Light Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with Hail",
        99 => "Severe Thunderstorm",
        _ => "Sunny",
    }
}
