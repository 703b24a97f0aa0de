//! Provider condition codes mapped onto the hub's conditions enumeration.

/// Map a provider condition code (thunderstorm 2xx, drizzle 3xx, rain 5xx,
/// snow 6xx, obscuration 7xx, clouds 80x) to the hub's conditions index.
/// Unrecognized codes map to 22, unknown precipitation.
pub fn condition_index(code: u16) -> u8 {
    match code {
        200..=233 => 21, // thunderstorm
        300..=302 => 13, // drizzle
        511 => 27,       // freezing rain
        520..=522 => 15, // rain showers
        500..=510 => 14, // rain
        600..=602 => 19, // snow
        610 => 16,       // rain/snow mix
        611..=612 => 11, // sleet
        621..=623 => 20, // snow showers
        700 => 3,        // mist
        711 => 12,       // smoke
        721 => 8,        // haze
        731 => 1,        // blowing dust
        741 => 6,        // fog
        751 => 25,       // freezing fog
        800 => 29,       // clear
        801 => 30,       // few clouds
        802 => 31,       // scattered clouds
        803 => 32,       // broken clouds
        804 => 33,       // overcast
        _ => 22,
    }
}
