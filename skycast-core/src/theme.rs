//! Time-of-day color themes.
//!
//! A theme is a pure function of the wall-clock hour. It is recomputed on
//! every render from the live clock, never cached, so a session that crosses
//! a boundary hour re-themes on its next redraw.

use chrono::{Local, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Background gradient plus text/accent colors for one part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub gradient: [Rgb; 3],
    pub text: Rgb,
    pub accent: Rgb,
}

/// Warm yellow to salmon, dark text.
pub const DAWN: Theme = Theme {
    gradient: [
        Rgb::new(0xFF, 0xD1, 0x66),
        Rgb::new(0xFF, 0xB3, 0x47),
        Rgb::new(0xFF, 0x8C, 0x66),
    ],
    text: Rgb::new(0x1B, 0x1B, 0x1B),
    accent: Rgb::new(0xFF, 0x6B, 0x35),
};

/// Blue gradient, white text, gold accent.
pub const DAY: Theme = Theme {
    gradient: [
        Rgb::new(0x4A, 0x90, 0xE2),
        Rgb::new(0x35, 0x7A, 0xBD),
        Rgb::new(0x1E, 0x5F, 0x9A),
    ],
    text: Rgb::new(0xFF, 0xFF, 0xFF),
    accent: Rgb::new(0xFF, 0xD7, 0x00),
};

/// Purple to pink to orange, white text.
pub const DUSK: Theme = Theme {
    gradient: [
        Rgb::new(0x9B, 0x5D, 0xE5),
        Rgb::new(0xF1, 0x5B, 0xB5),
        Rgb::new(0xFF, 0x7F, 0x5B),
    ],
    text: Rgb::new(0xFF, 0xFF, 0xFF),
    accent: Rgb::new(0xFF, 0xE1, 0x56),
};

/// Dark teal/navy, white text, cyan accent.
pub const NIGHT: Theme = Theme {
    gradient: [
        Rgb::new(0x0F, 0x20, 0x27),
        Rgb::new(0x20, 0x3A, 0x43),
        Rgb::new(0x2C, 0x53, 0x64),
    ],
    text: Rgb::new(0xFF, 0xFF, 0xFF),
    accent: Rgb::new(0x00, 0xB4, 0xD8),
};

/// Theme for an hour of the day (0-23). Ranges are half-open: [5,9) dawn,
/// [9,17) day, [17,20) dusk, everything else night.
pub fn theme_for(hour: u32) -> Theme {
    match hour {
        5..=8 => DAWN,
        9..=16 => DAY,
        17..=19 => DUSK,
        _ => NIGHT,
    }
}

/// Theme for right now, from the local clock.
pub fn current_theme() -> Theme {
    theme_for(Local::now().hour())
}
