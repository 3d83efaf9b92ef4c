use chrono::{DateTime, Local};

use skycast_core::theme::Rgb;
use skycast_core::{Theme, WeatherRecord};

use super::{Render, date_line};

const RESET: &str = "\x1b[0m";
const BANNER_WIDTH: usize = 36;

/// Truecolor rendering: gradient banner plus theme text/accent colors.
pub struct AnsiRenderer;

fn fg(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

fn bg(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

fn banner(theme: &Theme) -> String {
    let band = " ".repeat(BANNER_WIDTH / 3);
    let mut out = String::new();
    for color in theme.gradient {
        out.push_str(&bg(color));
        out.push_str(&band);
    }
    out.push_str(RESET);
    out
}

impl Render for AnsiRenderer {
    fn weather(&self, record: &WeatherRecord, theme: &Theme, now: DateTime<Local>) -> String {
        let text = fg(theme.text);
        let accent = fg(theme.accent);
        format!(
            "{banner}\n{text}{city}{RESET}\n{text}{date}{RESET}\n\n{accent}{temp}°{RESET}  {text}{cond}{RESET}\n{text}H {accent}{max}°{RESET}{text} / L {accent}{min}°{RESET}\n{banner}",
            banner = banner(theme),
            city = record.city,
            date = date_line(now),
            temp = record.temperature,
            cond = record.description(),
            max = record.max_temp,
            min = record.min_temp,
        )
    }
}
