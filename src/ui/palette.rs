//! Light and dark color themes for the play field.

use ratatui::style::Color;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                field: Color::Rgb(0xe0, 0xf7, 0xfa),
                border: Color::Rgb(0x81, 0xd4, 0xfa),
                player: Color::Rgb(0x6a, 0x0d, 0xad),
                obstacle: Color::Rgb(0xff, 0x57, 0x22),
                ground: Color::Rgb(0x79, 0x55, 0x48),
                text: Color::Rgb(0x33, 0x33, 0x33),
            },
            Self::Dark => Palette {
                field: Color::Rgb(0x26, 0x32, 0x38),
                border: Color::Rgb(0x45, 0x5a, 0x64),
                player: Color::Rgb(0x1a, 0x2b, 0x4c),
                obstacle: Color::Rgb(0xff, 0xab, 0x40),
                ground: Color::Rgb(0x4e, 0x34, 0x2e),
                text: Color::Rgb(0xe0, 0xe0, 0xe0),
            },
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

/// Colors used to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub field: Color,
    pub border: Color,
    pub player: Color,
    pub obstacle: Color,
    pub ground: Color,
    pub text: Color,
}
