use ratatui::style::Color;

/// Active palette variant. Toggled at runtime with the theme hotkey; the
/// choice is not persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette::LIGHT,
            Self::Dark => Palette::DARK,
        }
    }
}

/// Colour palette used across the TUI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Normal (unselected) row text.
    pub normal: Color,
    /// Currently selected row.
    pub selected_fg: Color,
    pub selected_bg: Color,
    /// Header / accent elements.
    pub accent: Color,
    /// Prices.
    pub price: Color,
    /// Footer hint bar and other dimmed text.
    pub dim: Color,
    /// Error banner.
    pub error_fg: Color,
    pub error_bg: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        normal: Color::White,
        selected_fg: Color::White,
        selected_bg: Color::Indexed(25), // blue
        accent: Color::Cyan,
        price: Color::Green,
        dim: Color::Indexed(244),
        error_fg: Color::White,
        error_bg: Color::Red,
    };

    pub const LIGHT: Palette = Palette {
        normal: Color::Black,
        selected_fg: Color::White,
        selected_bg: Color::Indexed(31),
        accent: Color::Blue,
        price: Color::Indexed(28), // dark green
        dim: Color::Indexed(241),
        error_fg: Color::White,
        error_bg: Color::Indexed(124),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_case_and_whitespace_variants() {
        assert_eq!(Theme::parse(" Dark "), Some(Theme::Dark));
        assert_eq!(Theme::parse("LIGHT"), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
