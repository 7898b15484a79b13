use ratatui::style::Color;

use crate::config::Tui;

#[derive(Clone, Copy, Debug)]
pub struct TuiTheme {
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub border_fg: Color,
    pub error_fg: Color,
    pub help_fg: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            highlight_fg: Color::Black,
            highlight_bg: Color::Cyan,
            border_fg: Color::Gray,
            error_fg: Color::Red,
            help_fg: Color::Yellow,
        }
    }
}

pub fn tui_theme(cfg: Option<&Tui>) -> TuiTheme {
    let d = TuiTheme::default();
    let Some(cfg) = cfg else { return d };
    let pick = |v: &Option<String>, fallback: Color| {
        v.as_deref().and_then(parse_color).unwrap_or(fallback)
    };
    TuiTheme {
        highlight_fg: pick(&cfg.highlight_fg, d.highlight_fg),
        highlight_bg: pick(&cfg.highlight_bg, d.highlight_bg),
        border_fg: pick(&cfg.border_fg, d.border_fg),
        error_fg: pick(&cfg.error_fg, d.error_fg),
        help_fg: pick(&cfg.help_fg, d.help_fg),
    }
}

pub fn parse_color(s: &str) -> Option<Color> {
    let k = s.trim().to_ascii_lowercase();
    match k.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        _ => {
            if let Some(hex) = k.strip_prefix('#') {
                return parse_hex(hex);
            }
            if let Some(rest) = k.strip_prefix("rgb(") {
                return parse_rgb_tuple(rest);
            }
            None
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn parse_rgb_tuple(rest: &str) -> Option<Color> {
    let t = rest.strip_suffix(')')?;
    let parts: Vec<_> = t.split(',').map(|p| p.trim()).collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_parse_in_all_forms() {
        assert_eq!(parse_color("Grey"), Some(Color::Gray));
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(parse_color("rgb(1, 2, 3)"), Some(Color::Rgb(1, 2, 3)));
        assert_eq!(parse_color("#fff"), None);
    }

    #[test]
    fn non_ascii_hex_is_rejected() {
        assert_eq!(parse_color("#aééb"), None);
        assert_eq!(parse_color("#ééé"), None);
    }

    #[test]
    fn unset_fields_keep_defaults() {
        let cfg = Tui {
            error_fg: Some("magenta".into()),
            ..Default::default()
        };
        let t = tui_theme(Some(&cfg));
        assert_eq!(t.error_fg, Color::Magenta);
        assert_eq!(t.highlight_bg, Color::Cyan);
    }
}
