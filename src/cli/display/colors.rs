//! Color theme for CLI output

use crate::infrastructure::helm::ReleaseStatus;
use comfy_table::Color as TableColor;

/// Color theme for table output
#[derive(Debug, Clone, Copy)]
pub struct ColorTheme {
    pub success: TableColor,
    pub muted: TableColor,
    pub info: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            muted: TableColor::DarkGrey,
            info: TableColor::Cyan,
        }
    }
}

impl ColorTheme {
    pub fn release_color(&self, status: ReleaseStatus) -> TableColor {
        match status {
            ReleaseStatus::Installed => self.success,
            ReleaseStatus::Skipped => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.muted, TableColor::DarkGrey);
    }

    #[test]
    fn test_release_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.release_color(ReleaseStatus::Installed), TableColor::Green);
        assert_eq!(theme.release_color(ReleaseStatus::Skipped), TableColor::DarkGrey);
    }
}
