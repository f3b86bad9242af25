//! Status icons for CLI output

use crate::infrastructure::helm::ReleaseStatus;

/// Status icons used in console output
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (green checkmark)
    pub const SUCCESS: &'static str = "✓";

    /// Skipped icon (left as it was)
    pub const SKIPPED: &'static str = "↷";

    pub fn for_release(status: ReleaseStatus) -> &'static str {
        match status {
            ReleaseStatus::Installed => Self::SUCCESS,
            ReleaseStatus::Skipped => Self::SKIPPED,
        }
    }

    pub fn release_text(status: ReleaseStatus) -> &'static str {
        match status {
            ReleaseStatus::Installed => "Installed",
            ReleaseStatus::Skipped => "Already present",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_icons() {
        assert_eq!(StatusIcon::for_release(ReleaseStatus::Installed), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::for_release(ReleaseStatus::Skipped), StatusIcon::SKIPPED);
    }

    #[test]
    fn test_release_text() {
        assert_eq!(StatusIcon::release_text(ReleaseStatus::Installed), "Installed");
        assert_eq!(StatusIcon::release_text(ReleaseStatus::Skipped), "Already present");
    }
}
