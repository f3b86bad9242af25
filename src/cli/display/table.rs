//! Table rendering for CLI output

use super::colors::ColorTheme;
use super::icons::StatusIcon;
use crate::infrastructure::helm::{ReleaseOutcome, ReleaseStatus};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render chart releases handled by `create` as a formatted table
    pub fn render_releases(&self, releases: &[ReleaseOutcome]) -> String {
        if releases.is_empty() {
            return "No charts configured".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("RELEASE").set_alignment(CellAlignment::Left),
                Cell::new("CHART").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
            ]);

        for release in releases {
            table.add_row(vec![
                Cell::new(&release.release),
                Cell::new(&release.chart).fg(self.theme.info),
                Cell::new(&release.namespace),
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::for_release(release.status),
                    StatusIcon::release_text(release.status)
                ))
                .fg(self.theme.release_color(release.status)),
            ]);
        }

        let installed = releases
            .iter()
            .filter(|r| r.status == ReleaseStatus::Installed)
            .count();

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Chart Releases {} ─╮\n",
            format!("[{} installed, {} skipped]", installed, releases.len() - installed)
                .bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Installed  {} Already present\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::SKIPPED.bright_black()
        ));

        output
    }
}
