//! TUI application state.

use std::path::PathBuf;

use crate::analysis::{Analysis, AnnotatedRecord};
use crate::io::export::export_xlsx;

/// TUI application state.
pub struct App {
    /// Current analysis; re-priced whenever the tariff changes.
    pub analysis: Analysis,
    /// Destination for `e` (export).
    pub export_path: PathBuf,
    /// Index of the first table row shown.
    pub scroll: usize,
    /// Outcome of the last export, shown in the summary panel.
    pub status: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the app around an existing analysis.
    pub fn new(analysis: Analysis, export_path: PathBuf) -> Self {
        Self {
            analysis,
            export_path,
            scroll: 0,
            status: None,
            quit: false,
        }
    }

    /// Raises the tariff by one step.
    pub fn raise_tariff(&mut self) {
        self.nudge_tariff(1);
    }

    /// Lowers the tariff by one step, stopping at zero.
    pub fn lower_tariff(&mut self) {
        self.nudge_tariff(-1);
    }

    fn nudge_tariff(&mut self, steps: i32) {
        let tariff = self.analysis.tariff.nudged(steps);
        self.analysis = self.analysis.with_tariff(tariff);
    }

    /// Scrolls the table down one row.
    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.analysis.records.len() {
            self.scroll += 1;
        }
    }

    /// Scrolls the table up one row.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Table rows from the scroll position on.
    pub fn visible_records(&self) -> &[AnnotatedRecord] {
        &self.analysis.records[self.scroll.min(self.analysis.records.len())..]
    }

    /// Writes the annotated table to `export_path` and records the outcome.
    pub fn export(&mut self) {
        self.status = Some(match export_xlsx(&self.analysis.table, &self.export_path) {
            Ok(()) => format!("Saved {}", self.export_path.display()),
            Err(e) => format!("Export failed: {e}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::sample::sample_table;
    use crate::tariff::Tariff;

    fn make_app() -> App {
        let analysis = analyze(&sample_table(), Tariff::default()).unwrap();
        App::new(analysis, PathBuf::from("energy_analysis.xlsx"))
    }

    #[test]
    fn tariff_steps_reprice_summary() {
        let mut app = make_app();
        let before = app.analysis.summary.total_cost;

        app.raise_tariff();
        assert_eq!(app.analysis.tariff.rate(), 6.6);
        assert!(app.analysis.summary.total_cost > before);

        app.lower_tariff();
        app.lower_tariff();
        assert_eq!(app.analysis.tariff.rate(), 6.4);
    }

    #[test]
    fn tariff_never_goes_negative() {
        let mut app = make_app();
        for _ in 0..100 {
            app.lower_tariff();
        }
        assert_eq!(app.analysis.tariff.rate(), 0.0);
        assert_eq!(app.analysis.summary.savings_percent, 0.0);
    }

    #[test]
    fn scroll_stays_in_bounds() {
        let mut app = make_app();
        app.scroll_up();
        assert_eq!(app.scroll, 0);

        for _ in 0..100 {
            app.scroll_down();
        }
        assert_eq!(app.scroll, app.analysis.records.len() - 1);
        assert_eq!(app.visible_records().len(), 1);
    }

    #[test]
    fn failed_export_sets_status() {
        let mut app = make_app();
        app.export_path = PathBuf::from("no/such/dir/out.xlsx");
        app.export();
        assert!(
            app.status
                .as_deref()
                .is_some_and(|s| s.starts_with("Export failed"))
        );
    }
}
