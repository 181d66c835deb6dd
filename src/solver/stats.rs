use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Statistics of the membership filter behind a single search run.
///
/// Retained by the engine after each `solution` call; not part of the
/// solution itself.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FilterStats {
    /// Approximate number of distinct states the filter saw.
    pub approximate_element_count: u64,
    /// Expected probability of a containment false positive at the end of
    /// the run. Exactly zero for exact filters.
    pub expected_fpp: f64,
}

pub fn render_stats_table(stats: &FilterStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("States Seen (approx.)"),
        Cell::new("Expected FPP"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new(&stats.approximate_element_count.to_string()),
        Cell::new(&format!("{:.6}", stats.expected_fpp)),
    ]));

    table.to_string()
}
