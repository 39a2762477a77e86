use colored::{Color, Colorize};

use crate::fmt::money;
use crate::reports::PieSlice;

const BAR_WIDTH: usize = 40;

const PALETTE: &[Color] = &[
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
];

/// Console rendering of a category pie chart: one proportional bar per slice.
pub fn format_pie(title: &str, slices: &[PieSlice]) -> String {
    if slices.is_empty() {
        return format!("{title}: nothing to chart.");
    }
    let label_width = slices.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);

    let mut out = format!("{}\n", title.bold());
    for (i, slice) in slices.iter().enumerate() {
        let cells = bar_cells(slice.pct);
        let bar = "\u{2588}".repeat(cells).color(PALETTE[i % PALETTE.len()]);
        let pad = " ".repeat(BAR_WIDTH - cells);
        out.push_str(&format!(
            "{:<label_width$}  {bar}{pad}  {:>5.1}%  {}\n",
            slice.label,
            slice.pct,
            money(slice.total),
        ));
    }
    out.trim_end().to_string()
}

fn bar_cells(pct: f64) -> usize {
    let cells = (pct.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH as f64).round() as usize;
    // Keep every slice visible.
    cells.clamp(1, BAR_WIDTH)
}
