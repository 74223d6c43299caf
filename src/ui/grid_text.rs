// Grid Text
//
// Plain-text rendering of the slot grid for the terminal front end.

use std::fmt::Write;

use crate::models::slot::{SlotId, SlotState, SLOTS_PER_DAY};
use crate::services::slot_grid::SlotGrid;
use crate::ui::drag::Selection;

const CELL_WIDTH: usize = 12;
const TIME_COLUMN_WIDTH: usize = 7;

fn cell_text(state: &SlotState, selected: bool) -> String {
    if selected {
        return "[selected]".to_string();
    }
    match state {
        SlotState::Available => "free".to_string(),
        SlotState::Reserved { owner_label, .. } => {
            let label: String = owner_label.chars().take(CELL_WIDTH - 2).collect();
            format!("#{}", label)
        }
    }
}

/// Render days as columns and slots as rows.
pub fn render_grid(grid: &SlotGrid, selection: Option<&Selection>) -> String {
    let dates = grid.dates();
    let mut out = String::new();

    let _ = write!(out, "{:<width$}", "", width = TIME_COLUMN_WIDTH);
    for date in &dates {
        let header = date.format("%a %m-%d").to_string();
        let _ = write!(out, "{:<width$}", header, width = CELL_WIDTH);
    }
    out.push('\n');

    for index in 0..SLOTS_PER_DAY {
        let Some(first) = dates.first().and_then(|date| grid.cell(SlotId::new(*date, index))) else {
            continue;
        };
        let _ = write!(out, "{:<width$}", first.slot.label(), width = TIME_COLUMN_WIDTH);

        for date in &dates {
            let id = SlotId::new(*date, index);
            let text = match grid.state(id) {
                Some(state) => cell_text(state, selection.is_some_and(|s| s.contains(id))),
                None => "-".to_string(),
            };
            let _ = write!(out, "{:<width$}", text, width = CELL_WIDTH);
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }

    out
}

/// One-line summary such as "2025-01-10 09:00-10:30 (90 min)".
pub fn describe_selection(selection: &Selection) -> String {
    let start = selection
        .start_time()
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_else(|| "??:??".to_string());
    let minutes = selection.duration_minutes();
    let end = selection
        .start_time()
        .map(|time| (time + chrono::Duration::minutes(minutes as i64)).format("%H:%M").to_string())
        .unwrap_or_else(|| "??:??".to_string());

    format!(
        "{} {}-{} ({} min)",
        selection.date.format("%Y-%m-%d"),
        start,
        end,
        minutes
    )
}
