//! Terminal report: monthly table, payback block and a detail window.

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::estimate::DailyAverageEstimate;
use crate::sim::runner::{DetailWindow, PAYBACK_SENTINEL_YEARS, Projection};
use crate::sim::types::MonthlySummary;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn right(content: String) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

fn money_color(amount: f64) -> Color {
    if amount > 0.0 { Color::Green } else { Color::Red }
}

/// Builds the per-month table in input order.
///
/// With `estimates`, a column compares each month against the daily-average
/// estimate; the slices are matched by position.
pub fn build_monthly_table(
    summaries: &[MonthlySummary],
    estimates: Option<&[DailyAverageEstimate]>,
) -> Table {
    let mut table = new_table();
    let mut header = vec![
        "Period",
        "Consumption (kWh)",
        "Surplus (kWh)",
        "Solar stored (kWh)",
        "Grid bought (kWh)",
        "Delivered (kWh)",
        "Cycles",
        "Savings",
    ];
    if estimates.is_some() {
        header.push("Daily-avg estimate");
    }
    table.set_header(header);

    for (i, s) in summaries.iter().enumerate() {
        let mut row = vec![
            Cell::new(&s.label).add_attribute(Attribute::Bold),
            right(format!("{:.0}", s.consumption_kwh)),
            right(format!("{:.0}", s.surplus_kwh)),
            right(format!("{:.1}", s.kpi.solar_charged_kwh)),
            right(format!("{:.1}", s.kpi.grid_charged_kwh)),
            right(format!("{:.1}", s.kpi.discharged_kwh)),
            right(format!("{:.2}", s.kpi.equivalent_full_cycles)).add_attribute(Attribute::Dim),
            right(format!("{:.2}", s.savings)).fg(money_color(s.savings)),
        ];
        if let Some(estimates) = estimates {
            let cell = estimates.get(i).map_or_else(
                || right("-".to_string()),
                |e| right(format!("{:.2}", e.monthly_savings)).add_attribute(Attribute::Dim),
            );
            row.push(cell);
        }
        table.add_row(row);
    }
    table
}

/// Builds the totals and payback block.
pub fn build_projection_table(projection: &Projection, months: usize) -> Table {
    let mut table = new_table();
    let payback = if projection.payback_years >= PAYBACK_SENTINEL_YEARS {
        "never".to_string()
    } else {
        format!("{:.1} years", projection.payback_years)
    };

    table.add_row(vec![
        Cell::new(format!("Total savings ({months} months)")),
        right(format!("{:.2}", projection.total_savings)).fg(money_color(projection.total_savings)),
    ]);
    table.add_row(vec![
        Cell::new("Annualized savings"),
        right(format!("{:.2}", projection.annualized_savings))
            .fg(money_color(projection.annualized_savings)),
    ]);
    table.add_row(vec![
        Cell::new("Installation cost"),
        right(format!("{:.0}", projection.installation_cost)),
    ]);
    table.add_row(vec![
        Cell::new("Payback").add_attribute(Attribute::Bold),
        right(payback)
            .add_attribute(Attribute::Bold)
            .fg(if projection.viable { Color::Green } else { Color::Red }),
    ]);
    table
}

/// Builds the hour-by-hour table for a window of the detail month.
pub fn build_detail_table(window: &DetailWindow<'_>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Hour", "Time", "SoC (kWh)", "Solar in", "Grid in", "Out", "Balance", "Cumulative",
    ]);
    for (h, cumulative) in window.hours.iter().zip(window.cumulative_savings) {
        let flow_color = if h.discharged_kwh > 0.0 {
            Color::Red
        } else if h.solar_charged_kwh > 0.0 || h.grid_charged_kwh > 0.0 {
            Color::Green
        } else {
            Color::Reset
        };
        table.add_row(vec![
            right(h.hour.to_string()).add_attribute(Attribute::Dim),
            Cell::new(format!("{:02}:00", h.hour_of_day)),
            right(format!("{:.1}", h.soc_kwh)).fg(flow_color),
            right(format!("{:.1}", h.solar_charged_kwh)),
            right(format!("{:.1}", h.grid_charged_kwh)),
            right(format!("{:.1}", h.discharged_kwh)),
            right(format!("{:.3}", h.net_balance)).fg(money_color(h.net_balance)),
            right(format!("{cumulative:.2}")),
        ]);
    }
    table
}
