//! `rc orders`: where each project lands in the canonical ordering.

use crate::cmd::load_catalog;
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use raphael_core::catalog::OrderingRow;
use raphael_core::config::EffectiveConfig;
use std::io::Write;

#[derive(Args, Debug)]
pub struct OrdersArgs {
    /// Only list projects without an ordering weight.
    #[arg(long)]
    pub unranked: bool,
}

fn weight_label(order: Option<i64>) -> String {
    order.map_or_else(|| "unranked".to_string(), |order| order.to_string())
}

/// Execute `rc orders`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn run_orders(args: &OrdersArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let loaded = load_catalog(config, output)?;
    let rows: Vec<OrderingRow> = loaded
        .catalog
        .ordering_report()
        .into_iter()
        .filter(|row| !args.unranked || row.order.is_none())
        .collect();

    render_mode(
        output,
        &rows,
        |rows, w| {
            for row in rows {
                writeln!(w, "{}  {}  {}", row.position, weight_label(row.order), row.slug)?;
            }
            Ok(())
        },
        |rows, w| render_orders_human(rows, w),
    )
}

fn render_orders_human(rows: &[OrderingRow], w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Project ordering (highest weight first)")?;
    for row in rows {
        writeln!(
            w,
            "{:>3}  {:>8}  {}  {}",
            row.position,
            weight_label(row.order),
            if row.featured { "*" } else { " " },
            row.name
        )?;
    }
    Ok(())
}
