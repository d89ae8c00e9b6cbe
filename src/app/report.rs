use std::fmt::{self, Write};

use anyhow::Result;
use rust_decimal::Decimal;

use crate::{
    app::utils::{format_amount, share_percent},
    models::{PortfolioSummary, PriceStatus},
};

pub fn render_json(summary: &PortfolioSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

pub fn render_text(summary: &PortfolioSummary) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, summary)?;
    Ok(out)
}

fn write_text(out: &mut impl Write, summary: &PortfolioSummary) -> fmt::Result {
    writeln!(out, "NET WORTH  $ {}", format_amount(summary.net_worth()))?;
    writeln!(out, "{} Assets", summary.len())?;

    if summary.is_empty() {
        return writeln!(out, "\nNo assets to display.");
    }

    writeln!(out, "\nPORTFOLIO BREAKDOWN")?;
    for item in summary.items() {
        let record = item.record();
        let marker = if record.asset_type().is_liability() {
            "v"
        } else {
            "^"
        };
        let stale = if *item.price_status() == PriceStatus::Unavailable {
            " (price unavailable)"
        } else {
            ""
        };
        writeln!(
            out,
            "{} {:<24} {:>12} {:<10} $ {:>14}  {}{}",
            marker,
            record.name(),
            record.amount().normalize().to_string(),
            record.display_symbol(),
            format_amount(item.total_value()),
            record.asset_type(),
            stale
        )?;
    }

    let slices = summary.breakdown();
    let gross = slices
        .iter()
        .fold(Decimal::ZERO, |sum, slice| sum.saturating_add(slice.value().abs()));

    writeln!(out, "\nALLOCATION")?;
    for slice in &slices {
        writeln!(
            out,
            "  {:<24} {:>6}%  {}",
            slice.label(),
            share_percent(slice.value(), &gross).to_string(),
            slice.color()
        )?;
    }

    Ok(())
}
