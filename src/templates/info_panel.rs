// templates/info_panel.rs

use crate::domain::SaleRecord;
use maud::{html, Markup};
use std::fmt::Display;

/// Hover panel shown for a comp marker.
pub fn info_panel(record: &SaleRecord) -> Markup {
    let price = record
        .sale_price
        .map(format_money)
        .unwrap_or_else(|| "Price N/A".to_string());

    html! {
        div {
            strong { (price) } br;
            (record.full_address()) br;
            "Beds: " (or_dash(record.beds)) ", Baths: " (or_dash(record.baths)) br;
            "SF: " (or_dash(record.living_area_sqft)) " | Lot: " (or_dash(record.lot_sqft)) br;
            "Date: " (record.sale_date.as_deref().unwrap_or("-"))
        }
    }
}

fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// `$1,234,567` with cents only when there are any.
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match cents % 100 {
        0 => format!("{sign}${grouped}"),
        frac => {
            let frac = format!("{frac:02}");
            format!("{sign}${grouped}.{}", frac.trim_end_matches('0'))
        }
    }
}
