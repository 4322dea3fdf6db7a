// src/comps/normalize.rs

use crate::comps::aliases::{Field, HeaderIndex};
use crate::domain::{RawRow, SaleRecord};

/// Maps raw rows onto `SaleRecord`, keeping input order.
/// Rows without a street address, city and state are dropped.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<SaleRecord> {
    rows.iter().filter_map(normalize_row).collect()
}

pub fn normalize_row(raw: &RawRow) -> Option<SaleRecord> {
    let idx = HeaderIndex::new(raw);
    let text = |field| idx.resolve(field).map(|v| v.trim().to_string());

    let street_address = text(Field::Address)?;
    let city = text(Field::City)?;
    let state = text(Field::State)?;

    Some(SaleRecord {
        sale_price: idx.resolve(Field::SalePrice).and_then(parse_number),
        street_address,
        city,
        state,
        zip: text(Field::Zip),
        living_area_sqft: idx.resolve(Field::LivingArea).and_then(parse_number),
        beds: idx.resolve(Field::Beds).and_then(parse_int),
        baths: idx.resolve(Field::Baths).and_then(parse_int),
        sale_date: text(Field::SaleDate),
        lot_sqft: idx.resolve(Field::LotArea).and_then(parse_number),
        property_url: idx.resolve(Field::ListingUrl).and_then(first_url),
        raw: raw.clone(),
    })
}

/// Money and area cells: drop anything that isn't a digit or '.', then read
/// the leading decimal. "$350,000" -> 350000, "N/A" -> None.
pub fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        } else {
            seen_digit = true;
        }
        end = i + 1;
    }

    if !seen_digit {
        return None;
    }

    cleaned[..end].parse().ok()
}

/// Bed/bath counts: the leading integer of the cell ("2.5" -> 2).
/// Zero is a real value here, not a stand-in for missing.
pub fn parse_int(cell: &str) -> Option<i64> {
    let t = cell.trim_start();
    let (sign, rest) = match t.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, t.strip_prefix('+').unwrap_or(t)),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Some exports pack several listing links into one cell, separated by '|'.
pub fn first_url(cell: &str) -> Option<String> {
    cell.split('|')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
