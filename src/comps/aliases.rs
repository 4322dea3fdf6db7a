// src/comps/aliases.rs

use crate::domain::RawRow;
use std::collections::HashMap;

/// Canonical columns we pull out of an uploaded comps sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SalePrice,
    Address,
    City,
    State,
    Zip,
    LivingArea,
    Beds,
    Baths,
    SaleDate,
    LotArea,
    ListingUrl,
}

/// Header aliases per field, highest priority first. Matched lowercase.
/// Adding a new export format should only ever mean adding a string here.
pub const ALIASES: &[(Field, &[&str])] = &[
    (Field::SalePrice, &["sale_price", "price"]),
    (Field::Address, &["address", "street_address"]),
    (Field::City, &["city"]),
    (Field::State, &["state", "st"]),
    (Field::Zip, &["zipcode", "zip"]),
    (Field::LivingArea, &["bldg_area", "living_area_sqft", "sqft"]),
    (Field::Beds, &["total_bed", "beds"]),
    (Field::Baths, &["total_bath", "baths"]),
    (Field::SaleDate, &["sale_date", "closed_date"]),
    (Field::LotArea, &["lot_area", "lot_sqft"]),
    (Field::ListingUrl, &["zillow_url", "property_url"]),
];

pub fn aliases_for(field: Field) -> &'static [&'static str] {
    ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

/// Case-insensitive view over one raw row.
pub struct HeaderIndex<'a> {
    by_lower: HashMap<String, &'a str>,
}

impl<'a> HeaderIndex<'a> {
    pub fn new(row: &'a RawRow) -> Self {
        // Headers that only differ by case collapse; the later column wins,
        // even when its cell is blank.
        let by_lower = row.iter().map(|(k, v)| (k.to_lowercase(), v)).collect();

        Self { by_lower }
    }

    /// First alias whose cell is present and not blank.
    pub fn resolve(&self, field: Field) -> Option<&'a str> {
        aliases_for(field).iter().find_map(|alias| {
            self.by_lower
                .get(*alias)
                .copied()
                .filter(|v| !v.trim().is_empty())
        })
    }
}
