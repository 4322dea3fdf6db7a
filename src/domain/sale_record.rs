// src/domain/sale_record.rs

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One uploaded row exactly as it came in: header name -> cell text, in
/// column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow(Vec<(String, String)>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated header keeps its first position and takes the new value.
    pub fn insert(&mut self, header: impl Into<String>, cell: impl Into<String>) {
        let header = header.into();
        let cell = cell.into();
        match self.0.iter_mut().find(|(h, _)| *h == header) {
            Some((_, existing)) => *existing = cell,
            None => self.0.push((header, cell)),
        }
    }

    /// Cells in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

#[cfg(test)]
impl RawRow {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.iter().find(|(h, _)| *h == header).map(|(_, v)| v)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.iter().map(|(h, _)| h).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (h, v) in &self.0 {
            map.serialize_entry(h, v)?;
        }
        map.end()
    }
}

/// A comparable sale after header aliasing and numeric cleanup.
/// Built once by the normalizer and never mutated afterwards.
///
/// Deserialization is loose on purpose: clients echo records back with
/// numbers where we'd send text and the other way round, and a bad field
/// only costs that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(default, deserialize_with = "loose_number")]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "loose_required_text")]
    pub street_address: String,
    #[serde(default, deserialize_with = "loose_required_text")]
    pub city: String,
    #[serde(default, deserialize_with = "loose_required_text")]
    pub state: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub living_area_sqft: Option<f64>,
    #[serde(default, deserialize_with = "loose_int")]
    pub beds: Option<i64>,
    #[serde(default, deserialize_with = "loose_int")]
    pub baths: Option<i64>,
    #[serde(default, deserialize_with = "loose_text")]
    pub sale_date: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub lot_sqft: Option<f64>,
    #[serde(default, deserialize_with = "loose_text")]
    pub property_url: Option<String>,

    #[serde(rename = "_raw", default, deserialize_with = "loose_raw_row")]
    pub raw: RawRow,
}

impl SaleRecord {
    /// "street, city, state zip" as handed to the geocoder.
    pub fn full_address(&self) -> String {
        let line = format!(
            "{}, {}, {} {}",
            self.street_address,
            self.city,
            self.state,
            self.zip.as_deref().unwrap_or("")
        );
        line.trim_end().to_string()
    }
}

fn cell_text(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn loose_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(cell_text(Value::deserialize(d)?))
}

fn loose_required_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(loose_text(d)?.unwrap_or_default())
}

fn loose_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

// Fractions are truncated, the same as a "2.5" cell in an upload.
fn loose_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    })
}

// Cells may come back as numbers or nulls. Anything that isn't an object
// reads as an empty row.
fn loose_raw_row<'de, D: Deserializer<'de>>(d: D) -> Result<RawRow, D::Error> {
    let Value::Object(map) = Value::deserialize(d)? else {
        return Ok(RawRow::new());
    };

    Ok(map
        .into_iter()
        .map(|(k, v)| (k, cell_text(v).unwrap_or_default()))
        .collect())
}
