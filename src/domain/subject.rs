// src/domain/subject.rs

use serde::{Deserialize, Serialize};

/// The property being valued, as typed into the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProperty {
    pub address: String,
    #[serde(default)]
    pub living_area_sqft: Option<f64>,
    #[serde(default)]
    pub beds: Option<f64>,
    #[serde(default)]
    pub baths: Option<f64>,
}
