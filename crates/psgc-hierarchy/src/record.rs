//! The flat registry record.
//!
//! One record per geographic unit, as produced by the CSV import. Codes
//! are kept as raw strings here; validation happens in the builder so that
//! the malformed-code policy can decide what to do with a bad row.

use serde::{Deserialize, Deserializer, Serialize};

/// A raw record of the registry publication file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// The 10-digit code of the newer registry scheme, passed through.
    #[serde(deserialize_with = "string_or_number")]
    pub psgc10_digit_code: String,
    /// Registry name, usually upper case.
    pub name: String,
    /// The 9-digit hierarchical code.
    #[serde(deserialize_with = "string_or_number")]
    pub code: String,
    /// Registry level tag (`Reg`, `Prov`, ...). Empty for unclassified rows.
    #[serde(default)]
    pub geographic_level: String,
    /// Prior name, passed through unmodified.
    #[serde(default)]
    pub old_name: Option<String>,
    /// City class (`HUC`, `ICC`, `CC`), when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_class: Option<String>,
    /// Income classification, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_classification: Option<String>,
    /// Urban/rural tag, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urban_rural: Option<String>,
}

/// Accept either a JSON string or a JSON number, yielding the string form.
///
/// Hand-edited publication files sometimes carry numeric codes; the digits
/// are taken as written (a lost leading zero is caught by code validation).
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Wire::deserialize(deserializer)? {
        Wire::Text(s) => s,
        Wire::Number(n) => n.to_string(),
    })
}
