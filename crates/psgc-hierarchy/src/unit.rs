//! # Published Units
//!
//! One struct per level. Field order and names match the published JSON
//! records (camelCase). Ancestor codes are `Option<PsgcCode>`: `Some` when a
//! unit at that level covers this code, `None` when none does. Malformed
//! codes never reach this module.
//!
//! ## Wire Shape of Absent Ancestors
//!
//! Consumers of the published tree read an absent ancestor as JSON `false`,
//! so [`ancestor_code`] writes `None` as `false` and reads `false` or `null`
//! back as `None`.

use psgc_core::{AncestorField, IslandGroup, PsgcCode};
use serde::{Deserialize, Serialize};

/// Common view of every unit with a PSGC code.
pub trait GeographicUnit: Serialize {
    /// The unit's own code.
    fn code(&self) -> &PsgcCode;

    /// The value of an ancestor field. Region units answer
    /// [`AncestorField::Region`] with their own code.
    fn ancestor(&self, field: AncestorField) -> Option<&PsgcCode>;

    /// The island group the unit belongs to.
    fn island_group(&self) -> IslandGroup;
}

/// Serde adapter for optional ancestor codes (`None` ⇄ `false`).
pub mod ancestor_code {
    use psgc_core::PsgcCode;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(code: &Option<PsgcCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match code {
            Some(code) => code.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PsgcCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Code(PsgcCode),
            Flag(bool),
        }

        match Option::<Wire>::deserialize(deserializer)? {
            Some(Wire::Code(code)) => Ok(Some(code)),
            Some(Wire::Flag(false)) | None => Ok(None),
            Some(Wire::Flag(true)) => Err(de::Error::custom(
                "ancestor code must be a 9-digit code or false",
            )),
        }
    }
}

/// An island group record (`{code, name}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandGroupUnit {
    pub code: IslandGroup,
    pub name: String,
}

impl From<IslandGroup> for IslandGroupUnit {
    fn from(group: IslandGroup) -> Self {
        Self {
            code: group,
            name: group.name().to_string(),
        }
    }
}

/// A region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub code: PsgcCode,
    /// Short name, e.g. `Ilocos Region` or `NCR`.
    pub name: String,
    /// Formal region name, e.g. `Region I` or `National Capital Region`.
    pub region_name: String,
    pub island_group_code: IslandGroup,
    pub psgc10_digit_code: String,
}

/// A province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub code: PsgcCode,
    pub name: String,
    #[serde(with = "ancestor_code", default)]
    pub region_code: Option<PsgcCode>,
    pub island_group_code: IslandGroup,
    pub psgc10_digit_code: String,
}

/// A Metro Manila district. Same shape as a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub code: PsgcCode,
    pub name: String,
    #[serde(with = "ancestor_code", default)]
    pub region_code: Option<PsgcCode>,
    pub island_group_code: IslandGroup,
    pub psgc10_digit_code: String,
}

/// A city or a municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locality {
    pub code: PsgcCode,
    pub name: String,
    pub old_name: Option<String>,
    /// The registry marks provincial capitals with a `(Capital)` suffix.
    pub is_capital: bool,
    #[serde(with = "ancestor_code", default)]
    pub province_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub district_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub region_code: Option<PsgcCode>,
    pub island_group_code: IslandGroup,
    pub psgc10_digit_code: String,
}

/// A city.
pub type City = Locality;

/// A municipality.
pub type Municipality = Locality;

/// A record of the combined cities-municipalities view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMunicipality {
    pub code: PsgcCode,
    pub name: String,
    pub old_name: Option<String>,
    pub is_capital: bool,
    pub is_city: bool,
    pub is_municipality: bool,
    #[serde(with = "ancestor_code", default)]
    pub province_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub district_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub region_code: Option<PsgcCode>,
    pub island_group_code: IslandGroup,
    pub psgc10_digit_code: String,
}

/// A sub-municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMunicipality {
    pub code: PsgcCode,
    pub name: String,
    pub old_name: Option<String>,
    #[serde(with = "ancestor_code", default)]
    pub district_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub province_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub region_code: Option<PsgcCode>,
    pub island_group_code: IslandGroup,
    pub psgc10_digit_code: String,
}

/// A barangay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barangay {
    pub code: PsgcCode,
    /// Registry name, published unmodified.
    pub name: String,
    pub old_name: Option<String>,
    #[serde(with = "ancestor_code", default)]
    pub sub_municipality_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub city_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub municipality_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub district_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub province_code: Option<PsgcCode>,
    #[serde(with = "ancestor_code", default)]
    pub region_code: Option<PsgcCode>,
    pub island_group_code: IslandGroup,
    pub psgc10_digit_code: String,
}

impl GeographicUnit for Region {
    fn code(&self) -> &PsgcCode {
        &self.code
    }

    fn ancestor(&self, field: AncestorField) -> Option<&PsgcCode> {
        match field {
            AncestorField::Region => Some(&self.code),
            _ => None,
        }
    }

    fn island_group(&self) -> IslandGroup {
        self.island_group_code
    }
}

impl GeographicUnit for Province {
    fn code(&self) -> &PsgcCode {
        &self.code
    }

    fn ancestor(&self, field: AncestorField) -> Option<&PsgcCode> {
        match field {
            AncestorField::Region => self.region_code.as_ref(),
            _ => None,
        }
    }

    fn island_group(&self) -> IslandGroup {
        self.island_group_code
    }
}

impl GeographicUnit for District {
    fn code(&self) -> &PsgcCode {
        &self.code
    }

    fn ancestor(&self, field: AncestorField) -> Option<&PsgcCode> {
        match field {
            AncestorField::Region => self.region_code.as_ref(),
            _ => None,
        }
    }

    fn island_group(&self) -> IslandGroup {
        self.island_group_code
    }
}

impl GeographicUnit for Locality {
    fn code(&self) -> &PsgcCode {
        &self.code
    }

    fn ancestor(&self, field: AncestorField) -> Option<&PsgcCode> {
        match field {
            AncestorField::Region => self.region_code.as_ref(),
            AncestorField::Province => self.province_code.as_ref(),
            AncestorField::District => self.district_code.as_ref(),
            AncestorField::City | AncestorField::Municipality | AncestorField::SubMunicipality => {
                None
            }
        }
    }

    fn island_group(&self) -> IslandGroup {
        self.island_group_code
    }
}

impl GeographicUnit for CityMunicipality {
    fn code(&self) -> &PsgcCode {
        &self.code
    }

    fn ancestor(&self, field: AncestorField) -> Option<&PsgcCode> {
        match field {
            AncestorField::Region => self.region_code.as_ref(),
            AncestorField::Province => self.province_code.as_ref(),
            AncestorField::District => self.district_code.as_ref(),
            AncestorField::City | AncestorField::Municipality | AncestorField::SubMunicipality => {
                None
            }
        }
    }

    fn island_group(&self) -> IslandGroup {
        self.island_group_code
    }
}

impl GeographicUnit for SubMunicipality {
    fn code(&self) -> &PsgcCode {
        &self.code
    }

    fn ancestor(&self, field: AncestorField) -> Option<&PsgcCode> {
        match field {
            AncestorField::Region => self.region_code.as_ref(),
            AncestorField::Province => self.province_code.as_ref(),
            AncestorField::District => self.district_code.as_ref(),
            AncestorField::City | AncestorField::Municipality | AncestorField::SubMunicipality => {
                None
            }
        }
    }

    fn island_group(&self) -> IslandGroup {
        self.island_group_code
    }
}

impl GeographicUnit for Barangay {
    fn code(&self) -> &PsgcCode {
        &self.code
    }

    fn ancestor(&self, field: AncestorField) -> Option<&PsgcCode> {
        match field {
            AncestorField::Region => self.region_code.as_ref(),
            AncestorField::Province => self.province_code.as_ref(),
            AncestorField::District => self.district_code.as_ref(),
            AncestorField::City => self.city_code.as_ref(),
            AncestorField::Municipality => self.municipality_code.as_ref(),
            AncestorField::SubMunicipality => self.sub_municipality_code.as_ref(),
        }
    }

    fn island_group(&self) -> IslandGroup {
        self.island_group_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> PsgcCode {
        PsgcCode::new(s).unwrap()
    }

    fn barangay() -> Barangay {
        Barangay {
            code: code("012801001"),
            name: "Adams (Pob.)".to_string(),
            old_name: Some(String::new()),
            sub_municipality_code: None,
            city_code: None,
            municipality_code: Some(code("012801000")),
            district_code: None,
            province_code: Some(code("012800000")),
            region_code: Some(code("010000000")),
            island_group_code: IslandGroup::Luzon,
            psgc10_digit_code: "0102801001".to_string(),
        }
    }

    #[test]
    fn absent_ancestor_serializes_as_false() {
        let json = serde_json::to_value(barangay()).unwrap();
        assert_eq!(json["cityCode"], serde_json::Value::Bool(false));
        assert_eq!(json["subMunicipalityCode"], serde_json::Value::Bool(false));
        assert_eq!(json["municipalityCode"], "012801000");
        assert_eq!(json["islandGroupCode"], "luzon");
    }

    #[test]
    fn payload_parses_back_to_equal_record() {
        let original = barangay();
        let text = serde_json::to_string(&original).unwrap();
        let parsed: Barangay = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn null_ancestor_reads_as_absent() {
        let mut json = serde_json::to_value(barangay()).unwrap();
        json["cityCode"] = serde_json::Value::Null;
        let parsed: Barangay = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.city_code, None);
    }

    #[test]
    fn true_ancestor_is_rejected() {
        let mut json = serde_json::to_value(barangay()).unwrap();
        json["cityCode"] = serde_json::Value::Bool(true);
        assert!(serde_json::from_value::<Barangay>(json).is_err());
    }

    #[test]
    fn region_answers_region_field_with_own_code() {
        let region = Region {
            code: code("130000000"),
            name: "NCR".to_string(),
            region_name: "National Capital Region".to_string(),
            island_group_code: IslandGroup::Luzon,
            psgc10_digit_code: "1300000000".to_string(),
        };
        assert_eq!(region.ancestor(AncestorField::Region), Some(&region.code));
        assert_eq!(region.ancestor(AncestorField::Province), None);
    }

    #[test]
    fn island_group_unit_shape() {
        let unit = IslandGroupUnit::from(IslandGroup::Visayas);
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, r#"{"code":"visayas","name":"Visayas"}"#);
    }

    #[test]
    fn barangay_field_order_matches_published_records() {
        let json = serde_json::to_string(&barangay()).unwrap();
        let order = [
            "\"code\"",
            "\"name\"",
            "\"oldName\"",
            "\"subMunicipalityCode\"",
            "\"cityCode\"",
            "\"municipalityCode\"",
            "\"districtCode\"",
            "\"provinceCode\"",
            "\"regionCode\"",
            "\"islandGroupCode\"",
            "\"psgc10DigitCode\"",
        ];
        let positions: Vec<usize> = order.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }
}
