//! Domain data structures for waste types and pickup events.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ports::DataError;

/// Upstream waste-type codes and the category each one stands for.
///
/// Keys are the exact strings sent by Ekosystem Wrocław and are matched case-sensitively.
pub const WASTE_TYPES: [(&str, WasteCategory); 5] = [
    ("BIO", WasteCategory::Bio),
    ("szkło", WasteCategory::Glass),
    ("zmieszane", WasteCategory::Mixed),
    ("papier", WasteCategory::Paper),
    ("tworzywa", WasteCategory::Plastic),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Raw waste-type token as returned by the upstream service.
pub struct WasteTypeCode(pub String);

impl fmt::Display for WasteTypeCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<&str> for WasteTypeCode {
    fn from(code: &str) -> Self {
        WasteTypeCode(code.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Waste categories collected in Wrocław.
pub enum WasteCategory {
    /// Organic waste.
    Bio,
    /// Glass collection.
    Glass,
    /// Mixed/residual waste.
    Mixed,
    /// Paper and cardboard.
    Paper,
    /// Plastics and packaging.
    Plastic,
}

impl WasteCategory {
    /// Look up the category for an upstream waste-type code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        WASTE_TYPES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, category)| *category)
    }

    /// Friendly name of the category.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WasteCategory::Bio => "bio",
            WasteCategory::Glass => "glass",
            WasteCategory::Mixed => "mixed",
            WasteCategory::Paper => "paper",
            WasteCategory::Plastic => "plastic",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A waste type collected during a pickup.
pub struct PickupType {
    /// Code as sent by the upstream service.
    pub code: WasteTypeCode,
    /// Category the code maps to, if it is known.
    pub category: Option<WasteCategory>,
}

impl PickupType {
    /// Pair a raw code with an optional category.
    #[must_use]
    pub fn new<C: Into<WasteTypeCode>>(code: C, category: Option<WasteCategory>) -> Self {
        Self {
            code: code.into(),
            category,
        }
    }

    /// Build a pickup type by resolving the code through [`WASTE_TYPES`].
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownWasteType`] when the code is not in the table.
    pub fn lookup(code: &str) -> Result<Self, DataError> {
        let category = WasteCategory::from_code(code)
            .ok_or_else(|| DataError::UnknownWasteType(code.to_owned()))?;
        Ok(Self::new(code, Some(category)))
    }

    /// Friendly name of the waste type, if the code is known.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&'static str> {
        self.category.map(WasteCategory::name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Pickups scheduled for a single day.
pub struct PickupEvent {
    /// Date of the pickup.
    pub date: NaiveDate,
    /// Waste types collected, in the order the upstream service lists them.
    pub pickup_types: Vec<PickupType>,
}

impl PickupEvent {
    /// Compare two events by date only, ignoring their pickup types.
    #[must_use]
    pub fn cmp_by_date(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_maps_every_known_code() {
        for (code, category) in WASTE_TYPES {
            let pickup_type = PickupType::lookup(code).expect("known code");
            assert_eq!(pickup_type.code.0, code, "code is kept verbatim");
            assert_eq!(pickup_type.category, Some(category), "category for {code}");
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let err = PickupType::lookup("bio").expect_err("lowercase bio is not an upstream code");
        assert!(
            matches!(err, DataError::UnknownWasteType(ref code) if code == "bio"),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn events_compare_by_date_only() {
        let earlier = PickupEvent {
            date: NaiveDate::from_ymd_opt(2021, 1, 12).expect("valid date"),
            pickup_types: vec![PickupType::lookup("zmieszane").expect("known code")],
        };
        let later = PickupEvent {
            date: NaiveDate::from_ymd_opt(2021, 1, 13).expect("valid date"),
            pickup_types: Vec::new(),
        };
        let same_day = PickupEvent {
            date: earlier.date,
            pickup_types: vec![PickupType::lookup("BIO").expect("known code")],
        };

        assert_eq!(earlier.cmp_by_date(&later), Ordering::Less, "earlier first");
        assert_eq!(later.cmp_by_date(&earlier), Ordering::Greater, "later last");
        assert_eq!(earlier.cmp_by_date(&same_day), Ordering::Equal, "types are ignored");
        assert_ne!(earlier, same_day, "equality still covers the types");
    }

    #[test]
    fn friendly_names() {
        assert_eq!(
            PickupType::lookup("tworzywa").expect("known code").friendly_name(),
            Some("plastic"),
            "tworzywa is plastic"
        );
        assert_eq!(
            PickupType::new("gabaryty", None).friendly_name(),
            None,
            "unmapped type has no friendly name"
        );
        assert_eq!(WasteCategory::Glass.to_string(), "glass", "display uses friendly name");
    }
}
