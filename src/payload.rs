//! Typed model of the FoodData Central JSON payloads.
//!
//! Every field the API may omit or send as `null` is an `Option`, so absent data is handled at the
//! type level rather than by probing an untyped map. Numeric fields are kept as
//! [`serde_json::Number`] to preserve the API's textual form (`52` stays `52`, `0.3` stays `0.3`).

use std::fmt;

use serde::Deserialize;
use serde_json::Number;

/// Canonical FoodData Central identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct FdcId(pub u64);

impl fmt::Display for FdcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response of `GET /foods/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub foods: Option<Vec<SearchHit>>,
}

impl SearchResponse {
    /// The first hit as returned by the service. No ranking is applied.
    pub fn first_hit(&self) -> Option<&SearchHit> {
        self.foods.as_deref()?.first()
    }

    /// Identifier of the first hit. A first hit without `fdcId` counts as no match.
    pub fn first_id(&self) -> Option<FdcId> {
        self.first_hit()?.fdc_id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(default)]
    pub fdc_id: Option<FdcId>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of `GET /food/{fdcId}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDetails {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand_owner: Option<String>,
    #[serde(default)]
    pub serving_size: Option<Number>,
    #[serde(default)]
    pub serving_size_unit: Option<String>,
    #[serde(default)]
    pub food_nutrients: Option<Vec<FoodNutrient>>,
}

impl FoodDetails {
    pub fn nutrients(&self) -> &[FoodNutrient] {
        self.food_nutrients.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    #[serde(default)]
    pub nutrient: Option<NutrientInfo>,
    #[serde(default)]
    pub amount: Option<Number>,
}

impl FoodNutrient {
    pub fn name(&self) -> Option<&str> {
        self.nutrient.as_ref()?.name.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.nutrient.as_ref()?.unit_name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
}
