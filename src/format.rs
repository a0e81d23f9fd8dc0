//! Normalises a [`FoodDetails`] payload into a [`FormattedRecord`].

use crate::payload::FoodDetails;

/// Brand shown when the payload carries no `brandOwner`.
pub const DEFAULT_BRAND: &str = "Not specified";

/// Ordered nutrient name -> `"<amount> <unit>"` mapping.
///
/// Re-inserting an existing name replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutrientTable(Vec<(String, String)>);

impl NutrientTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter().position(|(existing, _)| *existing == name) {
            Some(index) => self.0[index].1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens to `"name: value, name: value"` for the `Nutrients` store column.
    pub fn flatten(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NutrientTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = NutrientTable::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

/// The normalised in-memory record for one food item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    pub description: Option<String>,
    pub brand: String,
    pub calories: Option<String>,
    pub serving_size: Option<String>,
    pub serving_size_unit: Option<String>,
    pub nutrients: NutrientTable,
}

impl Default for FormattedRecord {
    fn default() -> Self {
        Self {
            description: None,
            brand: DEFAULT_BRAND.to_owned(),
            calories: None,
            serving_size: None,
            serving_size_unit: None,
            nutrients: NutrientTable::new(),
        }
    }
}

impl FormattedRecord {
    /// `"<size> <unit>"`, leaving out whichever part is absent.
    pub fn serving(&self) -> String {
        join_present(self.serving_size.as_deref(), self.serving_size_unit.as_deref())
    }
}

/// Formats a details payload. An absent payload yields an empty-shaped record.
pub fn format_details(details: Option<&FoodDetails>) -> FormattedRecord {
    let Some(details) = details else {
        return FormattedRecord::default();
    };

    let mut nutrients = NutrientTable::new();
    let mut calories = None;
    for entry in details.nutrients() {
        let (Some(name), Some(amount)) = (entry.name(), entry.amount.as_ref()) else {
            continue;
        };
        let amount = amount.to_string();
        let value = join_present(Some(amount.as_str()), entry.unit());
        if name.eq_ignore_ascii_case("energy") {
            calories = Some(value.clone());
        }
        nutrients.insert(name, value);
    }

    FormattedRecord {
        description: details.description.clone(),
        brand: details
            .brand_owner
            .clone()
            .unwrap_or_else(|| DEFAULT_BRAND.to_owned()),
        calories,
        serving_size: details.serving_size.as_ref().map(ToString::to_string),
        serving_size_unit: details.serving_size_unit.clone(),
        nutrients,
    }
}

fn join_present(first: Option<&str>, second: Option<&str>) -> String {
    match (first, second) {
        (Some(a), Some(b)) => format!("{a} {b}"),
        (Some(a), None) => a.to_owned(),
        (None, Some(b)) => b.to_owned(),
        (None, None) => String::new(),
    }
}
