use std::fmt::Write as _;

use crate::format::FormattedRecord;

/// Renders the console summary of newly fetched records.
pub fn render_summary(records: &[(String, FormattedRecord)]) -> String {
    let mut out = String::new();
    for (item, record) in records {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}:", title_case(item));
        let _ = writeln!(out, "  Description: {}", record.description.as_deref().unwrap_or_default());
        let _ = writeln!(out, "  Brand: {}", record.brand);
        let _ = writeln!(out, "  Calories: {}", record.calories.as_deref().unwrap_or_default());
        let _ = writeln!(out, "  Serving Size: {}", record.serving());
        let _ = writeln!(out, "  Nutrients:");
        for (name, value) in record.nutrients.iter() {
            let _ = writeln!(out, "    {name}: {value}");
        }
        out.push('\n');
    }
    out
}

pub fn print_summary(records: &[(String, FormattedRecord)]) {
    print!("{}", render_summary(records));
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NutrientTable;

    #[test]
    fn title_case_follows_word_boundaries() {
        assert_eq!(title_case("cheddar cheese"), "Cheddar Cheese");
        assert_eq!(title_case("PEANUT butter"), "Peanut Butter");
        assert_eq!(title_case("o'brien's oats"), "O'Brien'S Oats");
        assert_eq!(title_case("2% milk"), "2% Milk");
    }

    #[test]
    fn summary_lists_every_field() {
        let record = FormattedRecord {
            description: Some("Apples, raw, with skin".into()),
            brand: "Not specified".into(),
            calories: Some("52 KCAL".into()),
            serving_size: Some("100".into()),
            serving_size_unit: Some("g".into()),
            nutrients: [("Energy", "52 KCAL"), ("Protein", "0.3 G")]
                .into_iter()
                .collect::<NutrientTable>(),
        };

        let out = render_summary(&[("green apple".to_owned(), record)]);

        assert_eq!(
            out,
            "Green Apple:\n\
             \x20 Description: Apples, raw, with skin\n\
             \x20 Brand: Not specified\n\
             \x20 Calories: 52 KCAL\n\
             \x20 Serving Size: 100 g\n\
             \x20 Nutrients:\n\
             \x20   Energy: 52 KCAL\n\
             \x20   Protein: 0.3 G\n\
             \n"
        );
    }

    #[test]
    fn empty_summary_is_empty() {
        assert_eq!(render_summary(&[]), "");
    }
}
