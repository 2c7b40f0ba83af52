//! Marker to nutrient to food tables.

use std::collections::BTreeMap;
use std::path::Path;

use bloodwork_model::{Marker, Status};

use crate::csv_utils::read_csv_rows;
use crate::error::{Result, StandardsError};

const RULE_COLUMNS: &[&str] = &["Marker", "Status", "Nutrient"];
const FOOD_COLUMNS: &[&str] = &["Nutrient", "Food"];

/// Nutrient guidance keyed by (Marker, Status).
///
/// Only High and Low are actionable. Each nutrient referenced by a rule has
/// a non-empty food list; food order follows the source table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutrientMap {
    rules: BTreeMap<(Marker, Status), Vec<String>>,
    foods: BTreeMap<String, Vec<String>>,
}

impl NutrientMap {
    /// Parse the rule table (`Marker,Status,Nutrient`) and the food table
    /// (`Nutrient,Food`).
    pub fn from_csv_str(
        rules_content: &str,
        rules_path: &Path,
        foods_content: &str,
        foods_path: &Path,
    ) -> Result<Self> {
        let foods = parse_foods(foods_content, foods_path)?;
        let rules = parse_rules(rules_content, rules_path)?;

        for nutrients in rules.values() {
            for nutrient in nutrients {
                if !foods.contains_key(nutrient) {
                    return Err(StandardsError::UnknownNutrient {
                        nutrient: nutrient.clone(),
                    });
                }
            }
        }

        Ok(Self { rules, foods })
    }

    /// Nutrients recommended for a marker in the given status. Empty when
    /// the pair has no actionable guidance.
    pub fn nutrients_for(&self, marker: Marker, status: Status) -> &[String] {
        self.rules
            .get(&(marker, status))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Foods rich in a nutrient.
    pub fn foods_for(&self, nutrient: &str) -> &[String] {
        self.foods.get(nutrient).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules in (Marker, Status) order.
    pub fn rules(&self) -> impl Iterator<Item = (Marker, Status, &[String])> {
        self.rules
            .iter()
            .map(|((marker, status), nutrients)| (*marker, *status, nutrients.as_slice()))
    }

    /// Nutrients with their foods, sorted by nutrient name.
    pub fn nutrients(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.foods
            .iter()
            .map(|(nutrient, foods)| (nutrient.as_str(), foods.as_slice()))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn nutrient_count(&self) -> usize {
        self.foods.len()
    }

    pub fn food_count(&self) -> usize {
        self.foods.values().map(Vec::len).sum()
    }
}

fn parse_rules(content: &str, path: &Path) -> Result<BTreeMap<(Marker, Status), Vec<String>>> {
    let mut rules: BTreeMap<(Marker, Status), Vec<String>> = BTreeMap::new();
    for row in read_csv_rows(content, path, RULE_COLUMNS)? {
        let name = row.require(path, "Marker")?;
        let marker = name
            .parse::<Marker>()
            .map_err(|_| StandardsError::UnknownMarker {
                path: path.to_path_buf(),
                line: row.line,
                name: name.to_string(),
            })?;
        let raw_status = row.require(path, "Status")?;
        let status = raw_status
            .parse::<Status>()
            .map_err(|message| StandardsError::row(path, row.line, message))?;
        if !status.is_abnormal() {
            return Err(StandardsError::row(
                path,
                row.line,
                format!("rule for {marker} must target High or Low, not {status}"),
            ));
        }
        let nutrient = row.require(path, "Nutrient")?.to_string();
        let nutrients = rules.entry((marker, status)).or_default();
        if nutrients.contains(&nutrient) {
            return Err(StandardsError::row(
                path,
                row.line,
                format!("duplicate rule {marker}/{status} -> {nutrient}"),
            ));
        }
        nutrients.push(nutrient);
    }
    Ok(rules)
}

fn parse_foods(content: &str, path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    let mut foods: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in read_csv_rows(content, path, FOOD_COLUMNS)? {
        let nutrient = row.require(path, "Nutrient")?.to_string();
        let food = row.require(path, "Food")?.to_string();
        let list = foods.entry(nutrient).or_default();
        if list.contains(&food) {
            return Err(StandardsError::row(
                path,
                row.line,
                format!("duplicate food '{food}'"),
            ));
        }
        list.push(food);
    }
    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = "Marker,Status,Nutrient\n\
                         Hemoglobin,Low,Iron\n\
                         LDL Cholesterol,High,Dietary Fiber\n\
                         Triglycerides,High,Dietary Fiber\n";
    const FOODS: &str = "Nutrient,Food\n\
                         Iron,spinach\n\
                         Iron,liver\n\
                         Dietary Fiber,brown rice\n\
                         Vitamin A,carrot\n";

    fn parse(rules: &str, foods: &str) -> Result<NutrientMap> {
        NutrientMap::from_csv_str(rules, Path::new("rules.csv"), foods, Path::new("foods.csv"))
    }

    #[test]
    fn looks_up_rules_and_foods() {
        let map = parse(RULES, FOODS).unwrap();
        assert_eq!(map.nutrients_for(Marker::Hemoglobin, Status::Low), ["Iron"]);
        assert!(map.nutrients_for(Marker::Hemoglobin, Status::High).is_empty());
        assert!(map.nutrients_for(Marker::Ast, Status::High).is_empty());
        assert_eq!(map.foods_for("Iron"), ["spinach", "liver"]);
        assert!(map.foods_for("Zinc").is_empty());
        assert_eq!(map.rule_count(), 3);
        assert_eq!(map.nutrient_count(), 3);
        assert_eq!(map.food_count(), 4);
    }

    #[test]
    fn rejects_normal_status_rules() {
        let rules = "Marker,Status,Nutrient\nAST,Normal,Iron\n";
        let err = parse(rules, FOODS).unwrap_err();
        assert!(err.to_string().contains("must target High or Low"));
    }

    #[test]
    fn rejects_rules_for_nutrients_without_foods() {
        let rules = "Marker,Status,Nutrient\nAST,High,Taurine\n";
        let err = parse(rules, FOODS).unwrap_err();
        assert!(matches!(err, StandardsError::UnknownNutrient { nutrient } if nutrient == "Taurine"));
    }

    #[test]
    fn rejects_duplicates() {
        let rules = format!("{RULES}Hemoglobin,Low,Iron\n");
        assert!(parse(&rules, FOODS).is_err());
        let foods = format!("{FOODS}Iron,spinach\n");
        let err = parse(RULES, &foods).unwrap_err();
        assert!(matches!(err, StandardsError::InvalidRow { line: 6, .. }));
    }
}
