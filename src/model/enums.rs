//! Domain enumerations shared by the record models

use serde::{Deserialize, Serialize};

/// Gender of a person record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Relation of a family member to the household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Father,
    Mother,
    Son,
    Daughter,
    Grandfather,
    Grandmother,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lowercase_wire_format() {
        assert_eq!(serde_json::to_value(Gender::Female).unwrap(), json!("female"));
        assert_eq!(
            serde_json::to_value(Relation::Grandmother).unwrap(),
            json!("grandmother")
        );
    }
}
