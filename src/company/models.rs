use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::types::CompanyInput;

/// Database model for companies table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct CompanyModel {
    pub id: String, // UUID v4, assigned server side
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub employees: i64,
    pub registered: bool,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub company_type: String,
}

impl CompanyModel {
    /// Creates a new company from client input with a freshly generated ID
    pub fn new(input: CompanyInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            employees: input.employees,
            registered: input.registered,
            company_type: input.company_type,
        }
    }

    /// Overwrites every mutable field from `input`, zero values included.
    /// The ID is left untouched.
    pub fn apply(&mut self, input: CompanyInput) {
        self.name = input.name;
        self.description = input.description;
        self.employees = input.employees;
        self.registered = input.registered;
        self.company_type = input.company_type;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> CompanyInput {
        CompanyInput {
            name: name.to_string(),
            description: "Widgets".to_string(),
            employees: 10,
            registered: true,
            company_type: "LLC".to_string(),
        }
    }

    #[test]
    fn test_new_company_model() {
        let company = CompanyModel::new(input("Acme"));

        assert!(Uuid::parse_str(&company.id).is_ok());
        assert_eq!(company.name, "Acme");
        assert_eq!(company.description, "Widgets");
        assert_eq!(company.employees, 10);
        assert!(company.registered);
        assert_eq!(company.company_type, "LLC");
    }

    #[test]
    fn test_new_company_ids_are_unique() {
        let a = CompanyModel::new(input("Acme"));
        let b = CompanyModel::new(input("Acme"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_overwrites_with_zero_values() {
        let mut company = CompanyModel::new(input("Acme"));
        let id = company.id.clone();

        company.apply(CompanyInput {
            name: "Acme Two".to_string(),
            description: String::new(),
            employees: 0,
            registered: false,
            company_type: String::new(),
        });

        assert_eq!(company.id, id);
        assert_eq!(company.name, "Acme Two");
        assert_eq!(company.description, "");
        assert_eq!(company.employees, 0);
        assert!(!company.registered);
        assert_eq!(company.company_type, "");
    }

    #[test]
    fn test_serialization_uses_type_key_and_omits_empty_description() {
        let mut company = CompanyModel::new(input("Acme"));
        company.description = String::new();

        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["type"], "LLC");
        assert!(json.get("company_type").is_none());
        assert!(json.get("description").is_none());

        let back: CompanyModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, company);
    }
}
