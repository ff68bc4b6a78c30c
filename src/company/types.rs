use serde::Deserialize;

use crate::shared::AppError;

/// Request payload for creating or patching a company.
/// Absent fields take their zero value; any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub employees: i64,
    #[serde(default)]
    pub registered: bool,
    #[serde(rename = "type", default)]
    pub company_type: String,
}

impl CompanyInput {
    /// Checks a creation payload. Patches are applied verbatim and skip this.
    pub fn validate_for_create(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_for_missing_fields() {
        let input: CompanyInput = serde_json::from_str(r#"{}"#).unwrap();

        assert_eq!(input.name, "");
        assert_eq!(input.description, "");
        assert_eq!(input.employees, 0);
        assert!(!input.registered);
        assert_eq!(input.company_type, "");
    }

    #[test]
    fn test_client_supplied_id_is_ignored() {
        let input: CompanyInput =
            serde_json::from_str(r#"{"id": "mine", "name": "Acme", "type": "LLC"}"#).unwrap();
        assert_eq!(input.company_type, "LLC");
    }

    #[test]
    fn test_employee_count_beyond_32_bits() {
        let input: CompanyInput =
            serde_json::from_str(r#"{"name": "Big", "employees": 3000000000}"#).unwrap();
        assert_eq!(input.employees, 3_000_000_000);
    }

    #[rstest]
    #[case(r#"{"name": 42}"#)]
    #[case(r#"{"name": "Acme", "employees": "ten"}"#)]
    #[case(r#"{"name": "Acme", "registered": "yes"}"#)]
    fn test_malformed_payloads_fail_to_parse(#[case] payload: &str) {
        let result: Result<CompanyInput, _> = serde_json::from_str(payload);
        assert!(result.is_err());
    }

    #[rstest]
    #[case("Acme", 10, true)]
    #[case("Acme", 0, true)]
    #[case("Acme", -5, true)]
    #[case("", 10, false)]
    #[case("   ", 10, false)]
    fn test_validate_for_create(#[case] name: &str, #[case] employees: i64, #[case] valid: bool) {
        let input = CompanyInput {
            name: name.to_string(),
            description: String::new(),
            employees,
            registered: false,
            company_type: String::new(),
        };

        assert_eq!(input.validate_for_create().is_ok(), valid);
    }
}
