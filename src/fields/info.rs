use serde::Serialize;

use crate::repository::{ApiFieldInfo, FieldFormat, FieldId, FieldType};

use super::error::FieldsError;

/// A validated field definition.
///
/// Unlike [`ApiFieldInfo`], the id, name and type are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub id: FieldId,
    pub name: String,
    pub field_type: FieldType,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub length: Option<i32>,
    pub default_value: Option<String>,
    pub is_multi_value: bool,
    pub is_required: bool,
    pub constraint: Option<String>,
    pub constraint_error: Option<String>,
    pub list_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
    pub currency: Option<String>,
    pub format_pattern: Option<String>,
}

impl TryFrom<&ApiFieldInfo> for FieldInfo {
    type Error = FieldsError;

    fn try_from(api: &ApiFieldInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: api.id.ok_or(FieldsError::MissingProperty("id"))?,
            name: api
                .name
                .clone()
                .ok_or(FieldsError::MissingProperty("name"))?,
            field_type: api
                .field_type
                .ok_or(FieldsError::MissingProperty("fieldType"))?,
            display_name: api.display_name.clone(),
            description: api.description.clone(),
            length: api.length,
            default_value: api.default_value.clone(),
            is_multi_value: api.is_multi_value.unwrap_or(false),
            is_required: api.is_required.unwrap_or(false),
            constraint: api.constraint.clone(),
            constraint_error: api.constraint_error.clone(),
            list_values: api.list_values.clone().unwrap_or_default(),
            format: api.format,
            currency: api.currency.clone(),
            format_pattern: api.format_pattern.clone(),
        })
    }
}

/// Validate a list of API field definitions.
pub(crate) fn validate_all(fields: &[ApiFieldInfo]) -> Result<Vec<FieldInfo>, FieldsError> {
    fields.iter().map(FieldInfo::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_complete_definition() {
        let json = r#"{
            "id": 11,
            "name": "State",
            "displayName": "State",
            "fieldType": "List",
            "isRequired": true,
            "listValues": ["CA", "WA"],
            "format": "None"
        }"#;
        let api: ApiFieldInfo = serde_json::from_str(json).unwrap();
        let info = FieldInfo::try_from(&api).unwrap();

        assert_eq!(info.id, 11);
        assert_eq!(info.field_type, FieldType::List);
        assert!(info.is_required);
        assert!(!info.is_multi_value);
        assert_eq!(info.list_values, vec!["CA", "WA"]);
        assert_eq!(info.format, Some(FieldFormat::None));
    }

    #[test]
    fn test_missing_required_properties() {
        let mut api = ApiFieldInfo::new(1, "Name", FieldType::String);
        api.field_type = None;
        assert!(matches!(
            FieldInfo::try_from(&api),
            Err(FieldsError::MissingProperty("fieldType"))
        ));

        api.name = None;
        assert!(matches!(
            FieldInfo::try_from(&api),
            Err(FieldsError::MissingProperty("name"))
        ));
    }
}
