use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldErrors;

pub const MAX_GRADE_LEVEL: i32 = 12;

fn check_grade(errors: &mut FieldErrors, grade_level: i32) {
    errors.check(
        (1..=MAX_GRADE_LEVEL).contains(&grade_level),
        "gradeLevel",
        "Grade level must be between 1 and 12",
    );
}

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub grade_level: i32,
    pub capacity: i32,
    pub supervisor_id: Option<i64>,
}

impl CreateClassRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(!self.name.trim().is_empty(), "name", "Name is required");
        check_grade(&mut errors, self.grade_level);
        errors.check(self.capacity >= 1, "capacity", "Capacity must be at least 1");
        errors.into_result()
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub grade_level: Option<i32>,
    pub capacity: Option<i32>,
    pub supervisor_id: Option<i64>,
}

impl UpdateClassRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            errors.check(!name.trim().is_empty(), "name", "Name cannot be empty");
        }
        if let Some(grade_level) = self.grade_level {
            check_grade(&mut errors, grade_level);
        }
        if let Some(capacity) = self.capacity {
            errors.check(capacity >= 1, "capacity", "Capacity must be at least 1");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_validation() {
        let req = CreateClassRequest {
            name: "1A".to_string(),
            grade_level: 13,
            capacity: 0,
            supervisor_id: None,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 2);
    }

    #[test]
    fn test_update_only_checks_present_fields() {
        assert!(UpdateClassRequest::default().validate().is_ok());
        let req = UpdateClassRequest {
            name: Some("".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
