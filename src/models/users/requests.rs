use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use crate::models::FieldErrors;
use crate::utils::validate::{
    validate_email, validate_password, validate_phone, validate_sex, validate_username,
};

/// 创建人员（学生 / 教师 / 家长）请求，角色由路由决定
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "user.ts")]
pub struct CreatePersonRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<DateTime<Utc>>,
    pub sex: Option<String>,
    /// 仅学生
    pub class_id: Option<i64>,
    /// 仅学生
    pub parent_id: Option<i64>,
}

impl CreatePersonRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(msg) = validate_username(&self.username) {
            errors.add("username", msg);
        }
        if let Err(msg) = validate_password(&self.password) {
            errors.add("password", msg);
        }
        if let Some(email) = &self.email
            && let Err(msg) = validate_email(email)
        {
            errors.add("email", msg);
        }
        errors.check(
            !self.first_name.trim().is_empty(),
            "firstName",
            "First name is required",
        );
        errors.check(
            !self.surname.trim().is_empty(),
            "surname",
            "Surname is required",
        );
        validate_contact(&mut errors, self.phone.as_deref(), self.sex.as_deref());
        errors.into_result()
    }
}

/// 更新人员请求，未提供的字段保持不变
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "user.ts")]
pub struct UpdatePersonRequest {
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<DateTime<Utc>>,
    pub sex: Option<String>,
    /// 传 null 表示移出班级
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[ts(optional)]
    pub class_id: Option<Option<i64>>,
    /// 传 null 表示解除家长关联
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[ts(optional)]
    pub parent_id: Option<Option<i64>>,
    pub active: Option<bool>,
}

// 区分字段缺失（None）与显式 null（Some(None)）
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdatePersonRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(password) = &self.password
            && let Err(msg) = validate_password(password)
        {
            errors.add("password", msg);
        }
        if let Some(email) = &self.email
            && let Err(msg) = validate_email(email)
        {
            errors.add("email", msg);
        }
        if let Some(first_name) = &self.first_name {
            errors.check(
                !first_name.trim().is_empty(),
                "firstName",
                "First name cannot be empty",
            );
        }
        if let Some(surname) = &self.surname {
            errors.check(!surname.trim().is_empty(), "surname", "Surname cannot be empty");
        }
        validate_contact(&mut errors, self.phone.as_deref(), self.sex.as_deref());
        errors.into_result()
    }
}

fn validate_contact(errors: &mut FieldErrors, phone: Option<&str>, sex: Option<&str>) {
    if let Some(phone) = phone
        && let Err(msg) = validate_phone(phone)
    {
        errors.add("phone", msg);
    }
    if let Some(sex) = sex
        && let Err(msg) = validate_sex(sex)
    {
        errors.add("sex", msg);
    }
}

/// 存储层写入用的人员数据（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub username: String,
    pub password_hash: String,
    pub role: crate::models::users::entities::UserRole,
    pub email: Option<String>,
    pub first_name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<DateTime<Utc>>,
    pub sex: Option<String>,
    pub class_id: Option<i64>,
    pub parent_id: Option<i64>,
}

/// 存储层更新用的人员数据（密码已哈希）
#[derive(Debug, Clone, Default)]
pub struct PersonChanges {
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<DateTime<Utc>>,
    pub sex: Option<String>,
    /// `Some(None)` 清空
    pub class_id: Option<Option<i64>>,
    pub parent_id: Option<Option<i64>>,
    pub status: Option<crate::models::users::entities::UserStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreatePersonRequest {
        CreatePersonRequest {
            username: "student01".to_string(),
            password: "Secure123".to_string(),
            email: Some("s01@school.test".to_string()),
            first_name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            phone: None,
            address: None,
            birthday: None,
            sex: None,
            class_id: Some(1),
            parent_id: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_reports_every_bad_field() {
        let mut req = request();
        req.username = "ab".to_string();
        req.password = "short".to_string();
        req.email = Some("not-an-email".to_string());
        req.first_name = " ".to_string();

        let errors = req.validate().unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "password", "email", "firstName"]);
    }

    #[test]
    fn test_update_distinguishes_null_from_missing() {
        let req: UpdatePersonRequest =
            serde_json::from_str(r#"{"classId": null, "parentId": 7}"#).unwrap();
        assert_eq!(req.class_id, Some(None));
        assert_eq!(req.parent_id, Some(Some(7)));

        let req: UpdatePersonRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.class_id, None);
        assert_eq!(req.parent_id, None);
    }
}
