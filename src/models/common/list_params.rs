//! 列表接口通用查询参数
//!
//! 所有列表接口共享同一组参数，各资源只读取自己关心的字段。
//! 查询串中的数字以字符串形式到达，空值视为未提供。

use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use super::PageRequest;

/// 消息箱过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "api.ts")]
pub enum MessageBox {
    Inbox,
    Sent,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api.ts")]
pub struct ListParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub teacher_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub parent_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub lesson_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub exam_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub assignment_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub grade: Option<i64>,
    #[serde(default, rename = "box")]
    pub mailbox: Option<MessageBox>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    /// 去除首尾空白后的搜索词，空串视为未提供
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct OptionalI64Visitor;

    impl<'de> Visitor<'de> for OptionalI64Visitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(Some(value as i64))
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value
                .parse()
                .map(Some)
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(OptionalI64Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> ListParams {
        actix_web::web::Query::<ListParams>::from_query(query)
            .expect("query should parse")
            .into_inner()
    }

    #[test]
    fn test_parses_camel_case_ids() {
        let params = parse("page=2&limit=5&classId=3&teacherId=7&search=math");
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(5));
        assert_eq!(params.class_id, Some(3));
        assert_eq!(params.teacher_id, Some(7));
        assert_eq!(params.search_term(), Some("math"));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let params = parse("classId=&search=%20%20");
        assert_eq!(params.class_id, None);
        assert_eq!(params.search_term(), None);
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(actix_web::web::Query::<ListParams>::from_query("classId=abc").is_err());
    }

    #[test]
    fn test_mailbox() {
        assert_eq!(parse("box=sent").mailbox, Some(MessageBox::Sent));
        assert_eq!(parse("").mailbox, None);
    }
}
