use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldErrors;

/// 默认统计最近 7 天
pub const DEFAULT_WINDOW_DAYS: i64 = 7;
/// 单次最多统计 366 天
pub const MAX_WINDOW_DAYS: i64 = 366;

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "stats.ts")]
pub struct AttendanceStatsQuery {
    pub class_id: Option<i64>,
    /// 起始日期（含），YYYY-MM-DD
    pub from: Option<NaiveDate>,
    /// 结束日期（含），YYYY-MM-DD
    pub to: Option<NaiveDate>,
}

impl AttendanceStatsQuery {
    /// 计算统计窗口，缺省为截至 today 的最近 7 天
    pub fn window(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), FieldErrors> {
        let to = self.to.unwrap_or(today);
        let from = match self.from {
            Some(from) => from,
            None => to
                .checked_sub_days(chrono::Days::new((DEFAULT_WINDOW_DAYS - 1) as u64))
                .ok_or_else(|| FieldErrors::single("to", "Date is out of range"))?,
        };

        let mut errors = FieldErrors::new();
        errors.check(from <= to, "from", "From date must not be after to date");
        errors.check(
            (to - from).num_days() < MAX_WINDOW_DAYS,
            "to",
            "Date range must not exceed 366 days",
        );
        errors.into_result().map(|_| (from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_default_window_is_last_seven_days() {
        let query = AttendanceStatsQuery::default();
        let (from, to) = query.window(date("2025-03-10")).unwrap();
        assert_eq!(from, date("2025-03-04"));
        assert_eq!(to, date("2025-03-10"));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let query = AttendanceStatsQuery {
            class_id: None,
            from: Some(date("2025-03-10")),
            to: Some(date("2025-03-01")),
        };
        assert!(query.window(date("2025-03-10")).is_err());
    }

    #[test]
    fn test_earliest_date_without_from_is_rejected() {
        let query: AttendanceStatsQuery =
            actix_web::web::Query::<AttendanceStatsQuery>::from_query("to=-262143-01-03").unwrap().into_inner();
        assert!(query.to.is_some());

        let errors = query.window(date("2025-03-10")).unwrap_err();
        assert_eq!(errors.errors()[0].field, "to");

        let query = AttendanceStatsQuery {
            to: Some(NaiveDate::MIN),
            ..Default::default()
        };
        assert!(query.window(date("2025-03-10")).is_err());
    }
}
