use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

use super::StatsService;
use crate::models::ApiResponse;
use crate::models::attendance::entities::Attendance;
use crate::models::stats::requests::AttendanceStatsQuery;
use crate::models::stats::responses::{AttendanceDay, AttendanceStatsResponse};
use crate::services::current_principal;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 按日汇总出勤，窗口内没有记录的日期计为 0
pub fn aggregate_attendance(
    records: &[Attendance],
    from: NaiveDate,
    to: NaiveDate,
) -> AttendanceStatsResponse {
    let mut days: BTreeMap<NaiveDate, (i64, i64)> = from
        .iter_days()
        .take_while(|day| *day <= to)
        .map(|day| (day, (0, 0)))
        .collect();

    for record in records {
        if let Some((present, absent)) = days.get_mut(&record.date.date_naive()) {
            if record.present {
                *present += 1;
            } else {
                *absent += 1;
            }
        }
    }

    AttendanceStatsResponse {
        from: from.format(DATE_FORMAT).to_string(),
        to: to.format(DATE_FORMAT).to_string(),
        days: days
            .into_iter()
            .map(|(day, (present, absent))| AttendanceDay {
                date: day.format(DATE_FORMAT).to_string(),
                present,
                absent,
            })
            .collect(),
    }
}

/// 当天 00:00 UTC 的时间戳
fn day_start(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

pub async fn attendance_stats(
    service: &StatsService,
    request: &HttpRequest,
    query: AttendanceStatsQuery,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let (from, to) = query.window(Utc::now().date_naive())?;

    let storage = service.get_storage(request)?;
    let end = to.succ_opt().unwrap_or(to);
    let records = storage
        .list_attendance_between(&principal, query.class_id, day_start(from), day_start(end))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        aggregate_attendance(&records, from, to),
        "Attendance statistics retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: i64, day: u32, present: bool) -> Attendance {
        let date = Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap();
        Attendance {
            id,
            date,
            present,
            student_id: 1,
            lesson_id: 1,
            created_at: date,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_every_day_in_window_is_reported() {
        let stats = aggregate_attendance(&[], date(1), date(7));
        assert_eq!(stats.days.len(), 7);
        assert_eq!(stats.from, "2025-03-01");
        assert_eq!(stats.to, "2025-03-07");
        assert!(stats.days.iter().all(|d| d.present == 0 && d.absent == 0));
    }

    #[test]
    fn test_counts_present_and_absent_per_day() {
        let records = vec![
            record(1, 2, true),
            record(2, 2, false),
            record(3, 2, true),
            record(4, 5, false),
            // 窗口外
            record(5, 9, true),
        ];
        let stats = aggregate_attendance(&records, date(1), date(7));

        assert_eq!(
            stats.days[1],
            AttendanceDay {
                date: "2025-03-02".to_string(),
                present: 2,
                absent: 1,
            }
        );
        assert_eq!(stats.days[4].absent, 1);
        assert_eq!(stats.days.iter().map(|d| d.present).sum::<i64>(), 2);
    }

    #[test]
    fn test_single_day_window() {
        let stats = aggregate_attendance(&[record(1, 3, true)], date(3), date(3));
        assert_eq!(stats.days.len(), 1);
        assert_eq!(stats.days[0].present, 1);
    }
}
