//! Attendance seeding for past working days.

use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;
use rayon::prelude::*;
use rollcall_attendance::{AttendanceStatus, DateRange, check_markable};
use rollcall_models::{SchoolId, StudentId};
use sqlx::PgPool;
use std::time::Instant;

use super::SeedResult;
use super::models::{AttendanceSeed, SeededSchool};
use super::schools::{holiday_calendar, session_bounds};

/// The most recent `count` markable dates before `today`, newest first.
pub fn past_working_days(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let (start, end) = session_bounds(today);
    let Ok(session) = DateRange::new(start, end) else {
        return Vec::new();
    };
    let holidays = holiday_calendar(start.year());

    let mut days = Vec::with_capacity(count);
    let mut date = today;
    while days.len() < count {
        let Some(previous) = date.checked_sub_days(Days::new(1)) else {
            break;
        };
        date = previous;
        if date < start {
            break;
        }
        let is_holiday = holidays.iter().any(|(d, _)| *d == date);
        if check_markable(date, today, Some(session), is_holiday).is_ok() {
            days.push(date);
        }
    }
    days
}

/// Picks a status with a realistic spread: mostly present.
fn random_status<R: Rng>(rng: &mut R) -> AttendanceStatus {
    match rng.gen_range(0..100) {
        0..85 => AttendanceStatus::Present,
        85..92 => AttendanceStatus::Absent,
        92..96 => AttendanceStatus::Late,
        _ => AttendanceStatus::HalfDay,
    }
}

/// Generates one record per student per day in parallel
pub fn generate_attendance(students: &[StudentId], days: &[NaiveDate]) -> Vec<AttendanceSeed> {
    students
        .par_iter()
        .flat_map_iter(|&student_id| {
            let mut rng = rand::thread_rng();
            days.iter()
                .map(|&date| AttendanceSeed {
                    student_id,
                    date,
                    status: random_status(&mut rng).as_str(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Marks attendance for every seeded student over the last `days` working days.
pub async fn seed_attendance(
    db: &PgPool,
    schools: &[SeededSchool],
    students: &[(SchoolId, StudentId)],
    today: NaiveDate,
    days: usize,
) -> SeedResult<u64> {
    let start_time = Instant::now();
    let dates = past_working_days(today, days);
    println!("📝 Seeding attendance for {} working days...", dates.len());

    let mut total = 0;
    for school in schools {
        let student_ids: Vec<StudentId> = students
            .iter()
            .filter(|(school_id, _)| *school_id == school.school_id)
            .map(|(_, id)| *id)
            .collect();
        let records = generate_attendance(&student_ids, &dates);

        const BATCH_SIZE: usize = 5000;
        for chunk in records.chunks(BATCH_SIZE) {
            let ids: Vec<StudentId> = chunk.iter().map(|r| r.student_id).collect();
            let dates: Vec<NaiveDate> = chunk.iter().map(|r| r.date).collect();
            let statuses: Vec<&str> = chunk.iter().map(|r| r.status).collect();

            total += sqlx::query(
                r#"
                INSERT INTO attendance_records
                    (school_id, academic_session_id, student_id, attendance_date, status)
                SELECT $1, $2, s, d, st
                FROM UNNEST($3::UUID[], $4::DATE[], $5::TEXT[]) AS t(s, d, st)
                ON CONFLICT (student_id, attendance_date) DO NOTHING
                "#,
            )
            .bind(school.school_id)
            .bind(school.session_id)
            .bind(&ids)
            .bind(&dates)
            .bind(&statuses)
            .execute(db)
            .await?
            .rows_affected();
        }
    }

    println!(
        "   ✓ Inserted {} attendance records in {:?}",
        total,
        start_time.elapsed()
    );

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_past_working_days_skip_sundays_and_holidays() {
        // Monday 2024-08-19; Sunday 08-18 and Independence Day 08-15 are skipped
        let days = past_working_days(date(2024, 8, 19), 4);
        assert_eq!(
            days,
            vec![date(2024, 8, 17), date(2024, 8, 16), date(2024, 8, 14), date(2024, 8, 13)]
        );
        assert!(days.iter().all(|d| d.weekday() != Weekday::Sun));
    }

    #[test]
    fn test_past_working_days_stop_at_session_start() {
        let days = past_working_days(date(2024, 4, 3), 10);
        assert_eq!(days, vec![date(2024, 4, 2), date(2024, 4, 1)]);
    }

    #[test]
    fn test_generate_attendance_one_per_student_day() {
        let students = vec![StudentId::new(), StudentId::new()];
        let days = vec![date(2024, 4, 1), date(2024, 4, 2)];
        let records = generate_attendance(&students, &days);

        assert_eq!(records.len(), 4);
        assert!(
            records
                .iter()
                .all(|r| AttendanceStatus::parse_code(r.status).is_some())
        );
    }
}
