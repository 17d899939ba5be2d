//! School, session and holiday seeding.
//!
//! Every seeded school gets one active April-March session containing
//! `today` and a fixed holiday calendar inside it.

use chrono::{Datelike, NaiveDate};
use fake::Fake;
use fake::faker::address::en::*;
use rayon::prelude::*;
use rollcall_models::{AcademicSessionId, SchoolId};
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::SeedResult;
use super::models::{SchoolSeed, SeededSchool};

/// National holidays declared in every seeded session, as (month, day, name).
const HOLIDAYS: [(u32, u32, &str); 5] = [
    (8, 15, "Independence Day"),
    (10, 2, "Gandhi Jayanti"),
    (11, 1, "Diwali"),
    (12, 25, "Christmas"),
    (1, 26, "Republic Day"),
];

/// Generates school data in parallel using Rayon
pub fn generate_schools(count: usize) -> Vec<SchoolSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let building: String = BuildingNumber().fake();
            let zip: String = ZipCode().fake();

            SchoolSeed {
                name: format!("{} Public School #{}", city, idx + 1),
                address: format!("{} {}, {} {}", building, street, city, zip),
            }
        })
        .collect()
}

/// Returns the April-March session that contains `today`.
pub fn session_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start_year = if today.month() >= 4 {
        today.year()
    } else {
        today.year() - 1
    };
    (
        NaiveDate::from_ymd_opt(start_year, 4, 1).unwrap_or(today),
        NaiveDate::from_ymd_opt(start_year + 1, 3, 31).unwrap_or(today),
    )
}

/// Holiday dates of the session starting in April of `start_year`.
pub fn holiday_calendar(start_year: i32) -> Vec<(NaiveDate, &'static str)> {
    HOLIDAYS
        .iter()
        .filter_map(|&(month, day, name)| {
            let year = if month >= 4 { start_year } else { start_year + 1 };
            NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, name))
        })
        .collect()
}

/// Seeds schools, each with an active session and its holidays.
pub async fn seed_schools(
    db: &PgPool,
    count: usize,
    today: NaiveDate,
) -> SeedResult<Vec<SeededSchool>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} schools...", count);

    let schools = generate_schools(count);
    let (start, end) = session_bounds(today);
    let session_name = format!("{}-{}", start.year(), end.year());
    let holidays = holiday_calendar(start.year());

    let mut tx = db.begin().await?;
    let mut seeded = Vec::with_capacity(schools.len());

    for school in &schools {
        let school_id: Uuid = sqlx::query_scalar(
            "INSERT INTO schools (name, address) VALUES ($1, $2) RETURNING id",
        )
        .bind(&school.name)
        .bind(&school.address)
        .fetch_one(&mut *tx)
        .await?;

        let session_id: Uuid = sqlx::query_scalar(
            "INSERT INTO academic_sessions (school_id, name, start_date, end_date, is_active)
             VALUES ($1, $2, $3, $4, TRUE)
             RETURNING id",
        )
        .bind(school_id)
        .bind(&session_name)
        .bind(start)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        insert_holidays(&mut tx, school_id, session_id, &holidays).await?;

        seeded.push(SeededSchool {
            school_id: SchoolId::from(school_id),
            session_id: AcademicSessionId::from(session_id),
        });
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} schools with session {} and {} holidays each in {:?}",
        seeded.len(),
        session_name,
        holidays.len(),
        start_time.elapsed()
    );

    Ok(seeded)
}

async fn insert_holidays(
    tx: &mut Transaction<'_, Postgres>,
    school_id: Uuid,
    session_id: Uuid,
    holidays: &[(NaiveDate, &str)],
) -> SeedResult<()> {
    let dates: Vec<NaiveDate> = holidays.iter().map(|(date, _)| *date).collect();
    let names: Vec<String> = holidays.iter().map(|(_, name)| name.to_string()).collect();

    sqlx::query(
        "INSERT INTO holidays (school_id, academic_session_id, holiday_date, name)
         SELECT $1, $2, d, n FROM UNNEST($3::DATE[], $4::TEXT[]) AS t(d, n)",
    )
    .bind(school_id)
    .bind(session_id)
    .bind(&dates)
    .bind(&names)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Clears all schools from the database; sessions, students, holidays and
/// attendance cascade.
pub async fn clear_schools(db: &PgPool) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing schools...");

    let result = sqlx::query("DELETE FROM schools")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} schools in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
