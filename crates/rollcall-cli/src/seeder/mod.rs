//! Database seeding with fake schools, students, holidays and attendance.
//!
//! Data is generated in parallel with Rayon and inserted in batches with
//! `UNNEST` so a few thousand students and a month of attendance seed in
//! seconds.

pub mod attendance;
pub mod models;
pub mod schools;
pub mod students;

use chrono::NaiveDate;
use sqlx::PgPool;
use std::time::Instant;

pub use models::{ClassesPerSchool, SeedConfig, SeededSchool};

pub type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Seeds schools, sessions, holidays, students and attendance.
pub async fn seed_all(db: &PgPool, config: SeedConfig, today: NaiveDate) -> SeedResult<()> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Schools: {}", config.num_schools);
    println!(
        "   - Students per school: {} ({} classes x {} sections x {})",
        config.total_students_per_school(),
        config.classes_per_school.count,
        config.classes_per_school.sections_per_class,
        config.classes_per_school.students_per_section
    );
    println!("   - Days of attendance: {}\n", config.days);

    let schools = schools::seed_schools(db, config.num_schools, today).await?;
    let school_ids: Vec<_> = schools.iter().map(|s| s.school_id).collect();
    let students = students::seed_students(db, &school_ids, &config.classes_per_school).await?;
    attendance::seed_attendance(db, &schools, &students, today, config.days).await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    Ok(())
}

/// Deletes every school and everything scoped to it.
pub async fn clear_all(db: &PgPool) -> SeedResult<()> {
    schools::clear_schools(db).await?;
    Ok(())
}
