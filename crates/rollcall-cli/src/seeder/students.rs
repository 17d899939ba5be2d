//! Student seeding functionality.

use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use rollcall_models::{SchoolId, StudentId};
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::SeedResult;
use super::models::{ClassesPerSchool, StudentSeed};

const SECTIONS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Generates students for every class and section of the given schools
pub fn generate_students(school_ids: &[SchoolId], classes: &ClassesPerSchool) -> Vec<StudentSeed> {
    let sections = classes.sections_per_class.min(SECTIONS.len());

    school_ids
        .par_iter()
        .enumerate()
        .flat_map(|(school_idx, &school_id)| {
            let mut students =
                Vec::with_capacity(classes.count * sections * classes.students_per_section);

            for class_idx in 0..classes.count {
                for section in &SECTIONS[..sections] {
                    for roll in 1..=classes.students_per_section {
                        let first_name: String = FirstName().fake();
                        let last_name: String = LastName().fake();
                        let father_first: String = FirstName().fake();

                        students.push(StudentSeed {
                            school_id,
                            admission_no: format!(
                                "S{}-{}{}-{:03}",
                                school_idx + 1,
                                class_idx + 1,
                                section,
                                roll
                            ),
                            roll_number: roll as i32,
                            father_name: format!("{} {}", father_first, last_name),
                            first_name,
                            last_name,
                            class_name: (class_idx + 1).to_string(),
                            section: section.to_string(),
                        });
                    }
                }
            }

            students
        })
        .collect()
}

/// Seeds students and returns their ids grouped by school.
pub async fn seed_students(
    db: &PgPool,
    school_ids: &[SchoolId],
    classes: &ClassesPerSchool,
) -> SeedResult<Vec<(SchoolId, StudentId)>> {
    let start_time = Instant::now();

    let students = generate_students(school_ids, classes);
    println!("👩‍🎓 Seeding {} students...", students.len());

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(students.len());

    const BATCH_SIZE: usize = 1000;
    for chunk in students.chunks(BATCH_SIZE) {
        ids.extend(insert_students_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> SeedResult<Vec<(SchoolId, StudentId)>> {
    if students.is_empty() {
        return Ok(Vec::new());
    }

    let school_ids: Vec<SchoolId> = students.iter().map(|s| s.school_id).collect();
    let admission_nos: Vec<&str> = students.iter().map(|s| s.admission_no.as_str()).collect();
    let rolls: Vec<i32> = students.iter().map(|s| s.roll_number).collect();
    let first_names: Vec<&str> = students.iter().map(|s| s.first_name.as_str()).collect();
    let last_names: Vec<&str> = students.iter().map(|s| s.last_name.as_str()).collect();
    let fathers: Vec<&str> = students.iter().map(|s| s.father_name.as_str()).collect();
    let classes: Vec<&str> = students.iter().map(|s| s.class_name.as_str()).collect();
    let sections: Vec<&str> = students.iter().map(|s| s.section.as_str()).collect();

    let rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
        r#"
        INSERT INTO students
            (school_id, admission_no, roll_number, first_name, last_name,
             father_name, class_name, section)
        SELECT * FROM UNNEST(
            $1::UUID[], $2::TEXT[], $3::INT4[], $4::TEXT[], $5::TEXT[],
            $6::TEXT[], $7::TEXT[], $8::TEXT[]
        )
        RETURNING school_id, id
        "#,
    )
    .bind(&school_ids)
    .bind(&admission_nos)
    .bind(&rolls)
    .bind(&first_names)
    .bind(&last_names)
    .bind(&fathers)
    .bind(&classes)
    .bind(&sections)
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(school_id, id)| (SchoolId::from(school_id), StudentId::from(id)))
        .collect())
}
