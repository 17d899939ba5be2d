use sqlx::PgPool;
use tracing::instrument;

use rollcall_core::{AppError, PaginationMeta};
use rollcall_models::ids::{SchoolId, StudentId};

use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams,
};

pub(crate) const STUDENT_COLUMNS: &str = "id, school_id, admission_no, roll_number, first_name, last_name, father_name, class_name, section, is_active, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create_student(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"INSERT INTO students
                   (school_id, admission_no, roll_number, first_name, last_name, father_name, class_name, section)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {STUDENT_COLUMNS}"#
        ))
        .bind(school_id)
        .bind(dto.admission_no.trim())
        .bind(dto.roll_number)
        .bind(dto.first_name.trim())
        .bind(dto.last_name.trim())
        .bind(&dto.father_name)
        .bind(dto.class_name.trim())
        .bind(&dto.section)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Student with admission number {} already exists",
                        dto.admission_no
                    ));
                }
            }
            AppError::from(e)
        })?;

        Ok(student)
    }

    /// Active and inactive students of a school in roll-number order.
    #[instrument(skip(db))]
    pub async fn get_students_by_school(
        db: &PgPool,
        school_id: SchoolId,
        filters: StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM students
               WHERE school_id = $1
                 AND ($2::TEXT IS NULL OR class_name = $2)
                 AND ($3::TEXT IS NULL OR section = $3)"#,
        )
        .bind(school_id)
        .bind(&filters.class_name)
        .bind(&filters.section)
        .fetch_one(db)
        .await?;

        let students = sqlx::query_as::<_, Student>(&format!(
            r#"SELECT {STUDENT_COLUMNS}
               FROM students
               WHERE school_id = $1
                 AND ($2::TEXT IS NULL OR class_name = $2)
                 AND ($3::TEXT IS NULL OR section = $3)
               ORDER BY class_name, section NULLS FIRST, roll_number NULLS LAST, first_name, last_name
               LIMIT $4 OFFSET $5"#
        ))
        .bind(school_id)
        .bind(&filters.class_name)
        .bind(&filters.section)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: PaginationMeta::from_params(total, &filters.pagination),
        })
    }

    /// Active students of one class, as listed on registers and reports.
    #[instrument(skip(db))]
    pub async fn get_class_roster(
        db: &PgPool,
        school_id: SchoolId,
        class_name: Option<&str>,
        section: Option<&str>,
    ) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            r#"SELECT {STUDENT_COLUMNS}
               FROM students
               WHERE school_id = $1
                 AND is_active
                 AND ($2::TEXT IS NULL OR class_name = $2)
                 AND ($3::TEXT IS NULL OR section = $3)
               ORDER BY class_name, section NULLS FIRST, roll_number NULLS LAST, first_name, last_name"#
        ))
        .bind(school_id)
        .bind(class_name)
        .bind(section)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(
        db: &PgPool,
        id: StudentId,
        school_id: SchoolId,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    /// IDs from `ids` that are not students of the school.
    #[instrument(skip(db, ids))]
    pub async fn find_unknown_students(
        db: &PgPool,
        school_id: SchoolId,
        ids: &[StudentId],
    ) -> Result<Vec<StudentId>, AppError> {
        let unknown = sqlx::query_scalar::<_, StudentId>(
            r#"SELECT requested.id
               FROM UNNEST($1::UUID[]) AS requested(id)
               LEFT JOIN students s ON s.id = requested.id AND s.school_id = $2
               WHERE s.id IS NULL"#,
        )
        .bind(ids)
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(unknown)
    }
}
