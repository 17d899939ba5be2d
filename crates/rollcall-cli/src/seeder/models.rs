//! Data models for database seeding configuration.

use chrono::NaiveDate;
use rollcall_models::{AcademicSessionId, SchoolId, StudentId};

/// Seed data for creating a school.
pub struct SchoolSeed {
    pub name: String,
    pub address: String,
}

/// Seed data for creating a student.
pub struct StudentSeed {
    pub school_id: SchoolId,
    pub admission_no: String,
    pub roll_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub class_name: String,
    pub section: String,
}

/// Seed data for one attendance record.
pub struct AttendanceSeed {
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: &'static str,
}

/// A seeded school together with its active session.
#[derive(Clone, Copy)]
pub struct SeededSchool {
    pub school_id: SchoolId,
    pub session_id: AcademicSessionId,
}

/// Configuration for classes and students per school.
#[derive(Clone)]
pub struct ClassesPerSchool {
    pub count: usize,
    pub sections_per_class: usize,
    pub students_per_section: usize,
}

impl Default for ClassesPerSchool {
    fn default() -> Self {
        Self {
            count: 5,              // e.g., classes 1-5
            sections_per_class: 2, // e.g., A, B
            students_per_section: 25,
        }
    }
}

/// Complete configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub num_schools: usize,
    pub classes_per_school: ClassesPerSchool,
    /// Number of past working days to mark
    pub days: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_schools: 1,
            classes_per_school: ClassesPerSchool::default(),
            days: 30,
        }
    }
}

impl SeedConfig {
    /// Creates a new seed configuration with the specified number of schools.
    pub fn new(num_schools: usize) -> Self {
        Self {
            num_schools,
            ..Default::default()
        }
    }

    /// Sets the classes per school configuration.
    pub fn with_classes(mut self, classes: ClassesPerSchool) -> Self {
        self.classes_per_school = classes;
        self
    }

    /// Sets the number of past working days to mark.
    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    /// Calculates total students per school.
    pub fn total_students_per_school(&self) -> usize {
        self.classes_per_school.count
            * self.classes_per_school.sections_per_class
            * self.classes_per_school.students_per_section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_students_per_school() {
        let config = SeedConfig::new(2).with_classes(ClassesPerSchool {
            count: 4,
            sections_per_class: 3,
            students_per_section: 10,
        });
        assert_eq!(config.total_students_per_school(), 120);
        assert_eq!(config.days, 30);
    }
}
