//! Excel rendering of the yearly attendance report.
//!
//! The workbook has a `Summary` sheet with one row per student (attended
//! and working days for each academic month, then yearly totals) and a
//! `Monthly Statistics` sheet with class-wide figures.

use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet, XlsxError};

use rollcall_attendance::month_name;

use crate::modules::reports::model::YearlyAttendanceReport;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const STUDENT_HEADERS: [&str; 5] = ["S.No", "Admission No", "Roll No", "Name", "Father's Name"];
const TOTAL_HEADERS: [&str; 7] = [
    "Working Days",
    "Attended",
    "Absent",
    "Late",
    "Half Day",
    "Attendance %",
    "Grade",
];

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn short_month(month: u32) -> &'static str {
    month_name(month).get(..3).unwrap_or("")
}

fn write_headers(worksheet: &mut Worksheet, row: u32, headers: &[String]) -> Result<(), XlsxError> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(row, col as u16, header.as_str(), &format)?;
    }
    Ok(())
}

fn write_summary(worksheet: &mut Worksheet, report: &YearlyAttendanceReport) -> Result<(), XlsxError> {
    worksheet.set_name("Summary")?;

    let title = if report.session_name.is_empty() {
        "Yearly Attendance".to_string()
    } else {
        format!(
            "Yearly Attendance - {} ({})",
            report.session_name, report.session_year
        )
    };
    worksheet.write_with_format(0, 0, title.as_str(), &Format::new().set_bold())?;

    let months: Vec<u32> = report
        .monthly_statistics
        .iter()
        .map(|stat| stat.month)
        .collect();

    let mut headers: Vec<String> = STUDENT_HEADERS.iter().map(ToString::to_string).collect();
    for &month in &months {
        headers.push(format!("{} Att.", short_month(month)));
        headers.push(format!("{} WD", short_month(month)));
    }
    headers.extend(TOTAL_HEADERS.iter().map(ToString::to_string));
    write_headers(worksheet, 2, &headers)?;
    worksheet.set_freeze_panes(3, 4)?;

    for (index, student) in report.students.iter().enumerate() {
        let row = 3 + index as u32;
        worksheet.write(row, 0, student.serial_no)?;
        worksheet.write(row, 1, student.admission_no.as_str())?;
        if let Some(roll) = student.roll_number {
            worksheet.write(row, 2, roll)?;
        }
        worksheet.write(row, 3, student.name.as_str())?;
        if let Some(father) = &student.father_name {
            worksheet.write(row, 4, father.as_str())?;
        }

        let mut col = STUDENT_HEADERS.len() as u16;
        for month in &student.monthly_data {
            worksheet.write(row, col, month.present + month.late + month.half_day)?;
            worksheet.write(row, col + 1, month.working_days)?;
            col += 2;
        }

        worksheet.write(row, col, student.total_working_days)?;
        worksheet.write(
            row,
            col + 1,
            student.total_present + student.total_late + student.total_half_day,
        )?;
        worksheet.write(row, col + 2, student.total_absent)?;
        worksheet.write(row, col + 3, student.total_late)?;
        worksheet.write(row, col + 4, student.total_half_day)?;
        worksheet.write(row, col + 5, student.attendance_percentage)?;
        worksheet.write(row, col + 6, student.attendance_grade.as_str())?;
    }

    worksheet.set_column_width(3, 28)?;
    worksheet.set_column_width(4, 28)?;

    Ok(())
}

fn write_statistics(
    worksheet: &mut Worksheet,
    report: &YearlyAttendanceReport,
) -> Result<(), XlsxError> {
    worksheet.set_name("Monthly Statistics")?;

    let headers: Vec<String> = [
        "Month",
        "Working Days",
        "Students",
        "Attended",
        "Absent",
        "Class %",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    write_headers(worksheet, 0, &headers)?;

    for (index, stat) in report.monthly_statistics.iter().enumerate() {
        let row = 1 + index as u32;
        worksheet.write(row, 0, stat.month_name.as_str())?;
        worksheet.write(row, 1, stat.working_days)?;
        worksheet.write(row, 2, stat.students)?;
        worksheet.write(row, 3, stat.total_present)?;
        worksheet.write(row, 4, stat.total_absent)?;
        worksheet.write(row, 5, stat.class_percentage)?;
    }

    worksheet.set_column_width(0, 14)?;

    Ok(())
}

/// Renders the report as an `.xlsx` file in memory.
pub fn yearly_workbook(report: &YearlyAttendanceReport) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    write_summary(workbook.add_worksheet(), report)?;
    write_statistics(workbook.add_worksheet(), report)?;
    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_attendance::{ACADEMIC_MONTHS, MonthlyAggregate, YearlyAggregate, summarize_months};

    fn empty_report() -> YearlyAttendanceReport {
        let year = YearlyAggregate::from_months(
            ACADEMIC_MONTHS
                .iter()
                .map(|&m| MonthlyAggregate::empty(m))
                .collect(),
        );
        YearlyAttendanceReport {
            students: vec![],
            monthly_statistics: summarize_months(&[year]),
            session_name: "2024-2025".to_string(),
            session_year: "2024-2025".to_string(),
        }
    }

    #[test]
    fn test_short_month() {
        assert_eq!(short_month(4), "Apr");
        assert_eq!(short_month(13), "");
    }

    #[test]
    fn test_workbook_is_zip() {
        let bytes = yearly_workbook(&empty_report()).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }
}
