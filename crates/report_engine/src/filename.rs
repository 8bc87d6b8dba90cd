use chrono::NaiveDate;

const REPORT_PREFIX: &str = "users-report";

/// `users-report-YYYY-MM-DD.pdf`; sorts chronologically by name.
pub fn report_filename(date: NaiveDate) -> String {
    format!("{REPORT_PREFIX}-{}.pdf", date.format("%Y-%m-%d"))
}
