// src/output.rs
use chrono::Local;
use std::fs::File;
use std::io::{self, Write};

/// Timestamp for run reports
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Two-column summary table
pub fn render_report(title: &str, rows: &[(String, String)]) -> String {
    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len().max(key_width + 2)));
    out.push('\n');
    for (key, value) in rows {
        out.push_str(&format!("{:<width$}  {}\n", key, value, width = key_width));
    }
    out
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(String, String)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report_alignment() {
        let rows = vec![
            ("Domain".to_string(), "OpenBall ([0.0], 1.0)".to_string()),
            ("Estimate".to_string(), "1.0042".to_string()),
        ];
        let report = render_report("ExitTimeEstimator", &rows);
        assert!(report.contains("ExitTimeEstimator"));
        assert!(report.contains("Domain    OpenBall"));
        assert!(report.contains("Estimate  1.0042"));
    }
}
