use calamine::{Data, ExcelDateTime};
use chrono::{Duration, Timelike};

/// Display text of a cell as it is written to CSV.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => float_text(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn float_text(f: f64) -> String {
    if f == (f as i64) as f64 && f.abs() < 1e10 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

// ISO date, with a time part only when it is not midnight. Durations keep their serial.
fn datetime_text(dt: &ExcelDateTime) -> String {
    if !dt.is_datetime() {
        return float_text(dt.as_f64());
    }

    // Round to whole seconds before dropping the fraction
    let datetime = dt
        .as_datetime()
        .and_then(|datetime| datetime.checked_add_signed(Duration::milliseconds(500)))
        .and_then(|datetime| datetime.with_nanosecond(0));

    match datetime {
        Some(datetime) if datetime.num_seconds_from_midnight() == 0 => {
            datetime.format("%Y-%m-%d").to_string()
        }
        Some(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => float_text(dt.as_f64()),
    }
}
