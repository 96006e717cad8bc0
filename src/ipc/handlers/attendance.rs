use crate::attendance::{Mark, NOT_MARKED};
use crate::classbook::Classbook;
use crate::dates::DateKey;
use crate::ipc::error::{ok, respond, HandlerErr};
use crate::ipc::helpers::{date_json, get_optional_str, get_required_str, get_string_map};
use crate::ipc::types::{AppState, Request};
use crate::stats;
use serde_json::json;

/// Roster-ordered rows for one date plus that date's totals.
fn day_json(book: &Classbook, date: DateKey) -> serde_json::Value {
    let bucket = book.attendance().bucket(&date);
    let rows: Vec<serde_json::Value> = book
        .roster()
        .students()
        .iter()
        .map(|name| {
            let status = bucket
                .and_then(|b| b.get(name))
                .map(Mark::label)
                .unwrap_or(NOT_MARKED);
            json!({ "name": name, "status": status })
        })
        .collect();
    let daily = stats::daily_stats(book.attendance(), &date);

    let mut out = date_json(&date);
    out["recorded"] = json!(bucket.is_some());
    out["rows"] = json!(rows);
    out["presentCount"] = json!(daily.present_count);
    out["absentCount"] = json!(daily.absent_count);
    out
}

fn attendance_mark(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date_input = get_optional_str(params, "date")?;
    let statuses = get_string_map(params, "statuses")?;
    let (date, _) = state.book.mark_attendance(date_input, &statuses)?;
    Ok(day_json(&state.book, date))
}

fn attendance_day(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = state.book.resolve_date(get_optional_str(params, "date")?)?;
    Ok(day_json(&state.book, date))
}

fn handle_attendance_dates(state: &mut AppState, req: &Request) -> serde_json::Value {
    let dates: Vec<serde_json::Value> = state
        .book
        .attendance()
        .dates_descending()
        .iter()
        .map(date_json)
        .collect();
    ok(&req.id, json!({ "dates": dates }))
}

fn attendance_student(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_str(params, "name")?;
    let store = state.book.attendance();

    let records: Vec<serde_json::Value> = store
        .student_history(&name)
        .map(|entry| {
            let mut row = date_json(&entry.date);
            row["status"] = json!(entry.status());
            row
        })
        .collect();
    let summary = stats::student_summary(store, &name);

    Ok(json!({
        "name": name,
        "onRoster": state.book.roster().has_student(&name),
        "records": records,
        "totalDays": summary.total_days,
        "presentCount": summary.present_count,
        "absentCount": summary.absent_count,
        "percentage": summary.percentage,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.mark" => Some(respond(&req.id, attendance_mark(state, &req.params))),
        "attendance.day" => Some(respond(&req.id, attendance_day(state, &req.params))),
        "attendance.dates" => Some(handle_attendance_dates(state, req)),
        "attendance.student" => Some(respond(&req.id, attendance_student(state, &req.params))),
        _ => None,
    }
}
