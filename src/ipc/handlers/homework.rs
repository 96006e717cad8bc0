use crate::homework::{HomeworkEntry, HomeworkSubmission};
use crate::ipc::error::{ok, respond, HandlerErr};
use crate::ipc::helpers::{date_json, get_optional_str, get_required_str, get_string_map};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn entry_json(entry: &HomeworkEntry) -> serde_json::Value {
    json!({
        "description": entry.description,
        "marks": entry.marks,
        "progress": entry.progress,
    })
}

fn required_course(params: &serde_json::Value) -> Result<String, HandlerErr> {
    let course = get_required_str(params, "course")?;
    let course = course.trim();
    if course.is_empty() {
        return Err(HandlerErr::bad_params("course must not be empty"));
    }
    Ok(course.to_string())
}

fn homework_record(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let course = required_course(params)?;
    let submission = HomeworkSubmission {
        description: get_optional_str(params, "description")?
            .unwrap_or("")
            .to_string(),
        marks: get_string_map(params, "marks")?,
        progress: get_string_map(params, "progress")?,
    };
    let date_input = get_optional_str(params, "date")?;
    let (date, entry) = state.book.record_homework(date_input, &course, &submission)?;

    let mut out = date_json(&date);
    out["course"] = json!(course);
    out["entry"] = entry_json(entry);
    Ok(out)
}

fn homework_get(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let course = required_course(params)?;
    let date = state.book.resolve_date(get_optional_str(params, "date")?)?;
    let entry = state
        .book
        .homework()
        .entry(&date, &course)
        .map(entry_json)
        .unwrap_or(serde_json::Value::Null);

    let mut out = date_json(&date);
    out["course"] = json!(course);
    out["entry"] = entry;
    Ok(out)
}

fn handle_homework_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let days: Vec<serde_json::Value> = state
        .book
        .homework()
        .days_descending()
        .map(|(date, courses)| {
            let courses: serde_json::Map<String, serde_json::Value> = courses
                .iter()
                .map(|(course, entry)| (course.clone(), entry_json(entry)))
                .collect();
            let mut day = date_json(date);
            day["courses"] = serde_json::Value::Object(courses);
            day
        })
        .collect();
    ok(
        &req.id,
        json!({
            "students": state.book.roster().students(),
            "courses": state.book.roster().courses(),
            "days": days,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "homework.record" => Some(respond(&req.id, homework_record(state, &req.params))),
        "homework.get" => Some(respond(&req.id, homework_get(state, &req.params))),
        "homework.list" => Some(handle_homework_list(state, req)),
        _ => None,
    }
}
