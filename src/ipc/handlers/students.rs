use crate::ipc::error::{ok, respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({ "students": state.book.roster().students() }),
    )
}

fn students_add(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_str(params, "name")?;
    // Blank or duplicate names are a no-op, reported via `added`.
    let added = state.book.add_student(&name);
    Ok(json!({
        "added": added,
        "students": state.book.roster().students(),
    }))
}

fn students_remove(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_str(params, "name")?;
    let removed = state.book.remove_student(&name);
    Ok(json!({
        "removed": removed,
        "students": state.book.roster().students(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.add" => Some(respond(&req.id, students_add(state, &req.params))),
        "students.remove" => Some(respond(&req.id, students_remove(state, &req.params))),
        _ => None,
    }
}
