use crate::ipc::error::{ok, respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_courses_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "courses": state.book.roster().courses() }))
}

fn courses_add(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_str(params, "name")?;
    let added = state.book.add_course(&name);
    Ok(json!({
        "added": added,
        "courses": state.book.roster().courses(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "courses.list" => Some(handle_courses_list(state, req)),
        "courses.add" => Some(respond(&req.id, courses_add(state, &req.params))),
        _ => None,
    }
}
