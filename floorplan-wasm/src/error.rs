use crate::interop::{new_obj, set_kv};
use floorplan::EditorError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Maps a kernel error onto `{ok:false, error:{code, message, data}}`.
pub fn from_editor(e: EditorError) -> JsValue {
    let d = new_obj();
    match &e {
        EditorError::NotFound { kind, id } => {
            set_kv(&d, "kind", &JsValue::from_str(kind));
            set_kv(&d, "id", &JsValue::from_str(id));
        }
        EditorError::InvalidArgument { param, .. } => set_kv(&d, "param", &JsValue::from_str(param)),
        EditorError::InvalidConfig { field, .. } => set_kv(&d, "field", &JsValue::from_str(field)),
        EditorError::Json(_) | EditorError::InvalidDocument { .. } => {}
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn result(r: Result<(), EditorError>) -> JsValue {
    match r {
        Ok(()) => ok(JsValue::TRUE),
        Err(e) => from_editor(e),
    }
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_str(id));
    err("invalid_id", format!("'{}' is not a valid {} id", id, kind), Some(d.into()))
}

#[inline]
pub fn invalid_value(param: &str, got: &str, expected: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "got", &JsValue::from_str(got));
    err("invalid_value", format!("parameter '{}' must be one of {}", param, expected), Some(d.into()))
}
