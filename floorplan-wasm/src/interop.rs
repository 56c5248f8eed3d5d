use floorplan::{FlipAxis, OpeningId, OpeningKind, RoomId, WallId};
use js_sys::{Float64Array, Object, Reflect};
use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object {
    Object::new()
}
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice);
    arr
}

/// Plain objects and `null` rather than `Map`s and `undefined`.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    let ser = serde_wasm_bindgen::Serializer::json_compatible();
    v.serialize(&ser).unwrap_or(JsValue::NULL)
}

pub fn wall_id(s: &str) -> Option<WallId> {
    Uuid::parse_str(s).ok().map(WallId)
}
pub fn room_id(s: &str) -> Option<RoomId> {
    Uuid::parse_str(s).ok().map(RoomId)
}
pub fn opening_id(s: &str) -> Option<OpeningId> {
    Uuid::parse_str(s).ok().map(OpeningId)
}

pub fn opening_kind(s: &str) -> Option<OpeningKind> {
    match s {
        "door" => Some(OpeningKind::Door),
        "window" => Some(OpeningKind::Window),
        _ => None,
    }
}

pub fn flip_axis(s: &str) -> Option<FlipAxis> {
    match s {
        "x" => Some(FlipAxis::X),
        "y" => Some(FlipAxis::Y),
        _ => None,
    }
}
