//! WebAssembly module for the Blend Vinos front end
//!
//! Provides client-side computation for:
//! - Token expiry checks
//! - Movement draft editing and validation
//! - Create-movement payload assembly
//! - Movement detail totals

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Whether the stored bearer token is expired at `now_ms` (JS epoch millis)
#[wasm_bindgen]
pub fn token_is_expired(token: &str, now_ms: f64) -> bool {
    match chrono::DateTime::from_timestamp_millis(now_ms as i64) {
        Some(now) => shared::token::is_expired(token, now),
        None => true,
    }
}

/// Whether a wine code is acceptable for the movement form
#[wasm_bindgen]
pub fn wine_code_is_valid(code: &str) -> bool {
    validate_wine_code(code).is_ok()
}

/// Normalize a comment field: blank becomes null, the rest is trimmed
#[wasm_bindgen]
pub fn normalize_comment_text(text: &str) -> Option<String> {
    normalize_comment(text)
}

/// Whether a raw quantity edit would be accepted ("" counts: it clears)
#[wasm_bindgen]
pub fn quantity_input_accepted(raw: &str) -> bool {
    Quantity::from_input(raw).is_some()
}

/// First problem with the new-user form, worded for the UI, or null
#[wasm_bindgen]
pub fn new_user_form_error(
    name: &str,
    email: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Option<String> {
    user_form_error(name, email, username, password, confirm_password).map(str::to_string)
}

fn parse_items(items_json: &str) -> Result<Vec<LineItem>, JsValue> {
    serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid items JSON: {}", e)))
}

fn items_to_json(items: &[LineItem]) -> Result<String, JsValue> {
    serde_json::to_string(items)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode items: {}", e)))
}

#[derive(Serialize)]
struct AddItemResult {
    outcome: &'static str,
    items: Vec<LineItem>,
}

/// Try to add `raw_code` to the item list.
///
/// Returns `{outcome: "added" | "duplicate" | "empty", items: [...]}` as a
/// JSON string; on "duplicate" and "empty" the list comes back unchanged.
#[wasm_bindgen]
pub fn add_line_item(items_json: &str, raw_code: &str) -> Result<String, JsValue> {
    let mut draft = MovementDraft::new(MovementType::Purchase);
    draft.items = parse_items(items_json)?;

    let outcome = match draft.add_item(raw_code) {
        AddOutcome::Added => "added",
        AddOutcome::Duplicate => "duplicate",
        AddOutcome::EmptyInput => "empty",
    };

    serde_json::to_string(&AddItemResult {
        outcome,
        items: draft.items,
    })
    .map_err(|e| JsValue::from_str(&format!("Failed to encode result: {}", e)))
}

/// Apply a raw quantity edit to the item at `index`; invalid edits leave
/// the list unchanged
#[wasm_bindgen]
pub fn update_line_quantity(items_json: &str, index: u32, raw: &str) -> Result<String, JsValue> {
    let mut draft = MovementDraft::new(MovementType::Purchase);
    draft.items = parse_items(items_json)?;
    draft.update_quantity(index as usize, raw);
    items_to_json(&draft.items)
}

/// Remove the item at `index`
#[wasm_bindgen]
pub fn remove_line_item(items_json: &str, index: u32) -> Result<String, JsValue> {
    let mut draft = MovementDraft::new(MovementType::Purchase);
    draft.items = parse_items(items_json)?;
    draft.remove_item(index as usize);
    items_to_json(&draft.items)
}

/// Whether the item list alone would pass the submit gate
#[wasm_bindgen]
pub fn draft_is_complete(items_json: &str) -> Result<bool, JsValue> {
    let mut draft = MovementDraft::new(MovementType::Purchase);
    draft.items = parse_items(items_json)?;
    Ok(draft.is_complete())
}

/// Flatten a draft into the create-movement payload.
///
/// `movement_type` is the wire spelling (COMPRA or VENTA); `parties_json`
/// is the loaded party list used to denormalize the client display name.
#[wasm_bindgen]
pub fn build_movement_payload(
    items_json: &str,
    movement_type: &str,
    comment: &str,
    client_id: Option<f64>,
    parties_json: &str,
) -> Result<String, JsValue> {
    let movement_type = MovementType::from_wire(movement_type)
        .ok_or_else(|| JsValue::from_str("movement type must be COMPRA or VENTA"))?;
    let parties: Vec<Party> = serde_json::from_str(parties_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid parties JSON: {}", e)))?;

    let draft = MovementDraft {
        movement_type,
        items: parse_items(items_json)?,
        client_id: client_id.map(|id| id as i64),
        comment: comment.to_string(),
    };

    let payload = draft
        .to_request(&parties)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&payload)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode payload: {}", e)))
}

/// Total of a stored movement's detail lines
#[wasm_bindgen]
pub fn movement_total(lines_json: &str) -> Result<f64, JsValue> {
    let lines: Vec<MovementLine> = serde_json::from_str(lines_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid lines JSON: {}", e)))?;

    let total = movement_lines_total(&lines);
    Ok(total.to_string().parse().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line_item_round_trip() {
        let result = add_line_item("[]", "MLB-01").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["outcome"], "added");
        assert_eq!(parsed["items"][0]["wineCode"], "MLB-01");
        assert_eq!(parsed["items"][0]["quantity"], 1);

        let items = parsed["items"].to_string();
        let again: serde_json::Value =
            serde_json::from_str(&add_line_item(&items, "mlb-01").unwrap()).unwrap();
        assert_eq!(again["outcome"], "duplicate");
        assert_eq!(again["items"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_quantity_input_accepted() {
        assert!(quantity_input_accepted(""));
        assert!(quantity_input_accepted("4"));
        assert!(!quantity_input_accepted("0"));
        assert!(!quantity_input_accepted("x"));
    }

    #[test]
    fn test_build_movement_payload() {
        let items = r#"[{"wineCode":"W1","quantity":2},{"wineCode":"W2","quantity":3}]"#;
        let payload = build_movement_payload(items, "VENTA", "  ", None, "[]").unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["wine_id"], serde_json::json!(["W1", "W2"]));
        assert_eq!(value["quantity"], serde_json::json!([2, 3]));
        assert_eq!(value["type"], "VENTA");
        assert!(value["comment"].is_null());
        assert!(value["client_id"].is_null());
        assert!(value["nombre_de_cliente"].is_null());
    }

    #[test]
    fn test_build_payload_rejects_incomplete() {
        let items = r#"[{"wineCode":"W1","quantity":""}]"#;
        assert!(build_movement_payload(items, "COMPRA", "", None, "[]").is_err());
    }

    #[test]
    fn test_movement_total() {
        let lines = r#"[
            {"id":1,"cantidad":2,"precio_unitario":"10.50"},
            {"id":2,"cantidad":3,"precio_unitario":"4.00"}
        ]"#;
        let total = movement_total(lines).unwrap();
        assert!((total - 33.0).abs() < 0.001);
    }
}
