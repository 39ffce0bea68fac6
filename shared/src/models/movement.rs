//! Movement draft and wire models
//!
//! A movement records a purchase or sale of wine stock. The draft is the
//! client-side, unsaved movement being composed before submission; it lives
//! for one form session and is never persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::models::Party;
use crate::validation::normalize_comment;

/// Movement types as the collaborator API spells them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementType {
    #[default]
    #[serde(rename = "COMPRA")]
    Purchase,
    #[serde(rename = "VENTA")]
    Sale,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Purchase => "COMPRA",
            MovementType::Sale => "VENTA",
        }
    }

    /// Parse the wire spelling
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "COMPRA" => Some(MovementType::Purchase),
            "VENTA" => Some(MovementType::Sale),
            _ => None,
        }
    }
}

/// Quantity of a line item.
///
/// `Empty` models a cleared input field awaiting a new value; it keeps the
/// item in the list but blocks submission until a positive count is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Empty,
    Count(u32),
}

impl Quantity {
    /// Interpret a raw field edit. The empty string clears the field;
    /// anything that is not a positive integer is rejected.
    pub fn from_input(raw: &str) -> Option<Quantity> {
        if raw.is_empty() {
            return Some(Quantity::Empty);
        }
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => Some(Quantity::Count(n)),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Quantity::Count(n) if *n > 0)
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            Quantity::Count(n) => Some(*n),
            Quantity::Empty => None,
        }
    }
}

// On the wire the cleared state is the empty string, mirroring the form
// field it shadows.
impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Empty => serializer.serialize_str(""),
            Quantity::Count(n) => serializer.serialize_u32(*n),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Count(u32),
    Text(String),
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match QuantityRepr::deserialize(deserializer)? {
            QuantityRepr::Count(n) => Ok(Quantity::Count(n)),
            QuantityRepr::Text(text) => Quantity::from_input(&text).ok_or_else(|| {
                serde::de::Error::custom("quantity must be empty or a positive integer")
            }),
        }
    }
}

/// One wine-code/quantity pair within a movement draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub wine_code: String,
    pub quantity: Quantity,
}

/// Result of trying to add a line item to a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new item was appended with quantity 1
    Added,
    /// The code is already present (case-insensitive); the list is untouched
    Duplicate,
    /// The trimmed code was empty; nothing happened
    EmptyInput,
}

/// Rejection raised when flattening a draft that is not ready
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("draft has no items or an unset quantity")]
    Incomplete,
}

/// The in-progress movement being composed before submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDraft {
    pub movement_type: MovementType,
    pub items: Vec<LineItem>,
    pub client_id: Option<i64>,
    pub comment: String,
}

impl MovementDraft {
    /// A fresh draft seeded with the type handed over by the calling screen
    pub fn new(movement_type: MovementType) -> Self {
        Self {
            movement_type,
            items: Vec::new(),
            client_id: None,
            comment: String::new(),
        }
    }

    /// Add a line item for `raw_code`.
    ///
    /// Codes are compared case-insensitively against the items already in
    /// the list; a repeated code is rejected rather than bumping the
    /// existing quantity.
    pub fn add_item(&mut self, raw_code: &str) -> AddOutcome {
        let code = raw_code.trim();
        if code.is_empty() {
            return AddOutcome::EmptyInput;
        }

        let needle = code.to_lowercase();
        if self
            .items
            .iter()
            .any(|item| item.wine_code.to_lowercase() == needle)
        {
            return AddOutcome::Duplicate;
        }

        self.items.push(LineItem {
            wine_code: code.to_string(),
            quantity: Quantity::Count(1),
        });
        AddOutcome::Added
    }

    /// Replace the quantity at `index`.
    ///
    /// The empty string clears the field to the transient empty state;
    /// values that do not parse as a positive integer are dropped without
    /// touching the list. Out-of-range indices are ignored.
    pub fn update_quantity(&mut self, index: usize, raw: &str) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if let Some(quantity) = Quantity::from_input(raw) {
            item.quantity = quantity;
        }
    }

    /// Remove the entry at `index`; no confirmation is involved
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// At least one item and every quantity set to a positive count
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.quantity.is_valid())
    }

    /// Flatten the draft into the wire payload.
    ///
    /// The selected client is resolved against `parties` to denormalize a
    /// display name next to the id; an id with no matching party still goes
    /// out, just without a name.
    pub fn to_request(&self, parties: &[Party]) -> Result<CreateMovementRequest, DraftError> {
        if !self.is_complete() {
            return Err(DraftError::Incomplete);
        }

        let client = self
            .client_id
            .and_then(|id| parties.iter().find(|party| party.id == id));

        Ok(CreateMovementRequest {
            wine_id: self.items.iter().map(|item| item.wine_code.clone()).collect(),
            quantity: self
                .items
                .iter()
                .map(|item| item.quantity.count().unwrap_or(0))
                .collect(),
            movement_type: self.movement_type,
            comment: normalize_comment(&self.comment),
            client_id: self.client_id,
            nombre_de_cliente: client.and_then(|c| c.display_name()).map(str::to_string),
        })
    }

    /// Back to the initial state. The movement type survives the reset, the
    /// rest of the form does not.
    pub fn reset(&mut self) {
        self.items.clear();
        self.client_id = None;
        self.comment.clear();
    }
}

/// Body of the create-movement call: parallel arrays in list order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMovementRequest {
    pub wine_id: Vec<String>,
    pub quantity: Vec<u32>,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub comment: Option<String>,
    pub client_id: Option<i64>,
    pub nombre_de_cliente: Option<String>,
}

/// A row in the monthly movement history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MovementRecord {
    pub id: i64,
    pub accion: Option<MovementType>,
    pub fecha: Option<DateTime<Utc>>,
    pub vino_id: Option<i64>,
    pub vino_nombre: Option<String>,
    pub cantidad: Option<i64>,
    pub cliente_id: Option<i64>,
    pub comentario: Option<String>,
}

/// Header block of a stored movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MovementHeader {
    pub accion: Option<MovementType>,
    pub fecha: Option<DateTime<Utc>>,
    pub nombre_de_cliente: Option<String>,
    pub comentario: Option<String>,
}

/// One detail line of a stored movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MovementLine {
    pub id: i64,
    pub cantidad: Option<i64>,
    pub precio_unitario: Option<Decimal>,
    pub vino_codigo: Option<String>,
    pub vino_nombre: Option<String>,
}

impl MovementLine {
    /// Line total: quantity times unit price, missing values counting as zero
    pub fn importe(&self) -> Decimal {
        Decimal::from(self.cantidad.unwrap_or(0)) * self.precio_unitario.unwrap_or(Decimal::ZERO)
    }
}

/// Sum of line totals for a stored movement
pub fn movement_lines_total(lines: &[MovementLine]) -> Decimal {
    lines.iter().map(MovementLine::importe).sum()
}

/// Full detail view of a stored movement. The collaborator has been observed
/// sending `detalles` as an array, a single object, or nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MovementDetails {
    pub historial: Option<MovementHeader>,
    #[serde(deserialize_with = "lines_one_or_many")]
    pub detalles: Vec<MovementLine>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lines {
    Many(Vec<MovementLine>),
    One(Box<MovementLine>),
}

fn lines_one_or_many<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<MovementLine>, D::Error> {
    Ok(match Option::<Lines>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Lines::Many(lines)) => lines,
        Some(Lines::One(line)) => vec![*line],
    })
}

/// One row of the top-sold ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TopSoldEntry {
    pub vino_nombre: Option<String>,
    pub botellas_vendidas: Option<i64>,
    pub cantidad_ventas: Option<i64>,
    pub total_dinero: Option<Decimal>,
}

/// Normalize the by-month listing response (bare array or `{items: [...]}`)
pub fn movements_from_value(value: Value) -> Vec<MovementRecord> {
    super::list_from_value(value, &["items"])
}
