//! Wine catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A wine as returned by the collaborator API.
///
/// The barcode field has shipped under several spellings; aliases cover the
/// ones observed in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Wine {
    pub id: Option<i64>,
    #[serde(
        rename = "codigoDeBarras",
        alias = "codigodebarras",
        alias = "codigo_barras"
    )]
    pub codigo_de_barras: Option<i64>,
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    pub cepa: Option<String>,
    pub anejamiento: Option<String>,
    pub bodega: Option<String>,
    pub distribuidor: Option<String>,
    pub estilo: Option<String>,
    pub total: Option<i64>,
    pub costo: Option<Decimal>,
}

/// Payload for creating or updating a wine. Unset fields are omitted from
/// the body entirely rather than sent as nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WinePayload {
    #[serde(rename = "codigoDeBarras", skip_serializing_if = "Option::is_none")]
    pub codigo_de_barras: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cepa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anejamiento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bodega: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribuidor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estilo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(rename = "stockReal", skip_serializing_if = "Option::is_none")]
    pub stock_real: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costo: Option<Decimal>,
}

/// Normalize the wine-listing response. The collaborator has been observed
/// returning a bare array, `{data: [...]}` and `{items: [...]}`.
pub fn wines_from_value(value: Value) -> Vec<Wine> {
    super::list_from_value(value, &["data", "items"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_barcode_aliases() {
        for key in ["codigoDeBarras", "codigodebarras", "codigo_barras"] {
            let raw = format!(r#"{{"{}": 779123, "codigo": "MLB-01"}}"#, key);
            let wine: Wine = serde_json::from_str(&raw).unwrap();
            assert_eq!(wine.codigo_de_barras, Some(779123), "alias {key}");
        }
    }

    #[test]
    fn test_payload_omits_unset_fields() {
        let payload = WinePayload {
            codigo: Some("MLB-01".to_string()),
            nombre: Some("Malbec Reserva".to_string()),
            total: Some(12),
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({"codigo": "MLB-01", "nombre": "Malbec Reserva", "total": 12})
        );
    }

    #[test]
    fn test_wines_from_value_shapes() {
        let plain = wines_from_value(json!([{"id": 1, "codigo": "A"}]));
        assert_eq!(plain.len(), 1);

        let wrapped = wines_from_value(json!({"data": [{"id": 2}]}));
        assert_eq!(wrapped[0].id, Some(2));

        let items = wines_from_value(json!({"items": [{"id": 3}]}));
        assert_eq!(items[0].id, Some(3));

        assert!(wines_from_value(json!({"rows": []})).is_empty());
    }
}
