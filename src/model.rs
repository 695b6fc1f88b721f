//! Records exchanged with the lookup service

use crate::error::{LookupError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A validated search request: trimmed, non-empty term plus result limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    limit: u32,
}

impl SearchQuery {
    pub fn new(raw_term: &str, limit: u32) -> Result<Self> {
        let term = raw_term.trim();
        if term.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        Ok(Self {
            term: term.to_string(),
            limit: limit.max(1),
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Ordered operators from one search plus the count the service reported
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResultSet {
    pub operators: Vec<OperatorSummary>,
    pub total: u64,
}

impl SearchResultSet {
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

/// Wire shape of `GET /operadoras/busca`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchPayload {
    #[serde(default)]
    resultados: Option<Vec<OperatorSummary>>,
    #[serde(default, deserialize_with = "lenient_count")]
    total: Option<u64>,
}

impl From<SearchPayload> for SearchResultSet {
    fn from(payload: SearchPayload) -> Self {
        Self {
            operators: payload.resultados.unwrap_or_default(),
            total: payload.total.unwrap_or(0),
        }
    }
}

/// Error body the service sends alongside non-2xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    pub erro: Option<String>,
}

/// One operator as returned by the registry.
///
/// Every field is optional: the service builds records from a CSV export and
/// columns may be missing, null, or numeric. Fields this client does not know
/// about are kept in `extra` so nothing is lost when re-serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorSummary {
    #[serde(rename = "registro_ans", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(rename = "cnpj", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(rename = "razao_social", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub corporate_name: Option<String>,
    #[serde(rename = "nome_fantasia", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub trade_name: Option<String>,
    #[serde(rename = "modalidade", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(rename = "logradouro", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(rename = "numero", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "complemento", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(rename = "bairro", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(rename = "cidade", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "uf", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "cep", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "ddd", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
    #[serde(rename = "telefone", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "fax", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(rename = "email", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "representante", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub representative: Option<String>,
    #[serde(rename = "cargo_representante", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub representative_role: Option<String>,
    #[serde(rename = "data_registro", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub registered_on: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl OperatorSummary {
    /// Trade name when present, corporate name otherwise
    pub fn display_name(&self) -> &str {
        non_empty(&self.trade_name)
            .or_else(|| non_empty(&self.corporate_name))
            .unwrap_or("-")
    }
}

/// Borrow an optional field only when it holds something other than blanks
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Accept strings, numbers, and nulls for text fields.
///
/// Numeric columns such as CNPJ or phone may come back as JSON numbers,
/// sometimes as floats with a zero fraction.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(u), _, _) => u.to_string(),
            (None, Some(i), _) => i.to_string(),
            (None, None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e17 => {
                format!("{:.0}", f)
            }
            _ => n.to_string(),
        }),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Truthiness the way the service's JSON is read elsewhere: null, false, 0
/// and "" are false, anything else is true
fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    })
}

/// Counts sent as integers, whole floats (`2.0`) or numeric strings
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Wire shape of `GET /status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "versao", default)]
    pub version: Option<String>,
    #[serde(rename = "data_hora", default)]
    pub timestamp: Option<String>,
    /// Missing means the data is not loaded
    #[serde(rename = "dados_carregados", default, deserialize_with = "lenient_flag")]
    pub data_loaded: bool,
    #[serde(rename = "total_operadoras", default, deserialize_with = "lenient_count")]
    pub operator_count: Option<u64>,
}

impl ServiceStatus {
    /// Server timestamp parsed from its `YYYY-MM-DD HH:MM:SS` form
    pub fn parsed_timestamp(&self) -> Option<chrono::NaiveDateTime> {
        let raw = self.timestamp.as_deref()?;
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
    }
}

/// One entry of `GET /operadoras/modalidades`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modality {
    #[serde(rename = "nome", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "quantidade", default)]
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModalityPayload {
    #[serde(default)]
    pub modalidades: Option<Vec<Modality>>,
}
