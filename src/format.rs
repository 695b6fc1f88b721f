//! Display formatting for Brazilian registry identifiers
//!
//! All helpers are total: input that does not have the expected shape is
//! returned as-is, and missing input renders as a dash.

use crate::messages::FieldLabels;
use crate::model::OperatorSummary;
use regex::Regex;
use std::sync::LazyLock;

/// Rendered in place of a missing value
pub const PLACEHOLDER: &str = "-";

// ASCII digits only; digits from other scripts pass through unformatted
static TAX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})([0-9]{3})([0-9]{3})([0-9]{4})([0-9]{2})$").unwrap());

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{5})([0-9]{3})$").unwrap());

/// Format a 14-digit CNPJ as `XX.XXX.XXX/XXXX-XX`
pub fn format_tax_id(tax_id: Option<&str>) -> String {
    match tax_id {
        None | Some("") => PLACEHOLDER.to_string(),
        Some(raw) => TAX_ID.replace(raw, "$1.$2.$3/$4-$5").into_owned(),
    }
}

/// Format an 8-digit CEP as `XXXXX-XXX`
pub fn format_postal_code(postal_code: Option<&str>) -> String {
    match postal_code {
        None | Some("") => PLACEHOLDER.to_string(),
        Some(raw) => POSTAL_CODE.replace(raw, "$1-$2").into_owned(),
    }
}

/// Split 8- and 9-character phone numbers with a hyphen
pub fn format_phone(phone: Option<&str>) -> String {
    let raw = match phone {
        None | Some("") => return PLACEHOLDER.to_string(),
        Some(raw) => raw,
    };

    let split_at = match raw.chars().count() {
        8 => 4,
        9 => 5,
        _ => return raw.to_string(),
    };

    // Length is counted in chars, so split on a char boundary
    let byte_idx = raw
        .char_indices()
        .nth(split_at)
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    format!("{}-{}", &raw[..byte_idx], &raw[byte_idx..])
}

/// Phone with its area code, e.g. `(11) 3187-8000`
pub fn format_phone_with_area(area_code: Option<&str>, phone: Option<&str>) -> String {
    let number = format_phone(phone);
    match area_code.map(str::trim).filter(|s| !s.is_empty()) {
        Some(ddd) if number != PLACEHOLDER => format!("({}) {}", ddd, number),
        _ => number,
    }
}

/// Single-line address: street, number, complement, district, city/UF
pub fn format_address(
    street: Option<&str>,
    number: Option<&str>,
    complement: Option<&str>,
    district: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
) -> String {
    fn clean(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }

    let mut parts: Vec<String> = Vec::new();
    match (clean(street), clean(number)) {
        (Some(s), Some(n)) => parts.push(format!("{}, {}", s, n)),
        (Some(s), None) => parts.push(s.to_string()),
        (None, Some(n)) => parts.push(n.to_string()),
        (None, None) => {}
    }
    parts.extend(clean(complement).map(str::to_string));
    parts.extend(clean(district).map(str::to_string));
    match (clean(city), clean(state)) {
        (Some(c), Some(uf)) => parts.push(format!("{}/{}", c, uf)),
        (Some(c), None) => parts.push(c.to_string()),
        (None, Some(uf)) => parts.push(uf.to_string()),
        (None, None) => {}
    }

    if parts.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        parts.join(" - ")
    }
}

/// Field value or the placeholder
pub fn or_placeholder(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(PLACEHOLDER)
}

/// Labelled, formatted fields of one operator, in display order
pub fn operator_fields(
    operator: &OperatorSummary,
    labels: &FieldLabels,
) -> Vec<(&'static str, String)> {
    let raw = |field: &Option<String>| or_placeholder(field.as_deref()).to_string();
    let mut representative = raw(&operator.representative);
    if let Some(role) = operator
        .representative_role
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        if representative != PLACEHOLDER {
            representative = format!("{} ({})", representative, role);
        }
    }

    vec![
        (labels.registration, raw(&operator.registration)),
        (labels.tax_id, format_tax_id(operator.tax_id.as_deref())),
        (labels.corporate_name, raw(&operator.corporate_name)),
        (labels.trade_name, raw(&operator.trade_name)),
        (labels.modality, raw(&operator.modality)),
        (
            labels.address,
            format_address(
                operator.street.as_deref(),
                operator.number.as_deref(),
                operator.complement.as_deref(),
                operator.district.as_deref(),
                operator.city.as_deref(),
                operator.state.as_deref(),
            ),
        ),
        (labels.postal_code, format_postal_code(operator.postal_code.as_deref())),
        (
            labels.phone,
            format_phone_with_area(operator.area_code.as_deref(), operator.phone.as_deref()),
        ),
        (
            labels.fax,
            format_phone_with_area(operator.area_code.as_deref(), operator.fax.as_deref()),
        ),
        (labels.email, raw(&operator.email)),
        (labels.representative, representative),
        (labels.registered_on, raw(&operator.registered_on)),
    ]
}

/// `City/UF` cell for result rows
pub fn city_state(operator: &OperatorSummary) -> String {
    fn clean(s: &Option<String>) -> Option<&str> {
        s.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    match (clean(&operator.city), clean(&operator.state)) {
        (Some(c), Some(uf)) => format!("{}/{}", c, uf),
        (Some(c), None) => c.to_string(),
        (None, Some(uf)) => uf.to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;

    #[test]
    fn test_tax_id() {
        assert_eq!(format_tax_id(Some("12345678000199")), "12.345.678/0001-99");
        assert_eq!(format_tax_id(Some("29309127000179")), "29.309.127/0001-79");
        assert_eq!(format_tax_id(Some("")), "-");
        assert_eq!(format_tax_id(None), "-");
        // Wrong length passes through untouched
        assert_eq!(format_tax_id(Some("123")), "123");
        assert_eq!(format_tax_id(Some("2904065000137")), "2904065000137");
        assert_eq!(format_tax_id(Some("12.345.678/0001-99")), "12.345.678/0001-99");
        // Arabic-Indic digits are not ASCII digits
        assert_eq!(format_tax_id(Some("١٢٣٤٥٦٧٨٠٠٠١٩٩")), "١٢٣٤٥٦٧٨٠٠٠١٩٩");
    }

    #[test]
    fn test_postal_code() {
        assert_eq!(format_postal_code(Some("12345678")), "12345-678");
        assert_eq!(format_postal_code(Some("04711904")), "04711-904");
        assert_eq!(format_postal_code(None), "-");
        assert_eq!(format_postal_code(Some("")), "-");
        assert_eq!(format_postal_code(Some("4711904")), "4711904");
        assert_eq!(format_postal_code(Some("1234567a")), "1234567a");
        assert_eq!(format_postal_code(Some("１２３４５６７８")), "１２３４５６７８");
    }

    #[test]
    fn test_phone() {
        assert_eq!(format_phone(Some("12345678")), "1234-5678");
        assert_eq!(format_phone(Some("123456789")), "12345-6789");
        assert_eq!(format_phone(Some("1234567890")), "1234567890");
        assert_eq!(format_phone(Some("123")), "123");
        assert_eq!(format_phone(Some("")), "-");
        assert_eq!(format_phone(None), "-");
    }

    #[test]
    fn test_phone_with_area() {
        assert_eq!(
            format_phone_with_area(Some("11"), Some("31878000")),
            "(11) 3187-8000"
        );
        assert_eq!(format_phone_with_area(None, Some("31878000")), "3187-8000");
        assert_eq!(format_phone_with_area(Some("11"), None), "-");
    }

    #[test]
    fn test_address() {
        assert_eq!(
            format_address(
                Some("RUA OTTO BOEHM"),
                Some("478"),
                Some(""),
                Some("CENTRO"),
                Some("JOINVILLE"),
                Some("SC"),
            ),
            "RUA OTTO BOEHM, 478 - CENTRO - JOINVILLE/SC"
        );
        assert_eq!(format_address(None, None, None, None, None, None), "-");
        assert_eq!(
            format_address(None, None, Some("ANDAR 10"), None, Some("SÃO PAULO"), None),
            "ANDAR 10 - SÃO PAULO"
        );
    }

    #[test]
    fn test_operator_fields() {
        let operator = OperatorSummary {
            registration: Some("335100".to_string()),
            tax_id: Some("29309127000179".to_string()),
            corporate_name: Some("AMIL ASSISTÊNCIA MÉDICA INTERNACIONAL S.A.".to_string()),
            city: Some("SÃO PAULO".to_string()),
            state: Some("SP".to_string()),
            postal_code: Some("04711904".to_string()),
            area_code: Some("11".to_string()),
            phone: Some("31878000".to_string()),
            representative: Some("ROBERTO MALTMAN".to_string()),
            representative_role: Some("Diretor".to_string()),
            ..Default::default()
        };
        let fields = operator_fields(&operator, &Locale::En.messages().labels);
        let get = |label: &str| {
            fields
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(fields.len(), 12);
        assert_eq!(get("CNPJ"), "29.309.127/0001-79");
        assert_eq!(get("Postal code"), "04711-904");
        assert_eq!(get("Phone"), "(11) 3187-8000");
        assert_eq!(get("Fax"), "-");
        assert_eq!(get("Trade name"), "-");
        assert_eq!(get("Address"), "SÃO PAULO/SP");
        assert_eq!(get("Representative"), "ROBERTO MALTMAN (Diretor)");
        assert_eq!(city_state(&operator), "SÃO PAULO/SP");
        assert_eq!(city_state(&OperatorSummary::default()), "-");
    }
}
