//! User-facing strings
//!
//! The registry is Brazilian, so every message ships in English and
//! Brazilian Portuguese.

use std::fmt;
use std::str::FromStr;

/// Language used for inline notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::PtBr => write!(f, "pt-br"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "pt" | "pt-br" => Ok(Locale::PtBr),
            other => Err(format!("unsupported language '{}' (expected en or pt-br)", other)),
        }
    }
}

/// Message catalog for one locale
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub empty_query: &'static str,
    pub search_failed: &'static str,
    pub service_unreachable: &'static str,
    pub data_not_loaded: &'static str,
    pub no_results: &'static str,
    pub searching: &'static str,
    pub details_title: &'static str,
    pub columns: [&'static str; 6],
    pub labels: FieldLabels,
}

/// Captions for the detail view
#[derive(Debug, Clone, Copy)]
pub struct FieldLabels {
    pub registration: &'static str,
    pub tax_id: &'static str,
    pub corporate_name: &'static str,
    pub trade_name: &'static str,
    pub modality: &'static str,
    pub address: &'static str,
    pub postal_code: &'static str,
    pub phone: &'static str,
    pub fax: &'static str,
    pub email: &'static str,
    pub representative: &'static str,
    pub registered_on: &'static str,
}

static EN: Messages = Messages {
    empty_query: "Please enter a search term",
    search_failed: "An error occurred while searching for operators. Please try again.",
    service_unreachable:
        "Could not connect to the API server. Check that the server is running.",
    data_not_loaded: "API is online, but operator data is not loaded.",
    no_results: "No operators found for this term.",
    searching: "Searching...",
    details_title: "Operator details",
    columns: ["ANS reg.", "CNPJ", "Corporate name", "Trade name", "Modality", "City/UF"],
    labels: FieldLabels {
        registration: "ANS registration",
        tax_id: "CNPJ",
        corporate_name: "Corporate name",
        trade_name: "Trade name",
        modality: "Modality",
        address: "Address",
        postal_code: "Postal code",
        phone: "Phone",
        fax: "Fax",
        email: "Email",
        representative: "Representative",
        registered_on: "Registered on",
    },
};

static PT_BR: Messages = Messages {
    empty_query: "Por favor, digite um termo para busca.",
    search_failed: "Ocorreu um erro ao buscar as operadoras. Por favor, tente novamente.",
    service_unreachable:
        "Não foi possível conectar ao servidor da API. Verifique se o servidor está em execução.",
    data_not_loaded: "API está online, mas os dados não estão carregados.",
    no_results: "Nenhuma operadora encontrada para este termo.",
    searching: "Buscando...",
    details_title: "Detalhes da operadora",
    columns: ["Registro ANS", "CNPJ", "Razão social", "Nome fantasia", "Modalidade", "Cidade/UF"],
    labels: FieldLabels {
        registration: "Registro ANS",
        tax_id: "CNPJ",
        corporate_name: "Razão social",
        trade_name: "Nome fantasia",
        modality: "Modalidade",
        address: "Endereço",
        postal_code: "CEP",
        phone: "Telefone",
        fax: "Fax",
        email: "E-mail",
        representative: "Representante",
        registered_on: "Data de registro",
    },
};

impl Locale {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::PtBr => &PT_BR,
        }
    }
}
