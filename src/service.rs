//! Client for the operator lookup API

use crate::config::AppConfig;
use crate::error::{LookupError, Result};
use crate::model::{
    ErrorPayload, Modality, ModalityPayload, OperatorSummary, SearchPayload, SearchQuery,
    SearchResultSet, ServiceStatus,
};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Operations the registry API offers.
///
/// The controller only ever calls `search` and `status`; `details` and
/// `modalities` back the scripting commands.
pub trait LookupService: Send + Sync {
    fn search(&self, query: &SearchQuery) -> Result<SearchResultSet>;

    fn status(&self) -> Result<ServiceStatus>;

    /// Full record for one registration number
    fn details(&self, registration: &str) -> Result<OperatorSummary>;

    /// Operator counts per modality
    fn modalities(&self) -> Result<Vec<Modality>>;
}

/// Blocking HTTP implementation of [`LookupService`]
#[derive(Debug, Clone)]
pub struct HttpLookupService {
    client: Client,
    base_url: Url,
}

impl HttpLookupService {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let client = Client::builder()
            .user_agent(concat!("anslookup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.api_base_url)
    }

    /// Base URL with extra path segments appended (each one percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn search_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint(&["operadoras", "busca"]);
        url.query_pairs_mut()
            .append_pair("termo", query.term())
            .append_pair("limite", &query.limit().to_string());
        url
    }

    pub fn status_url(&self) -> Url {
        self.endpoint(&["status"])
    }

    pub fn details_url(&self, registration: &str) -> Url {
        self.endpoint(&["operadoras", "detalhes", registration.trim()])
    }

    pub fn modalities_url(&self) -> Url {
        self.endpoint(&["operadoras", "modalidades"])
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        log::debug!(target: "service", "GET {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorPayload>(&body)
                .ok()
                .and_then(|payload| payload.erro);
            log::debug!(target: "service", "HTTP {} ({:?})", status.as_u16(), message);
            return Err(LookupError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl LookupService for HttpLookupService {
    fn search(&self, query: &SearchQuery) -> Result<SearchResultSet> {
        let payload: SearchPayload = self.get_json(self.search_url(query))?;
        Ok(payload.into())
    }

    fn status(&self) -> Result<ServiceStatus> {
        self.get_json(self.status_url())
    }

    fn details(&self, registration: &str) -> Result<OperatorSummary> {
        self.get_json(self.details_url(registration))
    }

    fn modalities(&self) -> Result<Vec<Modality>> {
        let payload: ModalityPayload = self.get_json(self.modalities_url())?;
        Ok(payload.modalidades.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> HttpLookupService {
        HttpLookupService::new("http://localhost:5000/api").unwrap()
    }

    #[test]
    fn test_search_url_encodes_term() {
        let query = SearchQuery::new("saúde & vida 100%", 25).unwrap();
        let url = service().search_url(&query);

        assert_eq!(url.path(), "/api/operadoras/busca");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("termo".to_string(), "saúde & vida 100%".to_string()),
                ("limite".to_string(), "25".to_string()),
            ]
        );
        let raw = url.query().unwrap();
        assert_eq!(raw.matches('&').count(), 1);
        assert!(raw.contains("%25"));
        assert!(raw.contains("%26"));
    }

    #[test]
    fn test_trailing_slash_base() {
        let service = HttpLookupService::new("http://localhost:5000/api/").unwrap();
        assert_eq!(service.status_url().as_str(), "http://localhost:5000/api/status");
        assert_eq!(
            service.modalities_url().as_str(),
            "http://localhost:5000/api/operadoras/modalidades"
        );
    }

    #[test]
    fn test_details_url_escapes_segment() {
        let url = service().details_url("33/51 00");
        assert_eq!(url.path(), "/api/operadoras/detalhes/33%2F51%2000");
    }

    #[test]
    fn test_rejects_bad_base() {
        assert!(matches!(
            HttpLookupService::new("not a url"),
            Err(LookupError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpLookupService::new("mailto:someone@example.org"),
            Err(LookupError::InvalidUrl(_))
        ));
    }
}
