use anslookup::{
    AppConfig, Availability, HttpLookupService, LookupError, LookupService, SearchController,
    SearchQuery,
};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serve exactly one canned response and hand back the request line
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://127.0.0.1:{}/api", listener.local_addr().unwrap().port());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(&stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request_line.trim_end().to_string()
    });

    (base_url, handle)
}

#[test]
fn test_search_request_and_decoding() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"resultados":[{"registro_ans":"335100","cnpj":"29309127000179","razao_social":"AMIL ASSISTENCIA MEDICA INTERNACIONAL S.A.","modalidade":"Medicina de Grupo","cidade":"São Paulo","uf":"SP"}],"total":1}"#,
    );

    let service = HttpLookupService::new(&base_url).unwrap();
    let results = service.search(&SearchQuery::new("amil saude", 10).unwrap()).unwrap();

    let request_line = server.join().unwrap();
    assert_eq!(
        request_line,
        "GET /api/operadoras/busca?termo=amil+saude&limite=10 HTTP/1.1"
    );
    assert_eq!(results.total, 1);
    assert_eq!(results.operators[0].registration.as_deref(), Some("335100"));
    assert_eq!(results.operators[0].city.as_deref(), Some("São Paulo"));
}

#[test]
fn test_server_error_message_reaches_the_notice() {
    let (base_url, server) = serve_once("500 Internal Server Error", r#"{"erro":"X"}"#);

    let config = AppConfig::default().with_api_base_url(base_url);
    let service = HttpLookupService::from_config(&config).unwrap();
    let mut controller = SearchController::new(&config);
    controller.set_query("unimed");
    assert!(controller.submit_search(&service));
    server.join().unwrap();

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some("X"));
    assert!(!state.loading);
    assert!(state.results.is_empty());
}

#[test]
fn test_server_error_without_body() {
    let (base_url, server) = serve_once("503 Service Unavailable", "");

    let service = HttpLookupService::new(&base_url).unwrap();
    let err = service.status().unwrap_err();
    server.join().unwrap();

    match err {
        LookupError::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, None);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_status_without_loaded_data() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"status":"online","versao":"1.0.0","data_hora":"2024-03-01 10:00:00","dados_carregados":false,"total_operadoras":0}"#,
    );

    let config = AppConfig::default().with_api_base_url(base_url);
    let service = HttpLookupService::from_config(&config).unwrap();
    let mut controller = SearchController::new(&config);

    let availability = controller.check_service_availability(&service);
    let request_line = server.join().unwrap();

    assert_eq!(request_line, "GET /api/status HTTP/1.1");
    assert!(matches!(availability, Availability::DataNotLoaded(_)));
    assert_eq!(controller.state().error, None);
}

#[test]
fn test_details_and_modalities_paths() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"registro_ans":"326305","razao_social":"UNIMED","cep":"01310100"}"#,
    );
    let service = HttpLookupService::new(&base_url).unwrap();
    let operator = service.details("326305").unwrap();
    assert_eq!(server.join().unwrap(), "GET /api/operadoras/detalhes/326305 HTTP/1.1");
    assert_eq!(operator.corporate_name.as_deref(), Some("UNIMED"));

    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"modalidades":[{"nome":"Cooperativa Médica","quantidade":270}]}"#,
    );
    let service = HttpLookupService::new(&base_url).unwrap();
    let modalities = service.modalities().unwrap();
    assert_eq!(server.join().unwrap(), "GET /api/operadoras/modalidades HTTP/1.1");
    assert_eq!(modalities.len(), 1);
    assert_eq!(modalities[0].count, 270);
}

#[test]
fn test_unreachable_service_shows_connectivity_notice() {
    // Bind then drop to get a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = AppConfig::default().with_api_base_url(format!("http://127.0.0.1:{}/api", port));
    let service = HttpLookupService::from_config(&config).unwrap();
    let mut controller = SearchController::new(&config);

    assert!(matches!(
        controller.check_service_availability(&service),
        Availability::Unreachable
    ));
    assert_eq!(
        controller.state().error.as_deref(),
        Some(controller.messages().service_unreachable)
    );
}
