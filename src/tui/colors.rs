use ratatui::style::Color;

/// Lowercased modality with accents folded, for matching
fn normalize(modality: &str) -> String {
    modality
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

pub fn color_for_modality(modality: &str) -> Color {
    let m = normalize(modality);
    if m.contains("odonto") {
        Color::Cyan
    } else if m.contains("cooperativa") {
        Color::Green
    } else if m.contains("seguradora") {
        Color::Yellow
    } else if m.contains("medicina de grupo") {
        Color::LightBlue
    } else if m.contains("autogestao") {
        Color::Magenta
    } else if m.contains("filantropia") {
        Color::LightRed
    } else if m.contains("administradora") {
        Color::Gray
    } else {
        Color::White
    }
}

/// Short tag for narrow terminals
pub fn modality_tag(modality: &str) -> &'static str {
    let m = normalize(modality);
    if m.contains("cooperativa odonto") {
        "COOP-ODONTO"
    } else if m.contains("odonto") {
        "ODONTO"
    } else if m.contains("cooperativa") {
        "COOP"
    } else if m.contains("seguradora") {
        "SEGURADORA"
    } else if m.contains("medicina de grupo") {
        "MED-GRUPO"
    } else if m.contains("autogestao") {
        "AUTOGESTAO"
    } else if m.contains("filantropia") {
        "FILANTROPIA"
    } else if m.contains("administradora") {
        "ADM"
    } else if m.is_empty() {
        "-"
    } else {
        "OUTRA"
    }
}
