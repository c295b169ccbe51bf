//! Monthly compliance report renderer.
//!
//! Deterministic placeholder substitution over a Markdown template. The
//! renderer receives a contract model that has already passed validation;
//! it performs no contractual checks of its own. Named placeholders are
//! replaced section by section, then any `{{...}}` left over is swept with
//! a fixed fallback sentence so unresolved variables never reach the
//! published report.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Replacement for placeholders no section resolved.
pub const FALLBACK_TEXT: &str = "Información no disponible para el periodo reportado.";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{.*?\}\}").expect("placeholder pattern"));

/// Render the report template against a validated contract model.
pub fn render(document: &Value, template: &str) -> String {
    let mut text = template.to_string();
    text = replace_header_fields(document, text);
    text = replace_executive_summary(document, text);
    text = replace_installation_table(document, text);
    clear_unresolved_placeholders(&text)
}

/// Global header variables. Fields the document cannot resolve keep their
/// placeholder and fall through to the final sweep.
fn replace_header_fields(document: &Value, text: String) -> String {
    let replacements = [
        ("{{anio}}", field_text(document.pointer("/periodo/anio"))),
        ("{{mes}}", field_text(document.pointer("/periodo/mes"))),
        (
            "{{municipio}}",
            field_text(document.pointer("/identificacion_proyecto/municipio")),
        ),
        (
            "{{departamento}}",
            field_text(document.pointer("/identificacion_proyecto/departamento")),
        ),
        ("{{numero_informe}}", Some("1".to_string())),
        ("{{version}}", Some("1.0".to_string())),
        ("{{fecha_emision}}", Some("POR DEFINIR".to_string())),
    ];

    let mut text = text;
    for (placeholder, value) in replacements {
        if let Some(value) = value {
            text = text.replace(placeholder, &value);
        }
    }
    text
}

/// Section 1: executive summary generated from the contract counters.
fn replace_executive_summary(document: &Value, text: String) -> String {
    let total = count(document, "/usuarios/total_registrados");
    let active = count(document, "/usuarios/activos");
    let suspended = count(document, "/usuarios/suspendidos");
    let retired = count(document, "/usuarios/retirados");
    let installed = count(document, "/instalaciones/total_instaladas");

    let phase = if active == 0 {
        "El proyecto se encuentra en fase de implementación y alistamiento operativo."
    } else {
        "El proyecto se encuentra en fase operativa con usuarios activos."
    };

    let summary = format!(
        "Durante el periodo reportado se registran {total} usuarios en el sistema, \
         de los cuales {active} se encuentran activos, {suspended} suspendidos y \
         {retired} retirados. Se realizaron {installed} instalaciones en el periodo. \
         {phase}"
    );

    text.replace("{{resumen_ejecutivo}}", &summary)
}

/// Section 2.1: structured listing of the period's installations.
fn replace_installation_table(document: &Value, text: String) -> String {
    let table = match document
        .pointer("/instalaciones/detalle")
        .and_then(Value::as_array)
    {
        Some(installations) if !installations.is_empty() => installations
            .iter()
            .map(|installation| {
                format!(
                    "- Usuario: {} | Fecha: {} | Serial CPE: {}",
                    field_text(installation.get("usuario_id")).unwrap_or_default(),
                    field_text(installation.get("fecha_puesta_servicio")).unwrap_or_default(),
                    field_text(installation.get("cpe_serial")).unwrap_or_default(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "No se realizaron instalaciones en el periodo reportado.".to_string(),
    };

    text.replace("{{tabla_instalaciones}}", &table)
}

/// Final sweep: any placeholder no section processed is replaced with the
/// fallback sentence.
fn clear_unresolved_placeholders(text: &str) -> String {
    PLACEHOLDER.replace_all(text, FALLBACK_TEXT).into_owned()
}

fn field_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    }
}

fn count(document: &Value, pointer: &str) -> i64 {
    document
        .pointer(pointer)
        .and_then(Value::as_i64)
        .unwrap_or(0)
}
