//! Console summary of a validated contract model.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use serde_json::Value;

pub fn print_summary(document: &Value, report_path: Option<&Path>) {
    if let Some(periodo) = label(document, "/facturacion/periodo") {
        println!("Periodo: {periodo}");
    }
    if let Some(path) = report_path {
        println!("Informe: {}", path.display());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![header_cell("Indicador"), header_cell("Valor")]);

    let rows = [
        ("Usuarios registrados", "/usuarios/total_registrados"),
        ("Usuarios activos", "/usuarios/activos"),
        ("Usuarios suspendidos", "/usuarios/suspendidos"),
        ("Usuarios retirados", "/usuarios/retirados"),
        ("Instalaciones del periodo", "/instalaciones/total_instaladas"),
        ("PQRS recibidas", "/pqrs/total"),
        ("CPE disponibles", "/inventario_cpe/total_disponible"),
        ("CPE instalados", "/inventario_cpe/total_instalado"),
    ];
    for (name, pointer) in rows {
        let value = label(document, pointer).unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(name),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn label(document: &Value, pointer: &str) -> Option<String> {
    match document.pointer(pointer)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
