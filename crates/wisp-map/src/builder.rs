//! WISPRO export → contract model mapping.
//!
//! Stateless single-pass transformation: each section of the contract model
//! is populated from the corresponding export section (renames, per-status
//! counts, filtered detail lists, derived period strings). The builder does
//! not validate the contract; it only guarantees the input export has the
//! minimal shape it reads from.

use chrono::{Datelike, Local};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::{MapError, Result};

/// Subscriber states as reported by the operations platform.
const STATUS_ACTIVE: &str = "ACTIVO";
const STATUS_SUSPENDED: &str = "SUSPENDIDO";
const STATUS_RETIRED: &str = "RETIRADO";
const STATUS_SUBSTITUTE: &str = "SUSTITUTO";

/// CPE inventory states.
const STOCK_AVAILABLE: &str = "DISPONIBLE";
const STOCK_INSTALLED: &str = "INSTALADO";
const STOCK_RETIRED: &str = "RETIRADO";

/// Reporting period injected into the contract model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Period of the local calendar date the builder runs on.
    pub fn current() -> Self {
        let today = Local::now();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Billing-period label, `YYYY-MM`.
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Populate a contract model from the operations export and the
/// target-shaped contract base.
pub fn build_contract(export: &Value, base: &Value, period: Period) -> Result<Value> {
    let Value::Object(export) = export else {
        return Err(MapError::ExportNotObject);
    };
    let mut contract = match base {
        Value::Object(map) => map.clone(),
        _ => return Err(MapError::BaseNotObject),
    };

    map_period(&mut contract, period);
    let active_users = map_users(export, &mut contract)?;
    map_installations(export, &mut contract)?;
    map_inventory(export, &mut contract)?;
    map_service(export, &mut contract);
    map_tickets(export, &mut contract)?;
    map_quality_indicators(export, &mut contract, active_users);
    map_billing(export, &mut contract, period);

    Ok(Value::Object(contract))
}

fn map_period(contract: &mut Map<String, Value>, period: Period) {
    let section = section_mut(contract, "periodo");
    section.insert("anio".to_string(), json!(period.year));
    section.insert("mes".to_string(), json!(period.month));
}

fn map_users(export: &Map<String, Value>, contract: &mut Map<String, Value>) -> Result<u64> {
    let users = export_list(export, "usuarios")?;
    let active = count_by_status(users, STATUS_ACTIVE);

    let section = section_mut(contract, "usuarios");
    section.insert("total_registrados".to_string(), json!(users.len()));
    section.insert("activos".to_string(), json!(active));
    section.insert(
        "suspendidos".to_string(),
        json!(count_by_status(users, STATUS_SUSPENDED)),
    );
    section.insert(
        "retirados".to_string(),
        json!(count_by_status(users, STATUS_RETIRED)),
    );
    section.insert(
        "sustitutos".to_string(),
        json!(count_by_status(users, STATUS_SUBSTITUTE)),
    );
    Ok(active)
}

fn map_installations(export: &Map<String, Value>, contract: &mut Map<String, Value>) -> Result<()> {
    let installations = export_list(export, "instalaciones")?;

    let mut detail = Vec::new();
    let mut dropped = 0usize;
    for record in installations {
        let Value::Object(installation) = record else {
            continue;
        };

        let subject = installation.get("id_usuario").filter(|v| is_present(v));
        let service_date = installation
            .get("fecha_instalacion")
            .filter(|v| is_present(v));
        let cpe = installation.get("cpe").and_then(Value::as_object);
        let serial = cpe
            .and_then(|device| device.get("serial"))
            .filter(|v| is_present(v));

        // Contractual filter: an installation only counts with a subject id,
        // an installation date, and a CPE serial. Anything else is dropped
        // without reporting.
        let (Some(subject), Some(service_date), Some(serial)) = (subject, service_date, serial)
        else {
            dropped += 1;
            continue;
        };

        let documents = installation
            .get("documentos")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        detail.push(json!({
            "usuario_id": subject,
            "ubicacion_predio": text_or_empty(installation.get("direccion")),
            "municipio": text_or_empty(installation.get("municipio")),
            "fecha_puesta_servicio": service_date,
            "cpe_serial": serial,
            "cpe_marca": cpe.and_then(|device| device.get("marca")).cloned().unwrap_or(Value::Null),
            "cpe_modelo": cpe.and_then(|device| device.get("modelo")).cloned().unwrap_or(Value::Null),
            "contrato_prestacion_servicios": {
                "archivo": documents.get("contrato_servicio").cloned().unwrap_or(Value::Null),
                "formato": "PDF"
            },
            "declaracion_juramentada": {
                "archivo": documents.get("declaracion_juramentada").cloned().unwrap_or(Value::Null),
                "formato": "PDF"
            },
            "soporte_puesta_servicio": {
                "archivos": documents.get("soporte_instalacion").cloned().unwrap_or_else(|| json!([])),
                "tipo": "evidencia_tecnica"
            }
        }));
    }

    if dropped > 0 {
        debug!(dropped, "installations excluded by contractual filter");
    }

    let section = section_mut(contract, "instalaciones");
    section.insert("total_instaladas".to_string(), json!(detail.len()));
    section.insert("detalle".to_string(), Value::Array(detail));
    Ok(())
}

fn map_inventory(export: &Map<String, Value>, contract: &mut Map<String, Value>) -> Result<()> {
    let inventory = export_list(export, "inventario_cpe")?;

    let section = section_mut(contract, "inventario_cpe");
    section.insert(
        "total_disponible".to_string(),
        json!(count_by_status(inventory, STOCK_AVAILABLE)),
    );
    section.insert(
        "total_instalado".to_string(),
        json!(count_by_status(inventory, STOCK_INSTALLED)),
    );
    section.insert(
        "total_retirado".to_string(),
        json!(count_by_status(inventory, STOCK_RETIRED)),
    );
    section.insert("detalle".to_string(), Value::Array(inventory.to_vec()));
    Ok(())
}

fn map_service(export: &Map<String, Value>, contract: &mut Map<String, Value>) {
    let incidents = export
        .get("servicio")
        .and_then(|service| service.get("incidentes"))
        .cloned()
        .unwrap_or_else(|| json!([]));
    let section = section_mut(contract, "servicio");
    section.insert("usuarios_fuera_servicio".to_string(), incidents);
}

fn map_tickets(export: &Map<String, Value>, contract: &mut Map<String, Value>) -> Result<()> {
    let tickets = export_list(export, "pqrs")?;
    let section = section_mut(contract, "pqrs");
    section.insert("total".to_string(), json!(tickets.len()));
    section.insert("detalle".to_string(), Value::Array(tickets.to_vec()));
    Ok(())
}

fn map_quality_indicators(
    export: &Map<String, Value>,
    contract: &mut Map<String, Value>,
    active_users: u64,
) {
    let indicators = export
        .get("indicadores")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let section = section_mut(contract, "indicadores_calidad");
    section.insert("aplican".to_string(), json!(active_users > 0));

    // Indicator values are only meaningful once the network has active
    // users; before that the section stays at its base placeholders.
    if active_users > 0 {
        for key in ["disponibilidad", "velocidad_bajada", "velocidad_subida"] {
            section.insert(
                key.to_string(),
                indicators.get(key).cloned().unwrap_or(Value::Null),
            );
        }
    }
}

fn map_billing(export: &Map<String, Value>, contract: &mut Map<String, Value>, period: Period) {
    let billing = export
        .get("facturacion")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let billing_period = billing
        .get("periodo")
        .filter(|v| is_present(v))
        .cloned()
        .unwrap_or_else(|| json!(period.label()));

    let section = section_mut(contract, "facturacion");
    section.insert("periodo".to_string(), billing_period);
    section.insert(
        "usuarios_facturados".to_string(),
        billing.get("usuarios_facturados").cloned().unwrap_or(json!(0)),
    );
    section.insert(
        "valor_total".to_string(),
        billing.get("valor_total").cloned().unwrap_or(json!(0)),
    );
}

/// Fetch a top-level export list, defaulting absent sections to empty.
fn export_list<'a>(export: &'a Map<String, Value>, field: &str) -> Result<&'a [Value]> {
    match export.get(field) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(MapError::ExpectedList {
            field: field.to_string(),
        }),
        None => Ok(&[]),
    }
}

fn count_by_status(records: &[Value], status: &str) -> u64 {
    records
        .iter()
        .filter(|record| record.get("estado").and_then(Value::as_str) == Some(status))
        .count() as u64
}

fn section_mut<'a>(contract: &'a mut Map<String, Value>, name: &str) -> &'a mut Map<String, Value> {
    let entry = contract
        .entry(name.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    entry.as_object_mut().expect("section is an object")
}

/// Present means non-null and, for strings, non-empty.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

fn text_or_empty(value: Option<&Value>) -> Value {
    match value {
        Some(Value::String(text)) => json!(text),
        Some(other) if !other.is_null() => other.clone(),
        _ => json!(""),
    }
}
