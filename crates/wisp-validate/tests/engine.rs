//! End-to-end tests for the validation engine: check ordering, the
//! empty-list exemption, denylist scanning, conditional rules, and
//! idempotence.

use proptest::prelude::*;
use serde_json::{Value, json};

use wisp_model::{ContractRules, ValidationConfig};
use wisp_validate::{BusinessRuleError, StructuralError, ValidationError, validate};

fn contract_schema() -> Value {
    json!({
        "modo_validacion": { "activo": true },
        "reglas_generales": {
            "texto_generico_prohibido": ["POR DEFINIR", "PENDIENTE", "N/A"]
        },
        "periodo": {
            "anio": { "obligatorio": true },
            "mes": { "obligatorio": true }
        },
        "identificacion_proyecto": {
            "municipio": { "obligatorio": true },
            "departamento": { "obligatorio": true }
        },
        "usuarios": {
            "total_registrados": { "obligatorio": true },
            "activos": { "obligatorio": true },
            "suspendidos": { "obligatorio": true },
            "retirados": { "obligatorio": true }
        },
        "instalaciones": {
            "total_instaladas": { "obligatorio": true },
            "detalle": {
                "_tipo": "lista",
                "campos": {
                    "usuario_id": { "obligatorio": true },
                    "fecha_puesta_servicio": { "obligatorio": true },
                    "cpe_serial": { "obligatorio": true }
                }
            }
        },
        "pqrs": {
            "total": { "obligatorio": true }
        },
        "indicadores_calidad": {
            "aplican": { "obligatorio": false }
        }
    })
}

fn contract_document() -> Value {
    json!({
        "periodo": { "anio": 2026, "mes": 8 },
        "identificacion_proyecto": {
            "municipio": "Inírida",
            "departamento": "Guainía"
        },
        "usuarios": {
            "total_registrados": 0,
            "activos": 0,
            "suspendidos": 0,
            "retirados": 0
        },
        "instalaciones": {
            "total_instaladas": 0,
            "detalle": []
        },
        "pqrs": { "total": 0 },
        "indicadores_calidad": { "aplican": false }
    })
}

fn rules() -> ContractRules {
    ContractRules::from_value(&contract_schema()).expect("parse schema")
}

fn strict() -> ValidationConfig {
    ValidationConfig::strict()
}

#[test]
fn empty_period_document_validates_silently() {
    assert_eq!(validate(&contract_document(), &rules(), &strict()), Ok(()));
}

#[test]
fn schema_drift_fails_before_any_rule_check() {
    // The document drops a schema-declared section AND carries a forbidden
    // literal; the structural check must win.
    let mut document = contract_document();
    document
        .as_object_mut()
        .expect("document object")
        .remove("pqrs");
    document["identificacion_proyecto"]["municipio"] = json!("POR DEFINIR");

    let error = validate(&document, &rules(), &strict()).expect_err("drifted document");
    let ValidationError::Structural(StructuralError::SchemaDrift { paths }) = error else {
        panic!("expected schema drift, got {error:?}");
    };
    assert_eq!(paths, vec!["pqrs".to_string(), "pqrs.total".to_string()]);
}

#[test]
fn renamed_field_is_reported_as_drift() {
    let mut document = contract_document();
    let usuarios = document["usuarios"].as_object_mut().expect("usuarios");
    let value = usuarios.remove("activos").expect("activos value");
    usuarios.insert("usuarios_activos".to_string(), value);

    let error = validate(&document, &rules(), &strict()).expect_err("renamed field");
    assert!(matches!(
        error,
        ValidationError::Structural(StructuralError::SchemaDrift { .. })
    ));
}

#[test]
fn non_strict_mode_is_rejected_after_structure() {
    let config = ValidationConfig {
        mode: "flexible".to_string(),
    };
    let error = validate(&contract_document(), &rules(), &config).expect_err("lenient mode");
    assert_eq!(
        error,
        StructuralError::ModeNotStrict {
            found: "flexible".to_string(),
            expected: "estricto".to_string(),
        }
        .into()
    );
}

#[test]
fn mode_gate_runs_before_field_rules() {
    let mut document = contract_document();
    document["pqrs"]["total"] = Value::Null;
    let config = ValidationConfig {
        mode: String::new(),
    };
    let error = validate(&document, &rules(), &config).expect_err("lenient mode");
    assert!(matches!(
        error,
        ValidationError::Structural(StructuralError::ModeNotStrict { .. })
    ));
}

#[test]
fn empty_list_typed_field_is_exempt_from_item_rules() {
    // Zero installations in the period is legitimate even though every item
    // field is obligatory.
    let document = contract_document();
    assert_eq!(document["instalaciones"]["detalle"], json!([]));
    assert_eq!(validate(&document, &rules(), &strict()), Ok(()));
}

#[test]
fn populated_list_items_are_checked_field_by_field() {
    let mut document = contract_document();
    document["instalaciones"]["detalle"] = json!([
        {
            "usuario_id": "U-001",
            "fecha_puesta_servicio": "2026-08-02",
            "cpe_serial": "SN-4411"
        },
        {
            "usuario_id": "U-002",
            "fecha_puesta_servicio": "2026-08-09",
            "cpe_serial": ""
        }
    ]);
    document["instalaciones"]["total_instaladas"] = json!(2);

    let error = validate(&document, &rules(), &strict()).expect_err("blank serial");
    assert_eq!(
        error,
        BusinessRuleError::InvalidRequiredField {
            path: "instalaciones.detalle[1].cpe_serial".to_string()
        }
        .into()
    );
}

#[test]
fn missing_required_field_names_its_path() {
    let mut document = contract_document();
    document["periodo"]
        .as_object_mut()
        .expect("periodo")
        .insert("mes".to_string(), Value::Null);

    let error = validate(&document, &rules(), &strict()).expect_err("null month");
    assert_eq!(
        error,
        BusinessRuleError::InvalidRequiredField {
            path: "periodo.mes".to_string()
        }
        .into()
    );
}

#[test]
fn forbidden_text_is_located_by_leaf_path() {
    let mut document = contract_document();
    document["identificacion_proyecto"]["departamento"] = json!("  pendiente ");

    let error = validate(&document, &rules(), &strict()).expect_err("boilerplate");
    assert_eq!(
        error,
        BusinessRuleError::ForbiddenText {
            path: "identificacion_proyecto.departamento".to_string(),
            text: "  pendiente ".to_string(),
        }
        .into()
    );
}

#[test]
fn indicators_cannot_apply_without_active_users() {
    let mut document = contract_document();
    document["indicadores_calidad"]["aplican"] = json!(true);

    let error = validate(&document, &rules(), &strict()).expect_err("indicator conflict");
    assert_eq!(
        error,
        BusinessRuleError::QualityIndicatorsWithoutUsers.into()
    );
}

#[test]
fn validation_is_idempotent_on_pass_and_fail() {
    let rules = rules();
    let config = strict();

    let passing = contract_document();
    assert_eq!(
        validate(&passing, &rules, &config),
        validate(&passing, &rules, &config)
    );

    let mut failing = contract_document();
    failing["indicadores_calidad"]["aplican"] = json!(true);
    let first = validate(&failing, &rules, &config);
    let second = validate(&failing, &rules, &config);
    assert!(first.is_err());
    assert_eq!(first, second);
}

proptest! {
    // Denylist matching is exact after trim + uppercase, regardless of the
    // padding and casing the source system emits.
    #[test]
    fn denylist_matches_survive_padding_and_case(
        entry in prop::sample::select(vec!["POR DEFINIR", "PENDIENTE", "N/A"]),
        left in "[ \t]{0,4}",
        right in "[ \t]{0,4}",
        flips in prop::collection::vec(any::<bool>(), 12),
    ) {
        let mangled: String = entry
            .chars()
            .zip(flips.iter().cycle())
            .map(|(ch, flip)| {
                if *flip {
                    ch.to_lowercase().next().unwrap_or(ch)
                } else {
                    ch
                }
            })
            .collect();
        let mut document = contract_document();
        document["identificacion_proyecto"]["departamento"] =
            json!(format!("{left}{mangled}{right}"));

        let error = validate(&document, &rules(), &strict()).expect_err("mangled boilerplate");
        prop_assert!(
            matches!(
                error,
                ValidationError::BusinessRule(BusinessRuleError::ForbiddenText { .. })
            ),
            "expected ForbiddenText error, got: {error:?}"
        );
    }

    // Outcomes are deterministic for arbitrary scalar content.
    #[test]
    fn validation_outcome_is_deterministic(text in ".{0,24}") {
        let mut document = contract_document();
        document["identificacion_proyecto"]["municipio"] = json!(text);

        let rules = rules();
        let config = strict();
        prop_assert_eq!(
            validate(&document, &rules, &config),
            validate(&document, &rules, &config)
        );
    }
}
