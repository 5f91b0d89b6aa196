//! Unit tests for material.rs

use super::*;

fn desc(params: Vec<(&str, ParamValue)>) -> MaterialDesc {
    MaterialDesc {
        name: "stone".to_string(),
        params: params.into_iter().map(|(n, v)| (n.to_string(), v)).collect(),
    }
}

#[test]
fn test_material_lookup_by_name() {
    let material = Material::from_desc(desc(vec![
        ("roughness", ParamValue::Float(0.8)),
        ("base_color", ParamValue::Vec4([0.5, 0.5, 0.5, 1.0])),
        ("diffuse", ParamValue::Texture("stone_d.png".to_string())),
    ])).unwrap();

    assert_eq!(material.name(), "stone");
    assert_eq!(material.param_count(), 3);
    assert_eq!(material.param("roughness"), Some(&ParamValue::Float(0.8)));
    assert!(material.param("metallic").is_none());
}

#[test]
fn test_material_params_keep_declaration_order() {
    let material = Material::from_desc(desc(vec![
        ("b", ParamValue::Int(1)),
        ("a", ParamValue::Int(2)),
    ])).unwrap();
    let names: Vec<&str> = material.params().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_material_rejects_duplicate_params() {
    let result = Material::from_desc(desc(vec![
        ("roughness", ParamValue::Float(0.1)),
        ("roughness", ParamValue::Float(0.2)),
    ]));
    assert!(result.is_err());
}

#[test]
fn test_empty_material() {
    let material = Material::from_desc(desc(Vec::new())).unwrap();
    assert_eq!(material.param_count(), 0);
}
