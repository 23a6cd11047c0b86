use ht_config::schema::*;
use ht_config::{from_yaml_str, load_json, load_yaml, save_json, save_yaml, validate_case};

fn humid_box() -> CaseConfig {
    let mut case = CaseConfig::new("humid-box");
    case.mesh = Some(MeshDef {
        cells: 10,
        cell_volume: 1e-3,
        patches: vec![
            PatchDef {
                name: "inlet".to_string(),
                face_cells: vec![0],
            },
            PatchDef {
                name: "outlet".to_string(),
                face_cells: vec![9],
            },
        ],
    });
    case.thermo = Some(ThermoDict {
        model_type: Some("humidityRhoThermo".to_string()),
        method: Some("simpleSaturation".to_string()),
        init_with_rel_humidity: true,
        ..ThermoDict::default()
    });
    case.fields.insert(
        "T".to_string(),
        FieldData::uniform(293.15).with_patch("inlet", PatchData::fixed(300.0)),
    );
    case.fields
        .insert("p".to_string(), FieldData::uniform(101_325.0));
    case.fields
        .insert("relHum".to_string(), FieldData::uniform(0.5));
    case
}

#[test]
fn roundtrip_yaml_empty_case() {
    let case = CaseConfig::new("Empty Case");
    validate_case(&case).unwrap();

    let path = std::env::temp_dir().join("ht_config_roundtrip_empty.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_yaml_humid_box() {
    let case = humid_box();
    let path = std::env::temp_dir().join("ht_config_roundtrip_humid_box.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_humid_box() {
    let case = humid_box();
    let path = std::env::temp_dir().join("ht_config_roundtrip_humid_box.json");
    save_json(&path, &case).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(case, loaded);
}

#[test]
fn parse_handwritten_case() {
    let yaml = r#"
version: 1
name: two-phase
mesh:
  cells: 3
  patches:
    - { name: wall, face_cells: [0, 2] }
thermo:
  type: humidityRhoThermo
  method: tetens
  initWithRelHumidity: false
phases:
  air:
    type: rhoThermo
fields:
  T:
    internal: [290, 295, 300]
    patches:
      wall: { type: fixedValue, value: 280 }
  p: { internal: 100000 }
  specificHumidity: { internal: 0.005 }
"#;
    let case = from_yaml_str(yaml).unwrap();
    assert_eq!(case.phase_names(), vec!["", "air"]);
    assert_eq!(
        case.thermo_dict("").unwrap().method.as_deref(),
        Some("tetens")
    );
    assert!(!case.thermo_dict("").unwrap().init_with_rel_humidity);

    let t = &case.fields["T"];
    assert_eq!(t.internal.expand(3), Some(vec![290.0, 295.0, 300.0]));
    assert_eq!(t.patches["wall"].kind, PatchTypeDef::FixedValue);
}
