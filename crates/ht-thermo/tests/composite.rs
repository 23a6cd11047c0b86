//! Assembled models: layering, delegation and persisted state.

use ht_config::{CaseConfig, FieldData, ThermoDict};
use ht_core::units::{k, pa};
use ht_core::{CellId, PatchId, Tolerances, nearly_equal};
use ht_mesh::{MeshBuilder, VolField};
use ht_thermo::{
    BasicThermo, ConstHumidRhoThermo, DryRhoThermo, FluidThermo, HumidityThermo, Region,
    RhoThermo, SutherlandHumidRhoThermo, SutherlandTransport, ThermoError,
};

fn region(thermo: ThermoDict) -> Region {
    let mut builder = MeshBuilder::uniform(5, 2e-3);
    builder.add_patch("wall", [CellId::from_index(4)]);
    let mut case = CaseConfig::new("composite");
    case.thermo = Some(thermo);
    case.fields.insert("T".into(), FieldData::uniform(300.0));
    case.fields.insert("p".into(), FieldData::uniform(101_325.0));
    case.fields
        .insert("specificHumidity".into(), FieldData::uniform(0.01));
    Region::new(builder.build().unwrap(), case)
}

fn dict() -> ThermoDict {
    ThermoDict {
        model_type: Some("humidityRhoThermo".into()),
        method: Some("buck".into()),
        ..ThermoDict::default()
    }
}

#[test]
fn construction_leaves_every_field_initialized() {
    let thermo = SutherlandHumidRhoThermo::new(&region(dict()), "").unwrap();
    assert_eq!(thermo.basic().phase(), "");
    assert_eq!(thermo.humidity().method().key(), "buck");
    assert!(thermo.fluid().mixture().epsilon() < 1.0);

    for field in [thermo.rho(), thermo.rho0(), thermo.psi(), thermo.mu(), thermo.cp()] {
        assert!(
            field.values().all(|v| v.is_finite() && v > 0.0),
            "{} not initialized",
            field.name()
        );
    }
    assert_eq!(thermo.rho(), &thermo.rho0().renamed(thermo.rho().name()));

    let t = 300.0;
    let p = 101_325.0;
    let expected = thermo.psi().internal()[0] * p;
    assert!(nearly_equal(thermo.rho().internal()[0], expected, Tolerances::default()));
    assert!(thermo.psi().internal()[0] < 1.0 / (287.0 * t));
}

#[test]
fn snapshot_uses_persisted_names() {
    let thermo = SutherlandHumidRhoThermo::new(&region(dict()), "").unwrap();
    let store = thermo.snapshot();
    for name in [
        "T",
        "p",
        "Cp",
        "Cv",
        "thermo:rho",
        "thermo:rho_0",
        "thermo:psi",
        "thermo:mu",
        "muEff",
        "relHum",
        "specificHumidity",
        "maxSpecificHumidity",
        "waterVapor",
        "maxWaterVapor",
        "waterMass",
        "pSatH2O",
        "partialPressureH2O",
    ] {
        assert!(store.contains_key(name), "missing {name}");
    }
    assert!(!store.contains_key("rho"));
}

#[test]
fn explicit_dictionary_supplies_fields() {
    let region = region(ThermoDict::default());
    let mut explicit = dict();
    explicit.init_with_rel_humidity = true;
    explicit
        .fields
        .insert("relHum".into(), FieldData::uniform(0.25));

    let thermo = ConstHumidRhoThermo::with_dict(&region, explicit, "").unwrap();
    assert!(thermo.init_with_rel_humidity());
    assert!((thermo.relative_humidity().internal()[0] - 0.25).abs() < 1e-9);
    assert_eq!(thermo.type_name(), "constHumidityRhoThermo");
}

#[test]
fn store_old_time_keeps_previous_density() {
    let mut thermo = SutherlandHumidRhoThermo::new(&region(dict()), "").unwrap();
    let first: Vec<f64> = thermo.rho().values().collect();

    thermo.store_old_time();
    thermo.t_mut().fill(320.0);
    thermo.correct();

    assert_eq!(thermo.rho0().values().collect::<Vec<_>>(), first);
    assert!(thermo.rho().internal()[0] < first[0]);
}

#[test]
fn patch_accessors() {
    let thermo = SutherlandHumidRhoThermo::new(&region(dict()), "").unwrap();
    let wall = PatchId::from_index(0);
    assert_eq!(thermo.rho_patch(wall).unwrap(), thermo.rho().boundary()[0].values());
    assert_eq!(thermo.mu_patch(wall).unwrap().len(), 1);
    assert!(matches!(
        thermo.rho_patch(PatchId::from_index(3)),
        Err(ThermoError::PatchOutOfRange { .. })
    ));
}

#[test]
fn rho_mut_is_a_live_handle() {
    let mut thermo = SutherlandHumidRhoThermo::new(&region(dict()), "").unwrap();
    thermo.rho_mut().fill(2.0);
    assert!(thermo.rho().values().all(|v| v == 2.0));
    thermo.correct();
    assert!(thermo.rho().internal()[0] < 2.0);
}

#[test]
fn turbulent_viscosity_feeds_mu_eff() {
    let mut thermo = SutherlandHumidRhoThermo::new(&region(dict()), "").unwrap();
    let mu_t = VolField::calculated("mut", thermo.mesh(), 1e-4);
    thermo.set_turbulent_viscosity(&mu_t).unwrap();
    for (mu_eff, mu) in thermo.mu_eff().values().zip(thermo.mu().values()) {
        assert!(nearly_equal(mu_eff, mu + 1e-4, Tolerances::default()));
    }
}

#[test]
fn fluid_ratios() {
    let thermo = SutherlandHumidRhoThermo::new(&region(dict()), "").unwrap();
    let gamma = thermo.gamma();
    assert!(gamma.values().all(|g| g > 1.3 && g < 1.41));
    let nu = thermo.nu();
    let expected = thermo.mu().internal()[0] / thermo.rho().internal()[0];
    assert_eq!(nu.internal()[0], expected);
}

#[test]
fn dry_model_ignores_humidity() {
    let region = region(ThermoDict {
        model_type: Some("rhoThermo".into()),
        ..ThermoDict::default()
    });
    let mut dry = DryRhoThermo::<SutherlandTransport>::new(&region, "").unwrap();
    let rho = dry.rho().internal()[0];
    assert!((rho - 101_325.0 / (287.055 * 300.0)).abs() < 1e-3, "{rho}");
    assert!(dry.correct().is_clean());
    assert!(!dry.snapshot().contains_key("relHum"));
}

#[test]
fn point_density_matches_field_density() {
    let humid = SutherlandHumidRhoThermo::new(&region(dict()), "").unwrap();
    let q = humid.specific_humidity().internal()[0];
    let point = humid.fluid().mixture().density(k(300.0), pa(101_325.0), q);
    assert!(nearly_equal(
        point.value,
        humid.rho().internal()[0],
        Tolerances::default()
    ));

    let region = region(ThermoDict {
        model_type: Some("rhoThermo".into()),
        ..ThermoDict::default()
    });
    let mut dry = DryRhoThermo::<SutherlandTransport>::new(&region, "").unwrap();
    dry.t_mut().fill(350.0);
    dry.correct();
    let point = dry.fluid().mixture().density(k(350.0), pa(101_325.0), 0.0);
    assert!(nearly_equal(point.value, dry.rho().internal()[0], Tolerances::default()));
}
