use atomlab_core::{AtomComposition, DerivedQuantities, NumberAtom};

#[test]
fn composition_serializes_with_snake_case_counts() {
    let composition = AtomComposition::new(8, 8, 10);

    let json = serde_json::to_value(composition).unwrap();
    assert_eq!(json["proton_count"], 8);
    assert_eq!(json["neutron_count"], 8);
    assert_eq!(json["electron_count"], 10);

    let decoded: AtomComposition = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, composition);
}

#[test]
fn deserialize_rejects_negative_counts() {
    let value = serde_json::json!({
        "proton_count": 3,
        "neutron_count": -4,
        "electron_count": 3
    });

    let err = serde_json::from_value::<AtomComposition>(value).unwrap_err();
    assert!(
        err.to_string()
            .contains("neutron_count must be a non-negative integer, got -4"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_fractional_counts() {
    let value = serde_json::json!({
        "proton_count": 1.5,
        "neutron_count": 0,
        "electron_count": 1
    });

    assert!(serde_json::from_value::<AtomComposition>(value).is_err());
}

#[test]
fn composition_feeds_a_new_model() {
    let value = serde_json::json!({
        "proton_count": 9,
        "neutron_count": 10,
        "electron_count": 10
    });
    let composition: AtomComposition = serde_json::from_value(value).unwrap();

    let atom = NumberAtom::from_composition(composition);
    assert_eq!(atom.element().expect("fluorine").name, "Fluorine");
    assert_eq!(
        atom.derived(),
        DerivedQuantities {
            charge: -1,
            mass_number: 19,
            total_particle_count: 29,
        }
    );

    let json = serde_json::to_value(atom.derived()).unwrap();
    assert_eq!(json["charge"], -1);
    assert_eq!(json["mass_number"], 19);
}
