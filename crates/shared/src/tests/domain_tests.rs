use super::*;

fn chlorine() -> AtomState {
    AtomState {
        id: AtomId::new("Cl"),
        symbol: "Cl".into(),
        name: "氯".into(),
        atomic_number: 17,
        valence_electrons: 7,
        max_valence: 8,
        role: AtomRole::Target,
        radius: 70.0,
        color: "#22c55e".into(),
        charge: "0".into(),
        x: 550.0,
        y: 250.0,
        opacity: 1.0,
        scale: 1.0,
        target_slots: 1,
    }
}

#[test]
fn transfer_key_renders_arrow_form() {
    let key = TransferRequirement::new("Na", "Cl", 1).key();
    assert_eq!(key.to_string(), "Na->Cl");

    let json = serde_json::to_string(&key).expect("serialize");
    assert_eq!(json, "\"Na->Cl\"");
    let parsed: TransferKey = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, key);
}

#[test]
fn malformed_transfer_key_is_rejected() {
    assert!(TransferKey::try_from("NaCl".to_string()).is_err());
    assert!(TransferKey::try_from("->Cl".to_string()).is_err());
}

#[test]
fn hit_region_is_strict_circle_with_margin() {
    let atom = chlorine();
    assert!(atom.hit_by(Point::new(550.0, 250.0), 30.0));
    assert!(atom.hit_by(Point::new(649.0, 250.0), 30.0));
    assert!(!atom.hit_by(Point::new(650.0, 250.0), 30.0));
    assert!(!atom.hit_by(Point::new(650.0, 250.0), 0.0));
}

#[test]
fn override_keeps_unset_fields() {
    let mut atom = chlorine();
    atom.opacity = 0.6;
    atom.apply_override(&RoleOverride::new("-", 1.1));

    assert_eq!(atom.charge, "-");
    assert_eq!(atom.scale, 1.1);
    assert_eq!(atom.opacity, 0.6);

    atom.apply_override(&RoleOverride::default().with_opacity(1.0));
    assert_eq!(atom.charge, "-");
    assert_eq!(atom.opacity, 1.0);
}

#[test]
fn bystanders_have_no_completion_override() {
    let transform = CompletionTransform {
        source: RoleOverride::new("+", 0.8),
        target: RoleOverride::new("-", 1.1),
    };
    assert!(transform.for_role(AtomRole::Bystander).is_none());
    assert_eq!(
        transform
            .for_role(AtomRole::Source)
            .and_then(|o| o.charge.as_deref()),
        Some("+")
    );
}
