use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use catalog::{Catalog, CatalogError};
use shared::domain::ScenarioId;

#[test]
fn loads_scenarios_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("redox_catalog_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("scenarios.toml");

    let mut raw = String::new();
    raw.push_str("[[scenarios]]\n");
    raw.push_str("id = \"h2\"\nlevel = 7\ntitle = \"H\"\ndescription = \"d\"\n");
    raw.push_str("equation = \"H + H\"\nexplanation_prompt = \"p\"\n");
    raw.push_str("[[scenarios.atoms]]\nid = \"H\"\nsymbol = \"H\"\nname = \"氫\"\n");
    raw.push_str("valence_electrons = 1\nmax_valence = 2\nrole = \"source\"\n");
    raw.push_str("radius = 40.0\ncolor = \"#fff\"\nx = 100.0\ny = 100.0\n");
    raw.push_str("[[scenarios.atoms]]\nid = \"F\"\nsymbol = \"F\"\nname = \"氟\"\n");
    raw.push_str("valence_electrons = 7\nmax_valence = 8\nrole = \"target\"\ntarget_slots = 1\n");
    raw.push_str("radius = 50.0\ncolor = \"#0f0\"\nx = 300.0\ny = 100.0\n");
    raw.push_str("[[scenarios.transfers]]\nfrom = \"H\"\nto = \"F\"\ncount = 1\n");
    fs::write(&path, raw).expect("write scenario file");

    let loaded = Catalog::load_file(&path).expect("load");
    assert_eq!(loaded.len(), 1);
    let scenario = loaded.get(&ScenarioId::new("h2")).expect("h2");
    assert!(scenario.completion.is_none());

    let mut catalog = Catalog::builtin();
    catalog.extend(loaded).expect("extend");
    assert_eq!(catalog.list().last().map(|s| s.id.as_str()), Some("h2"));

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_file_reports_path() {
    let path = env::temp_dir().join("redox_catalog_missing_file.toml");
    let err = Catalog::load_file(&path).expect_err("missing");
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("redox_catalog_missing_file.toml"));
}
