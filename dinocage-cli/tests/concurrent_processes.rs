//! Concurrent `dinocage` processes sharing one data directory.

mod common;

use std::thread;

use assert_cmd::Command;
use common::TestEnv;

fn admit(data_dir: &std::path::Path, name: &str, cage: Option<i64>) -> std::process::Output {
    let mut cmd = Command::cargo_bin("dinocage").unwrap();
    cmd.env_remove("DINOCAGE_DEFAULT_CAPACITY")
        .env_remove("DINOCAGE_OUTPUT_FORMAT")
        .arg("--data-dir")
        .arg(data_dir)
        .args(["--busy-timeout", "30", "--quiet"])
        .args(["dino", "add", "--species", "velociraptor", "--name", name]);
    if let Some(cage) = cage {
        cmd.args(["--cage", &cage.to_string()]);
    }
    cmd.output().unwrap()
}

#[test]
fn test_parallel_admissions_respect_capacity() {
    let env = TestEnv::new();
    let cage = env.add_cage("C", 3);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let data_dir = env.data_dir.clone();
            thread::spawn(move || admit(&data_dir, &format!("raptor-{i}"), Some(cage)))
        })
        .collect();
    let outputs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let admitted = outputs.iter().filter(|o| o.status.success()).count();
    assert_eq!(admitted, 3);
    for output in outputs.iter().filter(|o| !o.status.success()) {
        assert_eq!(output.status.code(), Some(1));
    }

    assert_eq!(env.cages_json()[0]["occupancy"], 3);
    env.command().arg("verify").assert().success();
}

#[test]
fn test_parallel_find_or_create() {
    let env = TestEnv::new();
    env.write_config("default_capacity: 4\n");
    env.command().args(["cage", "list"]).assert().success();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let data_dir = env.data_dir.clone();
            thread::spawn(move || admit(&data_dir, &format!("raptor-{i}"), None))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().status.success());
    }

    let cages = env.cages_json();
    let occupancy: Vec<_> = cages
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["occupancy"].as_u64().unwrap())
        .collect();
    assert_eq!(occupancy, [4, 4, 2]);
    env.command().arg("verify").assert().success();
}
