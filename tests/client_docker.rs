//! Integration tests against a real runtime.
//!
//! These require a running Docker daemon and are marked `#[ignore]`.
//! Run with: `cargo test -- --ignored`

use dockwrap::docker::{Client, latest_image_name};

const IMAGE_REPO: &str = "alpine";

#[test]
#[ignore]
fn daemon_is_reachable() {
    let client = Client::new();
    let version = client.ensure_available().expect("docker daemon should be running");
    assert!(!version.is_empty());
}

#[test]
#[ignore]
fn container_lifecycle() {
    let client = Client::new();
    let image = latest_image_name(IMAGE_REPO);

    client.pull(&image).expect("pull failed");
    client.remove_containers(&image).expect("initial cleanup failed");

    let id = client
        .run(&image, ["--label", "dockwrap-test=1"])
        .expect("run failed");
    assert!(!id.is_empty());

    let ids = client.list_container_ids(&image).expect("listing failed");
    assert!(ids.iter().any(|short| id.starts_with(short.as_str())));

    client.stop(&id).expect("stop failed");
    assert!(!client.is_running(&id).expect("inspect failed"));

    client.remove_containers(&image).expect("cleanup failed");
    assert!(client.list_container_ids(&image).expect("listing failed").is_empty());
}

#[test]
#[ignore]
fn inspecting_unknown_container_fails() {
    let client = Client::new();
    let err = client
        .is_running("dockwrap-no-such-container")
        .expect_err("inspect should fail");
    assert!(err.to_string().starts_with("inspect(dockwrap-no-such-container) failed"));
}
