//! Route runs end to end through the real shell runner.

#![cfg(unix)]

use super::test_utils::{program, Reply, ScriptDir, ScriptedPrompter, PROFILES_JSON};
use ezbx::params::Action;
use ezbx::profile::ProfileSet;
use ezbx::runner::ShellRunner;
use ezbx::workflow::Workflow;
use ezbx::EzbxError;

const THREE_ROUTES_JSON: &str = r#"{
    "edge": {
        "apiEndpoint": "https://api.example.com",
        "orgName": "acme",
        "spaceName": "edge",
        "environment": "production",
        "manifestPath": "manifest.yml",
        "route": [
            { "hostName": "www", "domain": "example.com" },
            { "hostName": "api", "domain": "example.com" },
            { "hostName": "cdn", "domain": "example.com" }
        ]
    }
}"#;

fn route_map_only(app: &'static str) -> Vec<Reply> {
    vec![
        Reply::Pick(1),
        Reply::Pick(1),
        Reply::Pick(0),
        Reply::Type(app),
        Reply::Type("yes"),
    ]
}

#[tokio::test]
async fn map_only_route_runs_one_step_per_entry() {
    let scripts = ScriptDir::new();
    let profiles = ProfileSet::from_json_str(PROFILES_JSON).unwrap();
    let workflow = Workflow::new(
        ScriptedPrompter::new(route_map_only("shop-2")),
        ShellRunner::default(),
        scripts.paths(),
        program(),
    );

    let completion = workflow.run(&profiles, |_| {}).await.unwrap();
    assert_eq!(completion.action, Action::Route);
    assert_eq!(completion.exit_code, 0);

    let lines = scripts.log_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("login|"));
    assert_eq!(
        lines[1],
        "route|APP_NAME=shop-2|OLD_APP_NAME=null|DOMAIN=example.com|HOSTNAME=''"
    );
    assert_eq!(
        lines[2],
        "route|APP_NAME=shop-2|OLD_APP_NAME=null|DOMAIN=example.com|HOSTNAME=api"
    );

    let asked = workflow.prompter().asked.lock();
    assert_eq!(
        *asked,
        vec!["Action", "Unmap", "Config", "New App Name", "Confirm (y/n)"]
    );
}

#[tokio::test]
async fn map_only_route_overrides_inherited_old_app_name() {
    // Every route step sets OLD_APP_NAME, so the inherited value never reaches a script.
    std::env::set_var("OLD_APP_NAME", "leaked");
    let scripts = ScriptDir::new();
    let profiles = ProfileSet::from_json_str(PROFILES_JSON).unwrap();
    let workflow = Workflow::new(
        ScriptedPrompter::new(route_map_only("shop-2")),
        ShellRunner::default(),
        scripts.paths(),
        program(),
    );

    workflow.run(&profiles, |_| {}).await.unwrap();

    let lines = scripts.log_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[1..]
        .iter()
        .all(|line| line.contains("|OLD_APP_NAME=null|")));
}

#[tokio::test]
async fn map_and_unmap_passes_old_app_name() {
    let scripts = ScriptDir::new();
    let profiles = ProfileSet::from_json_str(PROFILES_JSON).unwrap();
    let prompter = ScriptedPrompter::new(vec![
        Reply::Pick(1),
        Reply::Pick(0),
        Reply::Pick(0),
        Reply::Type("shop-2"),
        Reply::Type("shop-1"),
        Reply::Type("y"),
    ]);
    let workflow = Workflow::new(prompter, ShellRunner::default(), scripts.paths(), program());

    let mut unmap_line = None;
    workflow
        .run(&profiles, |prepared| {
            unmap_line = prepared
                .plan
                .summary
                .iter()
                .find(|line| line.label == "UNMAP")
                .map(|line| line.value.clone());
        })
        .await
        .unwrap();

    assert_eq!(unmap_line.as_deref(), Some("shop-1"));
    let lines = scripts.log_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[1..]
        .iter()
        .all(|line| line.contains("OLD_APP_NAME=shop-1")));
}

#[tokio::test]
async fn failing_route_stops_remaining_routes() {
    let scripts = ScriptDir::new();
    scripts.fail_route_for_host("api", 5);
    let profiles = ProfileSet::from_json_str(THREE_ROUTES_JSON).unwrap();
    let workflow = Workflow::new(
        ScriptedPrompter::new(route_map_only("edge-2")),
        ShellRunner::default(),
        scripts.paths(),
        program(),
    );

    let err = workflow.run(&profiles, |_| {}).await.unwrap_err();
    match &err {
        EzbxError::Shell { step, code, .. } => {
            assert_eq!(step, "route api.example.com");
            assert_eq!(*code, Some(5));
        }
        other => panic!("expected shell error, got {:?}", other),
    }
    assert_eq!(err.exit_code(), 5);

    let lines = scripts.log_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("HOSTNAME=www"));
    assert!(lines[2].ends_with("HOSTNAME=api"));
    assert!(!lines.iter().any(|line| line.contains("HOSTNAME=cdn")));
}

#[tokio::test]
async fn failing_login_runs_no_routes() {
    let scripts = ScriptDir::new();
    scripts.fail_login(1);
    let profiles = ProfileSet::from_json_str(PROFILES_JSON).unwrap();
    let workflow = Workflow::new(
        ScriptedPrompter::new(route_map_only("shop-2")),
        ShellRunner::default(),
        scripts.paths(),
        program(),
    );

    let err = workflow.run(&profiles, |_| {}).await.unwrap_err();
    assert!(matches!(err, EzbxError::Shell { ref step, .. } if step == "login"));
    assert_eq!(scripts.log_lines().len(), 1);
}

#[tokio::test]
async fn missing_route_script_is_launch_error() {
    let scripts = ScriptDir::new();
    scripts.remove("route.sh");
    let profiles = ProfileSet::from_json_str(PROFILES_JSON).unwrap();
    let workflow = Workflow::new(
        ScriptedPrompter::new(route_map_only("shop-2")),
        ShellRunner::default(),
        scripts.paths(),
        program(),
    );

    let err = workflow.run(&profiles, |_| {}).await.unwrap_err();
    match &err {
        EzbxError::Launch { step, script, .. } => {
            assert_eq!(step, "route example.com");
            assert!(script.ends_with("route.sh"));
        }
        other => panic!("expected launch error, got {:?}", other),
    }
    assert_eq!(err.exit_code(), 1);
    assert_eq!(scripts.log_lines().len(), 1);
}

#[tokio::test]
async fn declined_confirmation_runs_nothing() {
    let scripts = ScriptDir::new();
    let profiles = ProfileSet::from_json_str(PROFILES_JSON).unwrap();
    let prompter = ScriptedPrompter::new(vec![
        Reply::Pick(1),
        Reply::Pick(1),
        Reply::Pick(0),
        Reply::Type("shop-2"),
        Reply::Type("nope"),
    ]);
    let workflow = Workflow::new(prompter, ShellRunner::default(), scripts.paths(), program());

    let err = workflow.run(&profiles, |_| {}).await.unwrap_err();
    assert!(err.is_user_abort());
    assert_eq!(err.exit_code(), 0);
    assert_eq!(err.to_string(), "Bailing out...");
    assert!(scripts.log_lines().is_empty());
}

#[tokio::test]
async fn cancel_at_profile_prompt_runs_nothing() {
    let scripts = ScriptDir::new();
    let profiles = ProfileSet::from_json_str(PROFILES_JSON).unwrap();
    let prompter = ScriptedPrompter::new(vec![Reply::Pick(1), Reply::Pick(1), Reply::Cancel]);
    let workflow = Workflow::new(prompter, ShellRunner::default(), scripts.paths(), program());

    let err = workflow.run(&profiles, |_| panic!("no summary expected")).await.unwrap_err();
    assert!(err.is_user_abort());
    assert!(scripts.log_lines().is_empty());
}

#[tokio::test]
async fn route_without_entries_is_rejected_before_running() {
    let scripts = ScriptDir::new();
    let profiles = ProfileSet::from_json_str(PROFILES_JSON).unwrap();
    let prompter = ScriptedPrompter::new(vec![
        Reply::Pick(1),
        Reply::Pick(1),
        Reply::Pick(1),
        Reply::Type("sandbox-2"),
    ]);
    let workflow = Workflow::new(prompter, ShellRunner::default(), scripts.paths(), program());

    let err = workflow.run(&profiles, |_| {}).await.unwrap_err();
    assert!(matches!(err, EzbxError::ProfileInvalid { ref profile, .. } if profile == "sandbox"));
    assert!(scripts.log_lines().is_empty());
}
