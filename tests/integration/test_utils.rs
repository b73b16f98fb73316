//! Shared test utilities for integration tests
//!
//! Provides a scripted prompter and a temporary directory of platform scripts that append
//! one line per invocation (with the environment they saw) to a log file.

use ezbx::plan::ScriptPaths;
use ezbx::prompt::{ProgramInfo, Prompter};
use ezbx::EzbxError;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    Pick(usize),
    Type(&'static str),
    AcceptDefault,
    Cancel,
}

/// Answers prompts from a fixed list and records each prompt message.
pub struct ScriptedPrompter {
    replies: Mutex<VecDeque<Reply>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            asked: Mutex::new(Vec::new()),
        }
    }

    fn next(&self, message: &str) -> Reply {
        self.asked.lock().push(message.to_string());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("no reply scripted for prompt '{}'", message))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, items: &[String]) -> Result<Option<usize>, EzbxError> {
        match self.next(message) {
            Reply::Pick(index) => {
                assert!(index < items.len(), "pick {} out of {:?}", index, items);
                Ok(Some(index))
            }
            Reply::Cancel => Ok(None),
            other => panic!("select '{}' got {:?}", message, other),
        }
    }

    fn input(
        &self,
        message: &str,
        default: Option<&str>,
        _allow_empty: bool,
    ) -> Result<Option<String>, EzbxError> {
        match self.next(message) {
            Reply::Type(text) => Ok(Some(text.to_string())),
            Reply::AcceptDefault => Ok(Some(default.unwrap_or_default().to_string())),
            Reply::Cancel => Ok(None),
            other => panic!("input '{}' got {:?}", message, other),
        }
    }
}

const LOGIN_SCRIPT: &str = r#"printf '%s\n' "login|API=$API|ORGANIZATION=$ORGANIZATION|SPACE=$SPACE|USE_SSO=$USE_SSO" >> '@LOG@'
"#;

const DEPLOY_SCRIPT: &str = r#"printf '%s\n' "deploy|APP_NAME=$APP_NAME|BUILD_CMD=$BUILD_CMD|BUILD_DIR=$BUILD_DIR|ENV=$ENV|MANIFEST=$MANIFEST" >> '@LOG@'
"#;

const ROUTE_SCRIPT: &str = r#"printf '%s\n' "route|APP_NAME=$APP_NAME|OLD_APP_NAME=${OLD_APP_NAME-<unset>}|DOMAIN=$DOMAIN|HOSTNAME=$HOSTNAME" >> '@LOG@'
"#;

/// Temporary directory holding login/deploy/route scripts and their shared log.
pub struct ScriptDir {
    dir: TempDir,
    log: PathBuf,
}

#[allow(dead_code)]
impl ScriptDir {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("steps.log");
        let scripts = Self { dir, log };
        scripts.write("login.sh", LOGIN_SCRIPT, "");
        scripts.write("deploy.sh", DEPLOY_SCRIPT, "");
        scripts.write("route.sh", ROUTE_SCRIPT, "");
        scripts
    }

    /// Replace a script, appending `tail` after its logging line (e.g. an `exit`).
    pub fn write(&self, name: &str, template: &str, tail: &str) {
        let body = template.replace("@LOG@", &self.log.display().to_string());
        std::fs::write(self.dir.path().join(name), format!("{}{}", body, tail)).unwrap();
    }

    pub fn fail_route_for_host(&self, host: &str, code: i32) {
        self.write(
            "route.sh",
            ROUTE_SCRIPT,
            &format!("if [ \"$HOSTNAME\" = \"{}\" ]; then exit {}; fi\n", host, code),
        );
    }

    pub fn fail_login(&self, code: i32) {
        self.write("login.sh", LOGIN_SCRIPT, &format!("exit {}\n", code));
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.dir.path().join(name)).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> ScriptPaths {
        ScriptPaths {
            login: self.dir.path().join("login.sh"),
            deploy: self.dir.path().join("deploy.sh"),
            route: self.dir.path().join("route.sh"),
        }
    }

    /// One entry per executed step, in execution order.
    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub fn program() -> ProgramInfo {
    ProgramInfo {
        name: "ezbx".to_string(),
        version: "0.3.0".to_string(),
    }
}

/// Write `content` to `name` inside `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub const PROFILES_JSON: &str = r#"{
    "production": {
        "appName": "shop",
        "apiEndpoint": "https://api.example.com",
        "orgName": "acme",
        "spaceName": "prod",
        "environment": "production",
        "manifestPath": "manifest.yml",
        "sso": true,
        "buildDirectory": "/src",
        "buildCommand": "make",
        "route": [
            { "domain": "example.com" },
            { "hostName": "api", "domain": "example.com" }
        ],
        "description": "Production space"
    },
    "sandbox": {
        "apiEndpoint": "https://api.sandbox.example.com",
        "orgName": "acme",
        "spaceName": "sandbox",
        "environment": "development",
        "manifestPath": "manifest-dev.yml",
        "sso": false
    }
}"#;
