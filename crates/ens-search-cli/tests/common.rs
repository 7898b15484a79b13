#![allow(dead_code)]
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _dir: TempDir,
    pub history: PathBuf,
    pub cfg: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = dir.path().join("config");
        std::fs::create_dir_all(&cfg).expect("cfg dir");
        let history = dir.path().join("search-history-v2.json");
        Self {
            _dir: dir,
            history,
            cfg,
        }
    }

    pub fn bin(&self) -> Command {
        let mut cmd = Command::cargo_bin("ens-search").unwrap();
        cmd.env("XDG_CONFIG_HOME", &self.cfg);
        cmd.env_remove("ENS_SEARCH_LOG");
        cmd.arg("--history").arg(&self.history);
        cmd
    }

    pub fn write_settings(&self, toml: &str) {
        let dir = self.cfg.join("ens-search");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("settings.toml"), toml).unwrap();
    }

    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let out = self
            .bin()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
