// Test helpers for isolated testing
// Provides a scripted brew and a throwaway working directory

#![allow(dead_code)]

use rebrew::{CommandOutput, CommandRunner, Config, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

/// Isolated working directory holding the manifest and Brewfile
/// Automatically cleaned up when dropped (RAII pattern)
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub config: Config,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config::in_dir(temp_dir.path());
        Self { temp_dir, config }
    }

    pub fn manifest_contents(&self) -> String {
        std::fs::read_to_string(&self.config.manifest).unwrap()
    }

    pub fn brewfile_contents(&self) -> Option<String> {
        std::fs::read_to_string(&self.config.brewfile).ok()
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Package name from a `brew "<name>"` Brewfile line
pub fn parse_directive(line: &str) -> Option<&str> {
    let quoted = line.trim().strip_prefix("brew")?.trim();
    quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
}

/// Stand-in for the brew executable
///
/// Answers `--version`, `list -1`, `bundle install --file <path>` and
/// `info <name>` from canned data and records every invocation.
#[derive(Default)]
pub struct ScriptedBrew {
    pub installed: Vec<String>,
    pub info: HashMap<String, String>,
    pub missing: bool,
    pub bundle_fails: bool,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedBrew {
    pub fn with_packages(names: &[&str]) -> Self {
        Self {
            installed: names.iter().map(|n| n.to_string()).collect(),
            info: names
                .iter()
                .map(|n| {
                    (
                        n.to_string(),
                        format!("==> {n}: stable 1.0\nThe {n} package\nhttps://example.com/{n}\nNot installed\nFrom: homebrew/core\n"),
                    )
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, subcommand: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.first().map(String::as_str) == Some(subcommand))
            .count()
    }
}

fn ok(stdout: impl Into<Vec<u8>>) -> CommandOutput {
    CommandOutput {
        success: true,
        stdout: stdout.into(),
        stderr: Vec::new(),
    }
}

fn failed(stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

impl CommandRunner for ScriptedBrew {
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_string()).collect());

        if self.missing {
            return Err(rebrew::RebrewError::ExternalCommand {
                command: self.command_line(args),
                message: "No such file or directory (os error 2)".to_string(),
            });
        }

        Ok(match args {
            ["--version"] => ok("Homebrew 4.4.0\n"),
            ["list", "-1"] => {
                let mut out = String::new();
                for name in &self.installed {
                    out.push_str(name);
                    out.push('\n');
                }
                ok(out)
            }
            ["bundle", "install", "--file", _] if self.bundle_fails => {
                failed("Error: brew bundle failed!")
            }
            ["bundle", "install", "--file", _] => CommandOutput {
                success: true,
                stdout: b"Homebrew Bundle complete!\n".to_vec(),
                stderr: b"Warning: some formula is already installed\n".to_vec(),
            },
            ["info", name] => match self.info.get(*name) {
                Some(out) => ok(out.clone()),
                None => failed(&format!("Error: No available formula with the name \"{name}\".")),
            },
            _ => failed("Error: Unknown command"),
        })
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("brew {}", args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_paths_are_isolated() {
        let env1 = TestEnvironment::new();
        let env2 = TestEnvironment::new();
        assert_ne!(env1.config.manifest, env2.config.manifest);
        assert!(env1.config.manifest.starts_with(env1.temp_dir.path()));
    }

    #[test]
    fn test_parse_directive() {
        assert_eq!(parse_directive("brew \"git\""), Some("git"));
        assert_eq!(parse_directive("  brew \"wget\"  "), Some("wget"));
        assert_eq!(parse_directive("cask \"firefox\""), None);
        assert_eq!(parse_directive("brew git"), None);
    }

    #[test]
    fn test_scripted_brew_records_calls() {
        let brew = ScriptedBrew::with_packages(&["git"]);
        brew.run(&["info", "git"]).unwrap();
        brew.run(&["list", "-1"]).unwrap();
        assert_eq!(brew.calls_to("info"), 1);
        assert_eq!(brew.calls().len(), 2);
    }
}
