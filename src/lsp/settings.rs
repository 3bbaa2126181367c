//! Layered settings loading for the server.
//!
//! Layers, lowest first: built-in defaults, the user file, the project
//! file, then whatever the client sent. A broken layer is reported and
//! skipped; the others still apply.

use std::fmt;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::config::{
    DankSettings, PROJECT_CONFIG_FILE, WorkspaceSettings, default_settings, load_user_config,
    merge_all,
};

/// Keys a client may nest our settings under.
const SETTINGS_SECTIONS: [&str; 2] = ["dank-ls", "dankLs"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsEventKind {
    Info,
    Warning,
}

/// Something worth telling the user about while settings were loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsEvent {
    pub kind: SettingsEventKind,
    pub message: String,
}

impl SettingsEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(SettingsEventKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(SettingsEventKind::Warning, message)
    }

    fn new(kind: SettingsEventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Where client-supplied settings came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsSource {
    InitializationOptions,
    ClientConfiguration,
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SettingsSource::InitializationOptions => "initialization options",
            SettingsSource::ClientConfiguration => "client configuration",
        })
    }
}

#[derive(Default, Debug)]
pub struct SettingsLoadOutcome {
    pub settings: Option<WorkspaceSettings>,
    pub events: Vec<SettingsEvent>,
}

pub fn load_settings(
    root_path: Option<&Path>,
    client_settings: Option<(SettingsSource, Value)>,
) -> SettingsLoadOutcome {
    let mut events = Vec::new();
    let layers = [
        Some(default_settings()),
        user_layer(&mut events),
        root_path.and_then(|root| project_layer(root, &mut events)),
        client_settings.and_then(|(source, value)| client_layer(source, value, &mut events)),
    ];

    SettingsLoadOutcome {
        settings: merge_all(&layers).map(WorkspaceSettings::from),
        events,
    }
}

fn user_layer(events: &mut Vec<SettingsEvent>) -> Option<DankSettings> {
    match load_user_config() {
        Ok(Some(settings)) => {
            events.push(SettingsEvent::info("Loaded user config"));
            Some(settings)
        }
        Ok(None) => None,
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Skipping user config: {}",
                err
            )));
            None
        }
    }
}

fn project_layer(root: &Path, events: &mut Vec<SettingsEvent>) -> Option<DankSettings> {
    let path = root.join(PROJECT_CONFIG_FILE);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Skipping {}: {}",
                path.display(),
                err
            )));
            return None;
        }
    };

    match toml::from_str::<DankSettings>(&contents) {
        Ok(settings) => {
            events.push(SettingsEvent::info(format!("Loaded {}", path.display())));
            Some(settings)
        }
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Skipping {}: {}",
                path.display(),
                err
            )));
            None
        }
    }
}

fn client_layer(
    source: SettingsSource,
    value: Value,
    events: &mut Vec<SettingsEvent>,
) -> Option<DankSettings> {
    let value = match value {
        Value::Object(mut map) => match SETTINGS_SECTIONS.iter().find_map(|key| map.remove(*key)) {
            Some(section) => section,
            None => Value::Object(map),
        },
        other => other,
    };
    if value.is_null() {
        return None;
    }

    match serde_json::from_value::<DankSettings>(value) {
        Ok(settings) => {
            events.push(SettingsEvent::info(format!("Applied {}", source)));
            Some(settings)
        }
        Err(err) => {
            events.push(SettingsEvent::warning(format!("Ignoring {}: {}", source, err)));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Point XDG_CONFIG_HOME at an empty directory so the user layer is absent.
    fn isolated_user_config<T>(f: impl FnOnce() -> T) -> T {
        let empty = TempDir::new().expect("failed to create temp dir");
        let original = std::env::var_os("XDG_CONFIG_HOME");
        // SAFETY: serialized via #[serial(xdg_env)]
        unsafe { std::env::set_var("XDG_CONFIG_HOME", empty.path()) };
        let result = f();
        // SAFETY: same as above
        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
        result
    }

    #[test]
    #[serial(xdg_env)]
    fn defaults_apply_without_any_config() {
        let outcome = isolated_user_config(|| load_settings(None, None));
        assert_eq!(outcome.settings, Some(WorkspaceSettings::default()));
        assert!(outcome.events.is_empty());
    }

    #[test]
    #[serial(xdg_env)]
    fn project_file_overrides_defaults_and_client_overrides_project() {
        let project = TempDir::new().unwrap();
        std::fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "maxBackwardLines = 5\nworkerUrls = false\n",
        )
        .unwrap();

        let outcome = isolated_user_config(|| {
            load_settings(
                Some(project.path()),
                Some((
                    SettingsSource::InitializationOptions,
                    json!({ "workerUrls": true }),
                )),
            )
        });

        let settings = outcome.settings.unwrap();
        assert_eq!(settings.max_backward_lines, 5);
        assert!(settings.worker_urls);
        assert_eq!(
            outcome.events,
            vec![
                SettingsEvent::info(format!(
                    "Loaded {}",
                    project.path().join(PROJECT_CONFIG_FILE).display()
                )),
                SettingsEvent::info("Applied initialization options"),
            ]
        );
    }

    #[test]
    #[serial(xdg_env)]
    fn user_file_sits_between_defaults_and_project() {
        let xdg = TempDir::new().unwrap();
        std::fs::create_dir_all(xdg.path().join("dank-ls")).unwrap();
        std::fs::write(
            xdg.path().join("dank-ls").join(PROJECT_CONFIG_FILE),
            "maxBackwardLines = 7\nhtmlPartials = false\n",
        )
        .unwrap();
        let project = TempDir::new().unwrap();
        std::fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "maxBackwardLines = 3\n",
        )
        .unwrap();

        let original = std::env::var_os("XDG_CONFIG_HOME");
        // SAFETY: serialized via #[serial(xdg_env)]
        unsafe { std::env::set_var("XDG_CONFIG_HOME", xdg.path()) };
        let outcome = load_settings(Some(project.path()), None);
        // SAFETY: same as above
        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }

        let settings = outcome.settings.unwrap();
        assert_eq!(settings.max_backward_lines, 3);
        assert!(!settings.html_partials);
        assert_eq!(outcome.events[0], SettingsEvent::info("Loaded user config"));
    }

    #[test]
    #[serial(xdg_env)]
    fn malformed_project_file_is_reported_and_skipped() {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join(PROJECT_CONFIG_FILE), "htmlPartials = 3").unwrap();

        let outcome = isolated_user_config(|| load_settings(Some(project.path()), None));

        assert_eq!(outcome.settings, Some(WorkspaceSettings::default()));
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].kind, SettingsEventKind::Warning);
        assert!(outcome.events[0].message.starts_with("Skipping "));
    }

    #[test]
    #[serial(xdg_env)]
    fn client_configuration_may_be_nested_under_section() {
        let outcome = isolated_user_config(|| {
            load_settings(
                None,
                Some((
                    SettingsSource::ClientConfiguration,
                    json!({ "dank-ls": { "htmlPartials": false } }),
                )),
            )
        });
        assert!(!outcome.settings.unwrap().html_partials);
    }

    #[test]
    #[serial(xdg_env)]
    fn null_client_settings_are_not_a_layer() {
        let outcome = isolated_user_config(|| {
            load_settings(
                None,
                Some((SettingsSource::ClientConfiguration, json!({ "dankLs": null }))),
            )
        });
        assert_eq!(outcome.settings, Some(WorkspaceSettings::default()));
        assert!(outcome.events.is_empty());
    }

    #[test]
    #[serial(xdg_env)]
    fn invalid_client_settings_are_a_warning() {
        let outcome = isolated_user_config(|| {
            load_settings(
                None,
                Some((
                    SettingsSource::InitializationOptions,
                    json!({ "maxBackwardLines": "many" }),
                )),
            )
        });
        assert_eq!(outcome.settings, Some(WorkspaceSettings::default()));
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].kind, SettingsEventKind::Warning);
        assert!(
            outcome.events[0]
                .message
                .starts_with("Ignoring initialization options")
        );
    }
}
