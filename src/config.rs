//! Configuration loading for deno.json / deno.jsonc
//!
//! Only the `tasks` table is read. Task order is the declaration order in the
//! file, which is the order tasks are selected and run in.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, RunAllError};

/// Config file names to search for, in priority order
pub const CONFIG_FILES: &[&str] = &["deno.json", "deno.jsonc"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Task definitions, absent when the file declares none
    #[serde(default)]
    pub tasks: Option<TaskSet>,
}

/// A single task definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTask")]
pub struct TaskDef {
    /// Command line run by the shell runner
    pub command: String,
    /// Human-readable description
    pub description: Option<String>,
}

/// Deno accepts both `"name": "cmd"` and `"name": { "command": "cmd", ... }`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTask {
    Command(String),
    Detailed {
        command: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<RawTask> for TaskDef {
    fn from(raw: RawTask) -> Self {
        match raw {
            RawTask::Command(command) => Self {
                command,
                description: None,
            },
            RawTask::Detailed {
                command,
                description,
            } => Self {
                command,
                description,
            },
        }
    }
}

impl From<&str> for TaskDef {
    fn from(command: &str) -> Self {
        Self {
            command: command.to_string(),
            description: None,
        }
    }
}

impl From<String> for TaskDef {
    fn from(command: String) -> Self {
        Self {
            command,
            description: None,
        }
    }
}

/// Ordered mapping from task name to definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<(String, TaskDef)>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task. Redefining a name replaces its definition but keeps
    /// its original position.
    pub fn insert(&mut self, name: impl Into<String>, def: impl Into<TaskDef>) {
        let name = name.into();
        let def = def.into();

        match self.tasks.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = def,
            None => self.tasks.push((name, def)),
        }
    }

    /// Get a task by name
    pub fn get(&self, name: &str) -> Option<&TaskDef> {
        self.tasks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, def)| def)
    }

    /// Task names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TaskSet
where
    K: Into<String>,
    V: Into<TaskDef>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = TaskSet::new();
        for (name, def) in iter {
            set.insert(name, def);
        }
        set
    }
}

impl<'de> Deserialize<'de> for TaskSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TaskSetVisitor;

        impl<'de> Visitor<'de> for TaskSetVisitor {
            type Value = TaskSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of task names to commands")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<TaskSet, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = TaskSet::new();
                while let Some((name, def)) = map.next_entry::<String, TaskDef>()? {
                    set.insert(name, def);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(TaskSetVisitor)
    }
}

impl Config {
    /// Load configuration from the specified path or search for it.
    ///
    /// The returned path is absolute.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf)> {
        let config_path = match path {
            Some(p) => {
                if p.is_file() {
                    std::env::current_dir()?.join(p)
                } else {
                    return Err(RunAllError::ConfigNotFound {
                        searched: vec![p.to_path_buf()],
                    });
                }
            }
            None => Self::find_config(&std::env::current_dir()?)?,
        };

        let content = std::fs::read_to_string(&config_path)?;
        let config = Self::parse(&content, is_jsonc(&config_path)).map_err(|message| {
            RunAllError::ConfigParse {
                path: config_path.clone(),
                message,
            }
        })?;

        tracing::debug!(path = %config_path.display(), "loaded config");

        Ok((config, config_path))
    }

    /// Parse config text; `jsonc` allows comments and trailing commas
    pub fn parse(content: &str, jsonc: bool) -> std::result::Result<Self, String> {
        if jsonc {
            json5::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(content).map_err(|e| e.to_string())
        }
    }

    /// Search for a config file in `start` and its ancestors
    pub fn find_config(start: &Path) -> Result<PathBuf> {
        let mut current = start.to_path_buf();
        let mut searched = Vec::new();

        loop {
            for name in CONFIG_FILES {
                let candidate = current.join(name);
                searched.push(candidate.clone());
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }

            if !current.pop() {
                break;
            }
        }

        Err(RunAllError::ConfigNotFound { searched })
    }

    /// Take the task set, failing when the config declares no tasks
    pub fn into_tasks(self, path: &Path) -> Result<TaskSet> {
        match self.tasks {
            Some(tasks) if !tasks.is_empty() => Ok(tasks),
            _ => Err(RunAllError::NoTasks {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn is_jsonc(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jsonc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_keeps_declaration_order() {
        let json = r#"{
            "tasks": {
                "test:unit": "deno test",
                "build:lib": "deno compile",
                "lint": "deno lint",
                "build:docs": "deno doc"
            }
        }"#;

        let config = Config::parse(json, false).unwrap();
        let tasks = config.tasks.unwrap();
        let names: Vec<_> = tasks.names().collect();
        assert_eq!(names, vec!["test:unit", "build:lib", "lint", "build:docs"]);
        assert_eq!(tasks.get("lint").unwrap().command, "deno lint");
    }

    #[test]
    fn test_parse_jsonc_with_comments() {
        let jsonc = r#"{
            // This is a comment
            "tasks": {
                "build": "echo build", // Another comment
                /* block */ "test": "echo test",
            },
        }"#;

        let config = Config::parse(jsonc, true).unwrap();
        let tasks = config.tasks.unwrap();
        assert_eq!(tasks.get("build").unwrap().command, "echo build");
        assert_eq!(tasks.get("test").unwrap().command, "echo test");
    }

    #[test]
    fn test_plain_json_rejects_comments() {
        let json = r#"{ // nope
            "tasks": { "build": "echo build" } }"#;
        assert!(Config::parse(json, false).is_err());
    }

    #[test]
    fn test_parse_detailed_task() {
        let json = r#"{
            "tasks": {
                "dev": {
                    "command": "deno run --watch main.ts",
                    "description": "Start the dev server",
                    "dependencies": ["build"]
                },
                "build": "deno compile main.ts"
            }
        }"#;

        let tasks = Config::parse(json, false).unwrap().tasks.unwrap();
        let dev = tasks.get("dev").unwrap();
        assert_eq!(dev.command, "deno run --watch main.ts");
        assert_eq!(dev.description.as_deref(), Some("Start the dev server"));
        assert_eq!(tasks.get("build").unwrap().description, None);
    }

    #[test]
    fn test_duplicate_key_keeps_position_takes_last_value() {
        let json = r#"{ "tasks": { "a": "first", "b": "b", "a": "second" } }"#;

        let tasks = Config::parse(json, false).unwrap().tasks.unwrap();
        assert_eq!(tasks.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(tasks.get("a").unwrap().command, "second");
    }

    #[test]
    fn test_numeric_names_keep_declaration_order() {
        let json = r#"{ "tasks": { "lint": "a", "2": "b", "1": "c" } }"#;

        let tasks = Config::parse(json, false).unwrap().tasks.unwrap();
        assert_eq!(tasks.names().collect::<Vec<_>>(), vec!["lint", "2", "1"]);
    }

    #[test]
    fn test_other_keys_ignored() {
        let json = r#"{ "imports": { "@std/assert": "jsr:@std/assert" }, "fmt": {} }"#;

        let config = Config::parse(json, false).unwrap();
        assert!(config.tasks.is_none());
    }

    #[test]
    fn test_into_tasks_rejects_missing_and_empty() {
        let path = Path::new("deno.json");

        let missing = Config::parse("{}", false).unwrap();
        assert!(matches!(
            missing.into_tasks(path),
            Err(RunAllError::NoTasks { .. })
        ));

        let empty = Config::parse(r#"{ "tasks": {} }"#, false).unwrap();
        assert!(matches!(
            empty.into_tasks(path),
            Err(RunAllError::NoTasks { .. })
        ));
    }

    #[test]
    fn test_find_config_walks_up_and_prefers_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("deno.json"), "{}").unwrap();
        std::fs::write(dir.path().join("deno.jsonc"), "{}").unwrap();
        let nested = dir.path().join("packages").join("lib");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Config::find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join("deno.json"));
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deno.jsonc");

        assert!(matches!(
            Config::load(Some(&path)),
            Err(RunAllError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_load_jsonc_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deno.jsonc");
        std::fs::write(&path, "{ /* c */ \"tasks\": { \"x\": \"echo x\", } }").unwrap();

        let (config, loaded) = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, path);
        assert!(loaded.is_absolute());
        assert_eq!(config.tasks.unwrap().len(), 1);
    }

    #[test]
    fn test_load_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deno.json");
        std::fs::write(&path, "{ \"tasks\": ").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(RunAllError::ConfigParse { .. })
        ));
    }
}
