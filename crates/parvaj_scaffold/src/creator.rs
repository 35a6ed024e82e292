//! Rendering and writing entity files.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::ScaffoldError;
use crate::paths::{entity_file_path, EntityKind};

const SOURCE_TEMPLATE: &str = "source-entity.vhd";
const UNIT_TEST_TEMPLATE: &str = "unit-test-entity.vhd";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// One directory name; no separators, no `.`/`..`.
static GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("group pattern is valid"));

/// From the first `entity` through the closing `end entity ...;`.
static ENTITY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bentity\b.*?\bend\s+entity\b[^;]*;").expect("entity block pattern is valid")
});

static ENTITY_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bentity\b").expect("entity keyword pattern is valid"));

/// A request to generate one entity file.
#[derive(Debug, Clone)]
pub struct EntityScaffold {
    /// Project root the `src/` and `tests/` directories live in.
    pub root: PathBuf,
    /// Source entity or unit test.
    pub kind: EntityKind,
    /// The source entity's name; unit tests derive theirs from it.
    pub entity_name: String,
    /// Subdirectory grouping related entities.
    pub group: String,
    /// Name of the generated architecture.
    pub architecture: String,
}

impl EntityScaffold {
    /// Default architecture name.
    pub const DEFAULT_ARCHITECTURE: &'static str = "structural";

    /// The file this request generates.
    pub fn target_path(&self) -> PathBuf {
        entity_file_path(&self.root, self.kind, &self.entity_name, &self.group)
    }

    /// Renders the file contents without writing anything.
    pub fn render(&self) -> Result<String, ScaffoldError> {
        self.validate()?;

        let mut context = Context::new();
        context.insert("entity_name", &self.kind.generated_name(&self.entity_name));
        context.insert("architecture_name", &self.architecture);

        let template = match self.kind {
            EntityKind::Source => SOURCE_TEMPLATE,
            EntityKind::UnitTest => {
                context.insert("source_entity_name", &self.entity_name);
                context.insert("component", &self.source_component()?);
                UNIT_TEST_TEMPLATE
            }
        };

        templates()?
            .render(template, &context)
            .map_err(|e| ScaffoldError::Template(e.to_string()))
    }

    /// Renders and writes the file, creating parent directories. Returns the
    /// path written.
    pub fn create(&self) -> Result<PathBuf, ScaffoldError> {
        self.validate()?;
        let path = self.target_path();
        if path.exists() {
            return Err(ScaffoldError::AlreadyExists { path });
        }
        let contents = self.render()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&path, contents).map_err(|e| ScaffoldError::Io {
            path: path.clone(),
            source: e,
        })?;
        debug!("created {} entity at {}", self.kind, path.display());
        Ok(path)
    }

    fn validate(&self) -> Result<(), ScaffoldError> {
        if !GROUP.is_match(&self.group) {
            return Err(ScaffoldError::InvalidGroup(self.group.clone()));
        }
        for (what, name) in [
            ("entity name", &self.entity_name),
            ("architecture name", &self.architecture),
        ] {
            if !IDENTIFIER.is_match(name) {
                return Err(ScaffoldError::InvalidName {
                    what,
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The source entity's declaration re-stated as an indented component.
    fn source_component(&self) -> Result<String, ScaffoldError> {
        let source = entity_file_path(&self.root, EntityKind::Source, &self.entity_name, &self.group);
        let text = read_source(&source)?;
        let block = ENTITY_BLOCK
            .find(&text)
            .ok_or_else(|| ScaffoldError::NoEntityDeclaration {
                path: source.clone(),
            })?;

        let component = ENTITY_KEYWORD.replace_all(block.as_str(), "component");
        Ok(component
            .lines()
            .map(|line| {
                let line = line.trim_end();
                if line.is_empty() {
                    String::new()
                } else {
                    format!("    {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn read_source(path: &Path) -> Result<String, ScaffoldError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScaffoldError::SourceEntityMissing {
            path: path.to_path_buf(),
        },
        _ => ScaffoldError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

fn templates() -> Result<Tera, ScaffoldError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(vec![
        (
            SOURCE_TEMPLATE,
            include_str!("../templates/source-entity.vhd.tera"),
        ),
        (
            UNIT_TEST_TEMPLATE,
            include_str!("../templates/unit-test-entity.vhd.tera"),
        ),
    ])
    .map_err(|e| ScaffoldError::Template(e.to_string()))?;
    Ok(tera)
}
