//! JSON-file template store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use autopost_core::domain::{DEFAULT_TEMPLATE_NAME, Template, TemplateMap};
use autopost_core::ports::{StoreError, TemplateStore};
use autopost_core::render::grammar;

/// Template store configuration.
#[derive(Debug, Clone)]
pub struct TemplateStoreConfig {
    pub path: PathBuf,
}

impl Default for TemplateStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("templates/saved_templates.json"),
        }
    }
}

impl TemplateStoreConfig {
    pub fn from_env() -> Self {
        std::env::var("TEMPLATES_FILE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(|path| Self {
                path: PathBuf::from(path),
            })
            .unwrap_or_default()
    }
}

/// On-disk layout: `{"templates": {"<name>": {...}}}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    templates: BTreeMap<String, StoredTemplate>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTemplate {
    #[serde(default)]
    name: String,
    content: String,
    /// RFC 3339, or a naive ISO timestamp in files written by older tools.
    #[serde(default)]
    created_at: String,
}

impl StoredTemplate {
    fn from_template(template: &Template) -> Self {
        Self {
            name: template.name.clone(),
            content: template.content.clone(),
            created_at: template.created_at.to_rfc3339(),
        }
    }

    fn into_template(self, key: &str) -> Template {
        Template {
            name: key.to_string(),
            content: self.content,
            created_at: parse_timestamp(&self.created_at).unwrap_or_else(Utc::now),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Templates persisted as one pretty-printed JSON document.
///
/// Writes go to a sibling temp file that is then renamed over the original,
/// so readers never observe a half-written file.
pub struct FileTemplateStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTemplateStore {
    /// Open the store, seeding the default template and canonicalizing
    /// every stored template to `@slot@` form.
    pub async fn open(config: TemplateStoreConfig) -> Result<Self, StoreError> {
        let store = Self {
            path: config.path,
            lock: Mutex::new(()),
        };

        {
            let _guard = store.lock.lock().await;
            if tokio::fs::try_exists(&store.path).await? {
                if let Err(e) = store.migrate().await {
                    tracing::warn!(path = %store.path.display(), error = %e, "Template migration skipped");
                }
            } else {
                store.seed().await?;
            }
        }

        Ok(store)
    }

    async fn seed(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = TemplateFile::default();
        file.templates.insert(
            DEFAULT_TEMPLATE_NAME.to_string(),
            StoredTemplate::from_template(&Template::builtin()),
        );
        self.write_file(&file).await?;
        tracing::info!(path = %self.path.display(), "Created template store");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite brace placeholders of stored templates. Idempotent; the file
    /// is only touched when something changed.
    async fn migrate(&self) -> Result<(), StoreError> {
        let mut file = self.read_file().await?;
        let mut migrated = 0usize;

        for (name, stored) in file.templates.iter_mut() {
            match grammar::canonicalize(&stored.content) {
                Ok(canonical) if canonical != stored.content => {
                    stored.content = canonical;
                    migrated += 1;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(template = %name, error = %e, "Leaving template unmigrated");
                }
            }
        }

        if migrated > 0 {
            self.write_file(&file).await?;
            tracing::info!(migrated, "Migrated templates to canonical placeholders");
        }
        Ok(())
    }

    async fn read_file(&self) -> Result<TemplateFile, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write_file(&self, file: &TemplateFile) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn with_default(mut templates: TemplateMap) -> TemplateMap {
        templates
            .entry(DEFAULT_TEMPLATE_NAME.to_string())
            .or_insert_with(Template::builtin);
        templates
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn list(&self) -> TemplateMap {
        match self.read_file().await {
            Ok(file) => Self::with_default(
                file.templates
                    .into_iter()
                    .map(|(key, stored)| {
                        let template = stored.into_template(&key);
                        (key, template)
                    })
                    .collect(),
            ),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Reading templates failed, using default");
                Self::with_default(TemplateMap::new())
            }
        }
    }

    async fn save(&self, name: &str, content: &str) -> Result<Template, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("Template name is required".to_string()));
        }
        if content.trim().is_empty() {
            return Err(StoreError::Validation(
                "Template content is required".to_string(),
            ));
        }
        let canonical = grammar::canonicalize(content)
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        let template = Template::new(name, canonical);

        let _guard = self.lock.lock().await;
        let mut file = match self.read_file().await {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(error = %e, "Template file unreadable, starting a fresh one");
                TemplateFile::default()
            }
        };
        file.templates
            .insert(name.to_string(), StoredTemplate::from_template(&template));
        self.write_file(&file).await?;

        tracing::info!(name = %name, "Template saved");
        Ok(template)
    }
}
