//! Field and template definitions for metadata editors.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::OnceCell;

use crate::caches::SingleSlotCache;
use crate::client::{ClientError, RepositoryClient};
use crate::repository::{
    ApiFieldInfo, DYNAMIC_FIELD_PLACEHOLDER_ENTRY_ID, DynamicFieldValuesRequest, FieldId,
    FieldValue, FieldValues, TemplateId, TemplateIdentifier, TemplateInfo,
};

use super::error::Result;
use super::info::{FieldInfo, validate_all};

// =============================================================================
// Default Field Values
// =============================================================================

/// A default value for one field, with the field it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultFieldValue {
    pub value: FieldValue,
    pub definition: FieldInfo,
}

/// Supplies default values for new entries' fields.
#[async_trait]
pub trait DefaultFieldsProvider: Send + Sync {
    /// Compute default values given every field definition known so far.
    async fn get_default_field_values(
        &self,
        field_infos: &[ApiFieldInfo],
    ) -> Result<Vec<DefaultFieldValue>>;
}

// =============================================================================
// FieldsService
// =============================================================================

/// Fetches and caches field and template definitions, and resolves the
/// options of dynamic fields.
///
/// Repository-wide field definitions and the template list are fetched once
/// per service. Template fields are cached for the most recently requested
/// template only.
pub struct FieldsService {
    client: Arc<dyn RepositoryClient>,
    defaults: Option<Arc<dyn DefaultFieldsProvider>>,
    field_definitions: OnceCell<Vec<ApiFieldInfo>>,
    templates: OnceCell<Vec<TemplateInfo>>,
    template_fields: SingleSlotCache<TemplateIdentifier, Vec<ApiFieldInfo>>,
    template_changed: AtomicBool,
}

impl FieldsService {
    /// Create a service over the given client.
    pub fn new<C>(client: C) -> Self
    where
        C: RepositoryClient + 'static,
    {
        Self::from_dyn(Arc::new(client), None)
    }

    /// Create a service over a shared client, optionally with a provider of
    /// default field values.
    pub fn from_dyn(
        client: Arc<dyn RepositoryClient>,
        defaults: Option<Arc<dyn DefaultFieldsProvider>>,
    ) -> Self {
        Self {
            client,
            defaults,
            field_definitions: OnceCell::new(),
            templates: OnceCell::new(),
            template_fields: SingleSlotCache::new(),
            template_changed: AtomicBool::new(false),
        }
    }

    async fn field_definitions(&self) -> Result<&Vec<ApiFieldInfo>> {
        let fields = self
            .field_definitions
            .get_or_try_init(|| async {
                let repo_id = self.client.current_repo_id().await?;
                self.client.get_field_definitions(&repo_id).await
            })
            .await?;
        Ok(fields)
    }

    /// Every field definition in the repository.
    pub async fn get_all_field_definitions(&self) -> Result<Vec<FieldInfo>> {
        validate_all(self.field_definitions().await?)
    }

    /// The field definitions of one template.
    pub async fn get_template_fields(
        &self,
        template: impl Into<TemplateIdentifier>,
    ) -> Result<Vec<FieldInfo>> {
        let template = template.into();
        let fields = match self.template_fields.get(&template).await {
            Some(fields) => {
                debug!("Using cached template fields for template {}", template);
                fields
            }
            None => {
                let repo_id = self.client.current_repo_id().await?;
                let fields = self
                    .client
                    .get_template_field_definitions(&repo_id, &template)
                    .await?;
                debug!(
                    "Cached {} template fields for template {}",
                    fields.len(),
                    template
                );
                self.template_fields.put(template, fields.clone()).await;
                fields
            }
        };
        validate_all(&fields)
    }

    /// One template definition, or `None` if it does not exist. A name
    /// matching several templates yields the first.
    pub async fn get_template_definition(
        &self,
        template: impl Into<TemplateIdentifier>,
    ) -> Result<Option<TemplateInfo>> {
        let repo_id = self.client.current_repo_id().await?;
        match template.into() {
            TemplateIdentifier::Id(id) => {
                match self.client.get_template_definition_by_id(&repo_id, id).await {
                    Ok(template) => Ok(Some(template)),
                    Err(ClientError::NotFound) => Ok(None),
                    Err(err) => Err(err.into()),
                }
            }
            TemplateIdentifier::Name(name) => {
                let templates = self
                    .client
                    .get_template_definitions(&repo_id, Some(&name))
                    .await?;
                Ok(templates.into_iter().next())
            }
        }
    }

    /// Every template in the repository.
    pub async fn get_available_templates(&self) -> Result<Vec<TemplateInfo>> {
        let templates = self
            .templates
            .get_or_try_init(|| async {
                let repo_id = self.client.current_repo_id().await?;
                self.client.get_template_definitions(&repo_id, None).await
            })
            .await?;
        Ok(templates.clone())
    }

    /// The allowed values of a template's dynamic fields given the current
    /// field values, keyed by field id.
    ///
    /// Only the first value of each field is sent. Options for fields the
    /// template does not have are dropped.
    pub async fn get_dynamic_field_value_options(
        &self,
        template_id: TemplateId,
        current_values: &FieldValues,
    ) -> Result<BTreeMap<FieldId, Vec<String>>> {
        let request = DynamicFieldValuesRequest {
            template_id,
            field_values: first_values_by_name(current_values),
        };
        let repo_id = self.client.current_repo_id().await?;
        let options_by_name = self
            .client
            .get_dynamic_field_values(&repo_id, DYNAMIC_FIELD_PLACEHOLDER_ENTRY_ID, &request)
            .await?;

        let fields = self.get_template_fields(template_id).await?;
        let mut options_by_id = BTreeMap::new();
        for (name, options) in options_by_name {
            match fields.iter().find(|field| field.name == name) {
                Some(field) => {
                    options_by_id.insert(field.id, options);
                }
                None => warn!("Dynamic field {} not found in template {}", name, template_id),
            }
        }
        Ok(options_by_id)
    }

    /// Default values for new entries, from the injected provider.
    ///
    /// The provider sees the field definitions and template fields cached so
    /// far. Without a provider there are no defaults.
    pub async fn get_default_field_values(&self) -> Result<Vec<FieldValue>> {
        let Some(defaults) = &self.defaults else {
            return Ok(Vec::new());
        };

        let mut field_infos = self.field_definitions.get().cloned().unwrap_or_default();
        field_infos.extend(self.template_fields.value().await.unwrap_or_default());

        let values = defaults.get_default_field_values(&field_infos).await?;
        Ok(values.into_iter().map(|default| default.value).collect())
    }

    /// Whether the user picked a template by hand.
    pub fn template_was_manually_changed(&self) -> bool {
        self.template_changed.load(Ordering::Relaxed)
    }

    pub fn set_template_was_manually_changed(&self, changed: bool) {
        self.template_changed.store(changed, Ordering::Relaxed);
    }
}

/// First value of each named field, keyed by field name.
fn first_values_by_name(current_values: &FieldValues) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    for field_value in current_values.values() {
        let Some(name) = field_value.field_name.as_deref().filter(|n| !n.is_empty()) else {
            warn!("Dynamic field {} name not found", field_value.field_id);
            continue;
        };
        if let Some(first) = field_value.values.first() {
            result.insert(name.to_string(), first.value.clone());
        }
    }
    result
}
