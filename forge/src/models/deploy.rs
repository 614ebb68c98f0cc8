//! Deploy form, request and backend response models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::attachment::ZipAttachment;
use crate::models::region::DEFAULT_REGION;

/// A field of the deploy form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Location,
    Environment,
    Owner,
    StorageAccountName,
    ZipFile,
}

impl Field {
    /// All fields in validation order
    pub const ALL: [Field; 5] = [
        Field::Location,
        Field::Environment,
        Field::Owner,
        Field::StorageAccountName,
        Field::ZipFile,
    ];

    /// Multipart / form field name
    pub fn name(&self) -> &'static str {
        match self {
            Field::Location => "location",
            Field::Environment => "environment",
            Field::Owner => "owner",
            Field::StorageAccountName => "storage_account_name",
            Field::ZipFile => "zip_file",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("Unknown form field: {}", s))
    }
}

/// Raw, unvalidated form contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployForm {
    pub location: String,
    pub environment: String,
    pub owner: String,
    pub storage_account_name: String,
    pub zip_file: Option<ZipAttachment>,
}

impl Default for DeployForm {
    fn default() -> Self {
        Self {
            location: DEFAULT_REGION.to_string(),
            environment: String::new(),
            owner: String::new(),
            storage_account_name: String::new(),
            zip_file: None,
        }
    }
}

impl DeployForm {
    /// Current text value of a field; the file name for `zip_file`
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Location => &self.location,
            Field::Environment => &self.environment,
            Field::Owner => &self.owner,
            Field::StorageAccountName => &self.storage_account_name,
            Field::ZipFile => self.zip_file.as_ref().map(|z| z.file_name()).unwrap_or(""),
        }
    }

    /// Set a text field. `zip_file` is attached through file acquisition instead.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Location => self.location = value,
            Field::Environment => self.environment = value,
            Field::Owner => self.owner = value,
            Field::StorageAccountName => self.storage_account_name = value,
            Field::ZipFile => {}
        }
    }
}

/// A form that passed validation, ready to be sent
///
/// Only [`crate::form::validate::validated_request`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    location: String,
    environment: String,
    owner: String,
    storage_account_name: String,
    zip_file: ZipAttachment,
}

impl DeployRequest {
    pub(crate) fn new(form: &DeployForm, zip_file: ZipAttachment) -> Self {
        Self {
            location: form.location.clone(),
            environment: form.environment.trim().to_string(),
            owner: form.owner.clone(),
            storage_account_name: form.storage_account_name.clone(),
            zip_file,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn storage_account_name(&self) -> &str {
        &self.storage_account_name
    }

    pub fn zip_file(&self) -> &ZipAttachment {
        &self.zip_file
    }

    /// Text parts of the multipart body, in form order
    pub fn text_fields(&self) -> [(&'static str, &str); 4] {
        [
            (Field::Location.name(), self.location.as_str()),
            (Field::Environment.name(), self.environment.as_str()),
            (Field::Owner.name(), self.owner.as_str()),
            (Field::StorageAccountName.name(), self.storage_account_name.as_str()),
        ]
    }
}

/// Body of `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terraform_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az_path: Option<String>,
}

impl StatusResult {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Body of `POST /deploy`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployResult {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_account_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What a successful deployment reports back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedSite {
    pub url: String,
    pub resource_group_name: String,
    pub storage_account_name: String,
}
