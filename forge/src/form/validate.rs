//! Field and whole-form validation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::attachment::{has_zip_suffix, ZipAttachment};
use crate::models::deploy::{DeployForm, DeployRequest, Field};
use crate::models::region::is_known_region;

/// Largest archive accepted for upload (100 MiB)
pub const MAX_ZIP_SIZE: u64 = 100 * 1024 * 1024;

static OWNER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

static STORAGE_ACCOUNT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]{3,24}$").unwrap());

/// Accepts any prefix of a valid storage account name
static STORAGE_ACCOUNT_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]{0,24}$").unwrap());

pub const LOCATION_REQUIRED: &str = "Please select a location";
pub const LOCATION_UNKNOWN: &str = "Please select a valid location";
pub const ENVIRONMENT_REQUIRED: &str = "Environment is required";
pub const ENVIRONMENT_TOO_SHORT: &str = "Environment must be at least 2 characters";
pub const OWNER_REQUIRED: &str = "Owner is required";
pub const OWNER_INVALID: &str = "Owner can only contain letters, numbers, hyphens, and underscores";
pub const STORAGE_REQUIRED: &str = "Storage account name is required";
pub const STORAGE_INVALID: &str =
    "Storage account name must be 3-24 characters, lowercase letters and numbers only";
pub const ZIP_REQUIRED: &str = "Please select a ZIP file";
pub const ZIP_WRONG_TYPE: &str = "Please select a valid ZIP file";
pub const ZIP_TOO_LARGE: &str = "File size must be less than 100MB";

const STORAGE_HINT_CHARSET: &str =
    "Storage account name must contain only lowercase letters and numbers";
const STORAGE_HINT_LENGTH: &str = "Storage account name must be at least 3 characters";

/// Outcome of validating a single field or the whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub valid: bool,
    pub message: Option<String>,
}

impl FieldValidation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<(), String> {
        match self.message {
            Some(message) if !self.valid => Err(message),
            _ => Ok(()),
        }
    }
}

/// Validate one field's raw value. For `zip_file` the value is the file name.
pub fn validate_field(field: Field, raw: &str) -> FieldValidation {
    match field {
        Field::Location => {
            if raw.is_empty() {
                FieldValidation::invalid(LOCATION_REQUIRED)
            } else if !is_known_region(raw) {
                FieldValidation::invalid(LOCATION_UNKNOWN)
            } else {
                FieldValidation::ok()
            }
        }
        Field::Environment => {
            let value = raw.trim();
            if value.is_empty() {
                FieldValidation::invalid(ENVIRONMENT_REQUIRED)
            } else if value.chars().count() < 2 {
                FieldValidation::invalid(ENVIRONMENT_TOO_SHORT)
            } else {
                FieldValidation::ok()
            }
        }
        Field::Owner => {
            if raw.is_empty() {
                FieldValidation::invalid(OWNER_REQUIRED)
            } else if !OWNER_REGEX.is_match(raw) {
                FieldValidation::invalid(OWNER_INVALID)
            } else {
                FieldValidation::ok()
            }
        }
        Field::StorageAccountName => {
            if raw.is_empty() {
                FieldValidation::invalid(STORAGE_REQUIRED)
            } else if !STORAGE_ACCOUNT_REGEX.is_match(raw) {
                FieldValidation::invalid(STORAGE_INVALID)
            } else {
                FieldValidation::ok()
            }
        }
        Field::ZipFile => {
            if raw.is_empty() {
                FieldValidation::invalid(ZIP_REQUIRED)
            } else if !has_zip_suffix(raw) {
                FieldValidation::invalid(ZIP_WRONG_TYPE)
            } else {
                FieldValidation::ok()
            }
        }
    }
}

/// Check an attachment's presence, type and size
pub fn validate_attachment(attachment: Option<&ZipAttachment>) -> FieldValidation {
    match attachment {
        None => FieldValidation::invalid(ZIP_REQUIRED),
        Some(zip) if zip.size() == 0 => FieldValidation::invalid(ZIP_REQUIRED),
        Some(zip) if !zip.has_zip_suffix() => FieldValidation::invalid(ZIP_WRONG_TYPE),
        Some(zip) if zip.size() > MAX_ZIP_SIZE => FieldValidation::invalid(ZIP_TOO_LARGE),
        Some(_) => FieldValidation::ok(),
    }
}

/// First failing field in location, environment, owner, storage account,
/// zip file order, with its message
pub fn first_failure(form: &DeployForm) -> Option<(Field, String)> {
    Field::ALL.into_iter().find_map(|field| {
        let result = match field {
            Field::ZipFile => validate_attachment(form.zip_file.as_ref()),
            _ => validate_field(field, form.value(field)),
        };
        result.into_result().err().map(|message| (field, message))
    })
}

/// Re-check the whole form, reporting only the first failing field
pub fn validate_form_data(form: &DeployForm) -> FieldValidation {
    match first_failure(form) {
        Some((_, message)) => FieldValidation::invalid(message),
        None => FieldValidation::ok(),
    }
}

/// Build a sendable request, or return the first validation message
pub fn validated_request(form: &DeployForm) -> Result<DeployRequest, String> {
    validate_form_data(form).into_result()?;
    match &form.zip_file {
        Some(zip) => Ok(DeployRequest::new(form, zip.clone())),
        None => Err(ZIP_REQUIRED.to_string()),
    }
}

/// Live hint while the storage account name is being typed
pub fn storage_name_hint(partial: &str) -> Option<&'static str> {
    if partial.is_empty() {
        None
    } else if !STORAGE_ACCOUNT_PREFIX_REGEX.is_match(partial) {
        Some(STORAGE_HINT_CHARSET)
    } else if partial.len() < 3 {
        Some(STORAGE_HINT_LENGTH)
    } else {
        None
    }
}
