//! Lead record captured by the sales page form
//!
//! A lead is a prospective customer's contact submission. The same record type
//! travels from the browser form, through the lead API, into the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message shown when a required field is missing
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Path of the lead API endpoint
pub const LEADS_ENDPOINT: &str = "/api/leads";

/// Message shown when a blocking submission could not be persisted
pub const PERSISTENCE_FAILED_MESSAGE: &str = "Something went wrong. Please try again";

/// Contact details submitted through the lead capture form.
///
/// `created_at` is not part of the record; the store stamps it at write time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadRecord {
    pub full_name: String,
    pub email: String,
    pub telephone: String,
    pub business_name: String,
    pub goal: String,
}

/// Form fields of a [`LeadRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    FullName,
    Email,
    Telephone,
    BusinessName,
    Goal,
}

impl LeadField {
    /// All fields in document order
    pub const ALL: [LeadField; 5] = [
        LeadField::FullName,
        LeadField::Email,
        LeadField::Telephone,
        LeadField::BusinessName,
        LeadField::Goal,
    ];

    /// Field name as stored in the collection and used for input ids
    pub fn name(&self) -> &'static str {
        match self {
            LeadField::FullName => "full_name",
            LeadField::Email => "email",
            LeadField::Telephone => "telephone",
            LeadField::BusinessName => "business_name",
            LeadField::Goal => "goal",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            LeadField::FullName | LeadField::Email | LeadField::Telephone
        )
    }
}

/// Required-field validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingRequired(Vec<LeadField>),
}

impl ValidationError {
    /// Fields that failed validation
    pub fn fields(&self) -> &[LeadField] {
        match self {
            ValidationError::MissingRequired(fields) => fields,
        }
    }
}

impl LeadRecord {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            telephone: telephone.into(),
            ..Default::default()
        }
    }

    pub fn with_business_name(mut self, business_name: impl Into<String>) -> Self {
        self.business_name = business_name.into();
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::FullName => &self.full_name,
            LeadField::Email => &self.email,
            LeadField::Telephone => &self.telephone,
            LeadField::BusinessName => &self.business_name,
            LeadField::Goal => &self.goal,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let slot = match field {
            LeadField::FullName => &mut self.full_name,
            LeadField::Email => &mut self.email,
            LeadField::Telephone => &mut self.telephone,
            LeadField::BusinessName => &mut self.business_name,
            LeadField::Goal => &mut self.goal,
        };
        *slot = value.into();
    }

    /// Check that every required field carries a non-blank value
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<LeadField> = LeadField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.get(*field).trim().is_empty())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingRequired(missing))
        }
    }

    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Acknowledgement returned once a lead has been written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadReceipt {
    /// Store-generated document identifier
    pub id: String,
    /// Server-assigned creation time, when the store reported one
    pub created_at: Option<DateTime<Utc>>,
}
