//! Delivery addresses and their validation.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    /// Label such as "Home" or "Office".
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A single field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Name,
    Street,
    City,
    State,
    PostalCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: AddressField,
    pub message: &'static str,
}

/// Every problem found in an address, one per field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid delivery address: {}", .issues.iter().map(|i| i.message).collect::<Vec<_>>().join("; "))]
pub struct AddressError {
    pub issues: Vec<FieldIssue>,
}

impl AddressError {
    pub fn message_for(&self, field: AddressField) -> Option<&'static str> {
        self.issues
            .iter()
            .find(|i| i.field == field)
            .map(|i| i.message)
    }
}

impl DeliveryAddress {
    /// Checks the required fields and the 6-digit postal code.
    pub fn validate(&self) -> Result<(), AddressError> {
        let mut issues = Vec::new();
        let mut require = |value: &str, field, message| {
            if value.trim().is_empty() {
                issues.push(FieldIssue { field, message });
            }
        };
        require(&self.name, AddressField::Name, "Address name is required");
        require(&self.street, AddressField::Street, "Street address is required");
        require(&self.city, AddressField::City, "City is required");
        require(&self.state, AddressField::State, "State is required");

        let postal = self.postal_code.trim();
        if postal.is_empty() {
            issues.push(FieldIssue {
                field: AddressField::PostalCode,
                message: "Postal code is required",
            });
        } else if postal.len() != 6 || !postal.bytes().all(|b| b.is_ascii_digit()) {
            issues.push(FieldIssue {
                field: AddressField::PostalCode,
                message: "Please enter a valid 6-digit postal code",
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(AddressError { issues })
        }
    }
}

impl Display for DeliveryAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.postal_code
        )
    }
}
