//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers used across the VoxCLOUD
//! conformance kit. Each identifier is a distinct type — you cannot pass
//! a [`FacilityCode`] where a [`DeviceId`] is expected.
//!
//! ## Validation
//!
//! Both identifiers validate format at construction time. Deserialization
//! routes through the validating constructor so invalid values are
//! rejected at decode time — not silently accepted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A provider-assigned device identifier.
///
/// VoxCLOUD assigns device ids at provisioning time and reports them as
/// decimal strings in response bodies. The newtype requires a non-empty
/// all-digit string; everything else (including the `0` sentinel the
/// provider rejects server-side) is representable so that error-path
/// tests can round-trip it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a device identifier, validating the format.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "device id" });
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "device id",
                reason: format!("expected decimal digits, got {raw:?}"),
            });
        }
        Ok(Self(raw))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DeviceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl_validating_deserialize!(DeviceId);

/// A data-center facility code (e.g. `LDJ1` for London, `LGA6` for
/// New York). Uppercase alphanumeric, 2-8 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FacilityCode(String);

impl FacilityCode {
    /// Create a facility code, validating the format.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: "facility code",
            });
        }
        if raw.len() < 2 || raw.len() > 8 {
            return Err(ValidationError::InvalidLength {
                field: "facility code",
                expected: "2-8 characters",
                actual: raw.len(),
            });
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(ValidationError::InvalidFormat {
                field: "facility code",
                reason: format!("expected uppercase alphanumerics, got {raw:?}"),
            });
        }
        Ok(Self(raw))
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FacilityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FacilityCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl_validating_deserialize!(FacilityCode);
