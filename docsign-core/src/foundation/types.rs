use crate::foundation::SignatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

macro_rules! define_id_type {
    ($name:ident, $kind:literal) => {
        #[derive(Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Fresh random identifier (128 bits, hex).
            pub fn generate() -> Self {
                Self(crate::foundation::util::encoding::random_hex(16))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl FromStr for $name {
            type Err = SignatureError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed.contains(':') {
                    return Err(SignatureError::InvalidIdentifier { kind: $kind.to_string(), value: s.to_string() });
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

define_id_type!(DocumentId, "document id");
define_id_type!(TrainingId, "training id");
define_id_type!(ParticipantId, "participant id");
define_id_type!(SignatureId, "signature id");
define_id_type!(UserId, "user id");
