//! Typed ID wrappers for characters and scenes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed IDs are plain strings underneath — no UUID enforcement, no
/// format requirement. The directory layout (§6 of the spec) and the
/// scene YAML choose the id; this wrapper only prevents mixing up a
/// character id with a scene id at the call site.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new typed ID from anything that converts to `String`.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

typed_id!(CharacterId, "Unique identifier for a character.");
typed_id!(SceneId, "Unique identifier for a scene.");
