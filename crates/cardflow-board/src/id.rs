#![forbid(unsafe_code)]

//! Identifier newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of an item (card), unique across the whole board.
    ItemId
);

string_id!(
    /// Identifier of a container (column), unique among containers.
    ContainerId
);

/// Which kind of entity a gesture is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Item,
    Container,
}

impl EntityKind {
    /// Returns the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Container => "container",
        }
    }
}

/// An entity that can be dragged: a single item or a whole container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DragEntity {
    Item(ItemId),
    Container(ContainerId),
}

impl DragEntity {
    /// Shorthand for an item entity.
    pub fn item(id: impl Into<ItemId>) -> Self {
        Self::Item(id.into())
    }

    /// Shorthand for a container entity.
    pub fn container(id: impl Into<ContainerId>) -> Self {
        Self::Container(id.into())
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Item(_) => EntityKind::Item,
            Self::Container(_) => EntityKind::Container,
        }
    }

    /// Raw identifier regardless of kind.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Item(id) => id.as_str(),
            Self::Container(id) => id.as_str(),
        }
    }
}

impl fmt::Display for DragEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind().as_str(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_transparently() {
        let id = ItemId::from("card-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"card-7\"");
    }

    #[test]
    fn entity_kind_and_display() {
        let entity = DragEntity::container("done");
        assert_eq!(entity.kind(), EntityKind::Container);
        assert_eq!(entity.id(), "done");
        assert_eq!(entity.to_string(), "container:done");
    }

    #[test]
    fn entity_serde_shape() {
        let json = serde_json::to_value(DragEntity::item("A")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "item", "id": "A"}));
    }
}
