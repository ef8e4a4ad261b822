//! Node identifiers qualified for cross-server addressing.

use std::fmt;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::identifier::NodeId;
use crate::scalar::UaString;

/// A [`NodeId`] plus an optional namespace URI and a remote server index.
///
/// The URI and server index qualify where the id is resolved; nullity is
/// decided by the inner node id alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    pub namespace_uri: UaString,
    pub server_index: u32,
}

impl ExpandedNodeId {
    /// Wrap a plain node id (no URI, local server).
    #[must_use]
    pub fn local(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: UaString::null(),
            server_index: 0,
        }
    }

    /// Null iff the inner node id is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.node_id.is_null()
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        if !self.namespace_uri.is_null() {
            write!(f, "nsu={};", self.namespace_uri)?;
        }
        write!(f, "{}", self.node_id)
    }
}

impl BuiltinType for ExpandedNodeId {
    const TYPE_ID: TypeId = TypeId::ExpandedNodeId;
    const NAME: &'static str = "ExpandedNodeId";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self {
            node_id: self.node_id.deep_copy()?,
            namespace_uri: self.namespace_uri.deep_copy()?,
            server_index: self.server_index,
        })
    }

    fn wrap(self) -> Value {
        Value::ExpandedNodeId(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::ExpandedNodeId(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::ExpandedNodeId(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullity_ignores_uri_and_server_index() {
        let mut id = ExpandedNodeId::local(NodeId::numeric(0, 0));
        id.namespace_uri = UaString::from_text("urn:factory:line4");
        id.server_index = 3;
        assert!(id.is_null());

        id.node_id = NodeId::numeric(0, 9);
        assert!(!id.is_null());
    }

    #[test]
    fn copy_round_trips_all_members() {
        let id = ExpandedNodeId {
            node_id: NodeId::string(5, "valve"),
            namespace_uri: UaString::from_text("urn:factory:line4"),
            server_index: 2,
        };
        let copy = id.deep_copy().unwrap();
        assert_eq!(copy, id);
    }

    #[test]
    fn renders_qualifiers_only_when_present() {
        let plain = ExpandedNodeId::local(NodeId::numeric(1, 7));
        assert_eq!(plain.to_string(), "ns=1;i=7");

        let qualified = ExpandedNodeId {
            node_id: NodeId::numeric(1, 7),
            namespace_uri: UaString::from_text("urn:x"),
            server_index: 4,
        };
        assert_eq!(qualified.to_string(), "svr=4;nsu=urn:x;ns=1;i=7");
    }
}
