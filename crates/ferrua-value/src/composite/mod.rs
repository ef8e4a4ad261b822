//! Composite built-in types assembled from the scalar and identifier
//! layers.

pub mod data_value;
pub mod diagnostic;
pub mod extension_object;
pub mod localized_text;
pub mod qualified_name;

pub use data_value::DataValue;
pub use diagnostic::DiagnosticInfo;
pub use extension_object::{BodyEncoding, ExtensionObject};
pub use localized_text::LocalizedText;
pub use qualified_name::QualifiedName;
