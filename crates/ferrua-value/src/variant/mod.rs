//! The discriminated variant: one slot holding a scalar or array of any
//! built-in type, with three storage modes.
//!
//! Owned storage holds its data and releases it on clear. Borrowed storage
//! shares immutable data and releases only its reference. External storage
//! delegates to a [`Datasource`]; every access goes through a read/release
//! pair and the source's `delete` runs exactly once when the variant goes
//! away. A scalar is the one-element array with no dimension list.

pub mod datasource;

pub use datasource::{Datasource, Snapshot, VariantData};

use std::fmt;
use std::mem;
use std::sync::Arc;

use crate::core::array;
use crate::core::kind::TypeId;
use crate::core::limits::ValueLimits;
use crate::core::ops::{type_ops, BuiltinType, TypeOps};
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};

/// Shared, immutable variant data.
#[derive(Debug, Default)]
pub struct BorrowedData {
    pub elements: Option<Arc<[Value]>>,
    pub dimensions: Option<Vec<i32>>,
}

impl BorrowedData {
    fn elements_slice(&self) -> Option<&[Value]> {
        match self.elements.as_deref() {
            None | Some([]) => None,
            some => some,
        }
    }
}

/// Where a variant's data lives.
#[derive(Debug)]
enum VariantStorage {
    Owned(VariantData),
    Borrowed(BorrowedData),
    External(Box<dyn Datasource>),
}

/// A runtime-typed scalar or array of one built-in type.
#[derive(Debug)]
pub struct Variant {
    ops: &'static TypeOps,
    storage: VariantStorage,
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            ops: type_ops(TypeId::Invalid),
            storage: VariantStorage::Owned(VariantData::default()),
        }
    }
}

impl Variant {
    /// The operation table of the element type.
    #[must_use]
    pub fn ops(&self) -> &'static TypeOps {
        self.ops
    }

    /// The element type id.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.ops.type_id
    }

    /// Whether the data lives behind a datasource.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self.storage, VariantStorage::External(_))
    }

    /// Whether the variant holds no data. Always `false` for external
    /// storage, whose contents are only known at read time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.storage {
            VariantStorage::Owned(data) => data.elements_slice().is_none(),
            VariantStorage::Borrowed(data) => data.elements_slice().is_none(),
            VariantStorage::External(_) => false,
        }
    }

    /// Whether the variant holds exactly one element and no dimension
    /// list. `false` for external storage.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.dimensions().is_none()
            && self
                .elements_slice()
                .is_some_and(|elements| elements.len() == 1)
    }

    /// Whether the variant holds in-process array data: anything non-empty
    /// that is not a scalar.
    #[must_use]
    pub fn is_array(&self) -> bool {
        !self.is_empty() && !self.is_scalar() && !self.is_external()
    }

    /// The single element of a scalar variant.
    #[must_use]
    pub fn scalar(&self) -> Option<&Value> {
        if self.is_scalar() {
            self.elements_slice().map(|elements| &elements[0])
        } else {
            None
        }
    }

    /// The dimension list, when present. `None` for external storage.
    #[must_use]
    pub fn dimensions(&self) -> Option<&[i32]> {
        match &self.storage {
            VariantStorage::Owned(data) => data.dimensions.as_deref(),
            VariantStorage::Borrowed(data) => data.dimensions.as_deref(),
            VariantStorage::External(_) => None,
        }
    }

    fn elements_slice(&self) -> Option<&[Value]> {
        match &self.storage {
            VariantStorage::Owned(data) => data.elements_slice(),
            VariantStorage::Borrowed(data) => data.elements_slice(),
            VariantStorage::External(_) => None,
        }
    }

    /// Run `f` over the variant's elements, reading through the datasource
    /// for external storage. The snapshot is released before this returns.
    ///
    /// # Errors
    ///
    /// Propagates a datasource read failure.
    pub fn with_elements<R>(&self, f: impl FnOnce(Option<&[Value]>) -> R) -> ValueResult<R> {
        match &self.storage {
            VariantStorage::Owned(data) => Ok(f(data.elements_slice())),
            VariantStorage::Borrowed(data) => Ok(f(data.elements_slice())),
            VariantStorage::External(source) => {
                let snapshot = Snapshot::acquire(source.as_ref())?;
                Ok(f(snapshot.elements_slice()))
            }
        }
    }

    /// Replace the contents with an owned copy of one scalar value.
    ///
    /// # Errors
    ///
    /// [`ValueError::InvalidValue`] for the invalid-type sentinel; the
    /// variant is untouched on failure.
    pub fn set_scalar(&mut self, value: &Value) -> ValueResult<()> {
        if value.is_invalid() {
            return Err(ValueError::invalid_value(
                "a variant cannot hold the invalid type",
            ));
        }
        let ops = value.ops();
        let mut slot = Value::default();
        (ops.copy)(value, &mut slot)?;

        self.clear();
        self.ops = ops;
        self.storage = VariantStorage::Owned(VariantData {
            elements: Some(vec![slot]),
            dimensions: None,
        });
        Ok(())
    }

    /// Replace the contents with an owned copy of `src`.
    ///
    /// `None` or empty `src` yields the empty variant typed as `ops`.
    ///
    /// # Errors
    ///
    /// Rejects the invalid element type, counts over the ceiling, and any
    /// element-copy failure. The variant is untouched on failure.
    pub fn set_array(
        &mut self,
        src: Option<&[Value]>,
        ops: &'static TypeOps,
        limits: &ValueLimits,
    ) -> ValueResult<()> {
        self.set_array_with_dimensions(src, None, ops, limits)
    }

    /// Replace the contents with an owned copy of `src`, recording a
    /// dimension list.
    ///
    /// # Errors
    ///
    /// As [`set_array`](Self::set_array); additionally rejects a dimension
    /// list whose product differs from the element count or that contains
    /// a non-positive extent.
    pub fn set_array_with_dimensions(
        &mut self,
        src: Option<&[Value]>,
        dimensions: Option<&[i32]>,
        ops: &'static TypeOps,
        limits: &ValueLimits,
    ) -> ValueResult<()> {
        if ops.type_id.is_invalid() {
            return Err(ValueError::invalid_value(
                "a variant cannot hold the invalid type",
            ));
        }
        let count = src.map_or(0, <[Value]>::len);
        if let Some(dims) = dimensions {
            check_dimensions(dims, count, limits)?;
        }
        let data = copy_data(src, dimensions, ops, limits)?;

        self.clear();
        self.ops = ops;
        self.storage = VariantStorage::Owned(data);
        Ok(())
    }

    /// Replace the contents with a shared reference to `elements`, without
    /// copying. The data is released (not cleared) when the variant is.
    ///
    /// # Errors
    ///
    /// Rejects the invalid element type, counts over the ceiling, and any
    /// element whose type differs from `ops`.
    pub fn set_borrowed(
        &mut self,
        elements: Arc<[Value]>,
        dimensions: Option<Vec<i32>>,
        ops: &'static TypeOps,
        limits: &ValueLimits,
    ) -> ValueResult<()> {
        if ops.type_id.is_invalid() {
            return Err(ValueError::invalid_value(
                "a variant cannot hold the invalid type",
            ));
        }
        limits.check_array_length(elements.len())?;
        if let Some(dims) = &dimensions {
            check_dimensions(dims, elements.len(), limits)?;
        }
        if let Some(stray) = elements.iter().find(|e| e.type_id() != ops.type_id) {
            return Err(ValueError::type_mismatch(ops.name, stray.type_name()));
        }

        self.clear();
        self.ops = ops;
        self.storage = VariantStorage::Borrowed(BorrowedData {
            elements: Some(elements),
            dimensions,
        });
        Ok(())
    }

    /// Replace the contents with a datasource typed as `ops`. The source's
    /// `delete` runs when the variant is cleared or dropped.
    ///
    /// # Errors
    ///
    /// Rejects the invalid element type; the source is not installed and
    /// its `delete` does not run.
    pub fn set_external(
        &mut self,
        ops: &'static TypeOps,
        source: Box<dyn Datasource>,
    ) -> ValueResult<()> {
        if ops.type_id.is_invalid() {
            return Err(ValueError::invalid_value(
                "a variant cannot hold the invalid type",
            ));
        }
        self.clear();
        self.ops = ops;
        self.storage = VariantStorage::External(source);
        Ok(())
    }

    /// Deep-copy this variant into `dst`. The destination always ends up
    /// with owned storage, whatever this variant's storage mode; external
    /// sources are read and released around the copy.
    ///
    /// # Errors
    ///
    /// Fails when `dst` is datasource-backed (it is left untouched), on a
    /// failed datasource read, on counts over the ceiling, and on any
    /// element-copy failure. On failure `dst` keeps its previous contents.
    pub fn deep_copy_into(&self, dst: &mut Variant, limits: &ValueLimits) -> ValueResult<()> {
        if dst.is_external() {
            return Err(ValueError::invalid_value(
                "cannot copy into a datasource-backed variant",
            ));
        }
        let data = match &self.storage {
            VariantStorage::Owned(data) => {
                copy_data(data.elements_slice(), data.dimensions.as_deref(), self.ops, limits)?
            }
            VariantStorage::Borrowed(data) => {
                copy_data(data.elements_slice(), data.dimensions.as_deref(), self.ops, limits)?
            }
            VariantStorage::External(source) => {
                // The snapshot guard releases whether the copy succeeds or
                // the error propagates out of this arm.
                let snapshot = Snapshot::acquire(source.as_ref())?;
                copy_data(
                    snapshot.elements_slice(),
                    snapshot.dimensions.as_deref(),
                    self.ops,
                    limits,
                )?
            }
        };

        dst.clear();
        dst.ops = self.ops;
        dst.storage = VariantStorage::Owned(data);
        Ok(())
    }

    /// Release the contents and reset to the empty, invalid-typed variant.
    ///
    /// Owned elements are cleared individually; borrowed data only drops
    /// its reference; an external source gets its one `delete` call.
    /// Idempotent.
    pub fn clear(&mut self) {
        let ops = self.ops;
        self.ops = type_ops(TypeId::Invalid);
        match mem::replace(&mut self.storage, VariantStorage::Owned(VariantData::default())) {
            VariantStorage::Owned(mut data) => array::release(&mut data.elements, ops),
            VariantStorage::Borrowed(_) => {}
            VariantStorage::External(source) => source.delete(),
        }
    }
}

impl Drop for Variant {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Equality compares type, dimensions and elements value by value.
/// External storage never compares equal, not even to itself: its contents
/// are a moving target.
impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        if self.is_external() || other.is_external() {
            return false;
        }
        if self.ops.type_id != other.ops.type_id {
            return false;
        }
        if self.dimensions().unwrap_or(&[]) != other.dimensions().unwrap_or(&[]) {
            return false;
        }
        match (self.elements_slice(), other.elements_slice()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (self.ops.equal)(x, y))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_external() {
            return write!(f, "Variant{{{}, external}}", self.ops.name);
        }
        match self.elements_slice() {
            None => f.write_str("Variant{empty}"),
            Some([one]) if self.dimensions().is_none() => {
                write!(f, "Variant{{{}, {}}}", self.ops.name, (self.ops.render)(one))
            }
            Some(elements) => {
                write!(f, "Variant{{{}, array[{}]}}", self.ops.name, elements.len())
            }
        }
    }
}

impl BuiltinType for Variant {
    const TYPE_ID: TypeId = TypeId::Variant;
    const NAME: &'static str = "Variant";

    fn deep_copy(&self) -> ValueResult<Self> {
        let mut dst = Variant::default();
        self.deep_copy_into(&mut dst, &ValueLimits::default())?;
        Ok(dst)
    }

    fn clear(&mut self) {
        Variant::clear(self);
    }

    fn wrap(self) -> Value {
        Value::Variant(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::Variant(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::Variant(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}

/// Copy elements and the dimension list into fresh owned storage. If the
/// dimension list is over the ceiling, the already-copied elements are
/// released before the error returns.
fn copy_data(
    elements: Option<&[Value]>,
    dimensions: Option<&[i32]>,
    ops: &'static TypeOps,
    limits: &ValueLimits,
) -> ValueResult<VariantData> {
    let copied = array::copy(elements, ops, limits)?;
    let dimensions = match dimensions {
        Some(dims) if !dims.is_empty() => {
            if let Err(err) = limits.check_array_length(dims.len()) {
                let mut partial = copied;
                array::release(&mut partial, ops);
                return Err(err);
            }
            Some(dims.to_vec())
        }
        _ => None,
    };
    Ok(VariantData {
        elements: copied,
        dimensions,
    })
}

fn check_dimensions(dims: &[i32], count: usize, limits: &ValueLimits) -> ValueResult<()> {
    limits.check_array_length(dims.len())?;
    let mut product: u64 = 1;
    for &extent in dims {
        if extent <= 0 {
            return Err(ValueError::invalid_argument(
                "array dimensions must be positive",
            ));
        }
        product = product.saturating_mul(extent as u64);
    }
    if product != count as u64 {
        return Err(ValueError::invalid_argument(
            "dimension product does not match the element count",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn int_array(values: &[i32]) -> Vec<Value> {
        values.iter().map(|&v| Value::Int32(v)).collect()
    }

    #[test]
    fn default_is_empty_and_invalid_typed() {
        let v = Variant::default();
        assert!(v.is_empty());
        assert!(!v.is_scalar());
        assert!(!v.is_array());
        assert_eq!(v.type_id(), TypeId::Invalid);
    }

    #[test]
    fn set_scalar_copies_the_value() {
        let mut v = Variant::default();
        v.set_scalar(&Value::Double(2.5)).unwrap();
        assert!(v.is_scalar());
        assert_eq!(v.type_id(), TypeId::Double);
        assert_eq!(v.scalar(), Some(&Value::Double(2.5)));
    }

    #[test]
    fn set_scalar_rejects_the_invalid_sentinel() {
        let mut v = Variant::default();
        v.set_scalar(&Value::Byte(7)).unwrap();
        assert!(v.set_scalar(&Value::default()).is_err());
        // Untouched on failure.
        assert_eq!(v.scalar(), Some(&Value::Byte(7)));
    }

    #[test]
    fn set_array_copies_elements() {
        let src = int_array(&[1, 2, 3]);
        let mut v = Variant::default();
        v.set_array(Some(&src[..]), type_ops(TypeId::Int32), &ValueLimits::default())
            .unwrap();
        assert!(v.is_array());
        assert_eq!(v.elements_slice().map(<[Value]>::len), Some(3));
        assert_eq!(v, {
            let mut w = Variant::default();
            w.set_array(Some(&src[..]), type_ops(TypeId::Int32), &ValueLimits::default())
                .unwrap();
            w
        });
    }

    #[test]
    fn set_array_rejects_mixed_element_types() {
        let src = vec![Value::Int32(1), Value::Boolean(true)];
        let mut v = Variant::default();
        let err = v
            .set_array(Some(&src[..]), type_ops(TypeId::Int32), &ValueLimits::default())
            .unwrap_err();
        assert!(matches!(err, ValueError::TypeMismatch { .. }));
        assert!(v.is_empty());
    }

    #[test]
    fn empty_array_is_the_empty_variant_of_that_type() {
        let mut v = Variant::default();
        v.set_array(None, type_ops(TypeId::Float), &ValueLimits::default())
            .unwrap();
        assert!(v.is_empty());
        assert_eq!(v.type_id(), TypeId::Float);
    }

    #[test]
    fn dimensions_must_multiply_to_the_count() {
        let src = int_array(&[1, 2, 3, 4, 5, 6]);
        let ops = type_ops(TypeId::Int32);
        let limits = ValueLimits::default();

        let mut v = Variant::default();
        v.set_array_with_dimensions(Some(&src[..]), Some(&[2, 3][..]), ops, &limits)
            .unwrap();
        assert_eq!(v.dimensions(), Some(&[2, 3][..]));

        let mut w = Variant::default();
        assert!(w
            .set_array_with_dimensions(Some(&src[..]), Some(&[2, 2][..]), ops, &limits)
            .is_err());
        assert!(w
            .set_array_with_dimensions(Some(&src[..]), Some(&[-2, -3][..]), ops, &limits)
            .is_err());
    }

    #[test]
    fn borrowed_storage_shares_without_copying() {
        let shared: Arc<[Value]> = int_array(&[10, 20]).into();
        let ops = type_ops(TypeId::Int32);
        let limits = ValueLimits::default();

        let mut v = Variant::default();
        v.set_borrowed(Arc::clone(&shared), None, ops, &limits)
            .unwrap();
        assert_eq!(Arc::strong_count(&shared), 2);

        let mut w = Variant::default();
        w.set_borrowed(Arc::clone(&shared), None, ops, &limits)
            .unwrap();
        assert_eq!(v, w);

        v.clear();
        assert_eq!(Arc::strong_count(&shared), 2);
        drop(w);
        assert_eq!(Arc::strong_count(&shared), 1);
        // The shared data survives every release.
        assert_eq!(shared[0], Value::Int32(10));
    }

    #[test]
    fn borrowed_storage_rejects_foreign_elements() {
        let shared: Arc<[Value]> = vec![Value::Boolean(true)].into();
        let mut v = Variant::default();
        assert!(v
            .set_borrowed(
                shared,
                None,
                type_ops(TypeId::Int32),
                &ValueLimits::default()
            )
            .is_err());
    }

    #[test]
    fn copy_of_borrowed_becomes_owned() {
        let shared: Arc<[Value]> = int_array(&[7]).into();
        let mut v = Variant::default();
        v.set_borrowed(
            shared,
            None,
            type_ops(TypeId::Int32),
            &ValueLimits::default(),
        )
        .unwrap();

        let copy = v.deep_copy().unwrap();
        assert!(!copy.is_external());
        assert_eq!(copy.scalar(), Some(&Value::Int32(7)));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut v = Variant::default();
        v.set_scalar(&Value::String(crate::scalar::UaString::from_text("x")))
            .unwrap();
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.type_id(), TypeId::Invalid);
        v.clear();
        assert!(v.is_empty());
    }

    #[test]
    fn set_over_existing_contents_releases_them_first() {
        let mut v = Variant::default();
        v.set_scalar(&Value::Int32(1)).unwrap();
        v.set_scalar(&Value::Boolean(true)).unwrap();
        assert_eq!(v.type_id(), TypeId::Boolean);
        assert_eq!(v.scalar(), Some(&Value::Boolean(true)));
    }

    #[test]
    fn equality_normalizes_empty_and_ignores_values_of_other_types() {
        let ops = type_ops(TypeId::Int32);
        let limits = ValueLimits::default();

        let mut a = Variant::default();
        a.set_array(None, ops, &limits).unwrap();
        let mut b = Variant::default();
        b.set_array(Some(&[][..]), ops, &limits).unwrap();
        assert_eq!(a, b);

        let mut c = Variant::default();
        c.set_array(None, type_ops(TypeId::Float), &limits).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn nested_variants_copy_recursively() {
        let mut inner = Variant::default();
        inner.set_scalar(&Value::Int32(5)).unwrap();

        let mut outer = Variant::default();
        outer.set_scalar(&Value::Variant(inner)).unwrap();

        let copy = outer.deep_copy().unwrap();
        assert_eq!(copy, outer);
        match copy.scalar() {
            Some(Value::Variant(v)) => assert_eq!(v.scalar(), Some(&Value::Int32(5))),
            other => panic!("expected a nested variant, got {other:?}"),
        }
    }

    #[test]
    fn display_names_the_shape() {
        let mut v = Variant::default();
        assert_eq!(v.to_string(), "Variant{empty}");
        v.set_scalar(&Value::Int32(3)).unwrap();
        assert_eq!(v.to_string(), "Variant{Int32, 3}");
        v.set_array(
            Some(&int_array(&[1, 2])),
            type_ops(TypeId::Int32),
            &ValueLimits::default(),
        )
        .unwrap();
        assert_eq!(v.to_string(), "Variant{Int32, array[2]}");
    }
}
