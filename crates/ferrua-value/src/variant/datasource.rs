//! External datasources backing a variant.
//!
//! A datasource hands out point-in-time snapshots of its data. Every
//! successful `read` is paired with exactly one `release`; [`Snapshot`]
//! enforces the pairing by releasing on drop, whatever path the caller
//! takes out of the scope. A failed `read` hands nothing out, so nothing
//! is released for it.

use crate::core::value::Value;
use crate::error::ValueResult;

/// Array payload of a variant: the elements and, for multi-dimensional
/// data, the dimension list. `None` elements is the absent array.
#[derive(Debug, Default, PartialEq)]
pub struct VariantData {
    pub elements: Option<Vec<Value>>,
    pub dimensions: Option<Vec<i32>>,
}

impl VariantData {
    /// The elements as a slice, normalizing absent and zero-length to
    /// `None`.
    #[must_use]
    pub fn elements_slice(&self) -> Option<&[Value]> {
        match self.elements.as_deref() {
            None | Some([]) => None,
            some => some,
        }
    }
}

/// A provider of variant data that lives outside the variant.
///
/// `delete` is called exactly once, when the owning variant is cleared or
/// dropped.
pub trait Datasource: std::fmt::Debug {
    /// Produce a snapshot of the current data.
    ///
    /// # Errors
    ///
    /// Implementation-defined; a failed read hands out no snapshot and
    /// will not be released.
    fn read(&self) -> ValueResult<VariantData>;

    /// Return a snapshot obtained from [`read`](Self::read).
    fn release(&self, snapshot: &VariantData);

    /// The owning variant is going away; tear down the source.
    fn delete(&self);
}

/// Holds a snapshot read from a datasource and releases it on drop.
#[derive(Debug)]
pub struct Snapshot<'a> {
    source: &'a dyn Datasource,
    data: VariantData,
}

impl<'a> Snapshot<'a> {
    /// Read a snapshot from `source`.
    ///
    /// # Errors
    ///
    /// Maps the source's failure through unchanged; no guard is created.
    pub fn acquire(source: &'a dyn Datasource) -> ValueResult<Self> {
        let data = source.read().inspect_err(|err| {
            tracing::debug!(error = %err, "datasource read failed");
        })?;
        Ok(Self { source, data })
    }

    /// The snapshotted data.
    #[must_use]
    pub fn data(&self) -> &VariantData {
        &self.data
    }
}

impl std::ops::Deref for Snapshot<'_> {
    type Target = VariantData;

    fn deref(&self) -> &VariantData {
        &self.data
    }
}

impl Drop for Snapshot<'_> {
    fn drop(&mut self) {
        self.source.release(&self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Probe {
        reads: AtomicUsize,
        releases: AtomicUsize,
        fail_read: bool,
    }

    impl Datasource for Probe {
        fn read(&self) -> ValueResult<VariantData> {
            if self.fail_read {
                return Err(ValueError::datasource_failure("probe refuses"));
            }
            self.reads.fetch_add(1, Ordering::Relaxed);
            Ok(VariantData {
                elements: Some(vec![Value::Int32(1)]),
                dimensions: None,
            })
        }

        fn release(&self, _snapshot: &VariantData) {
            self.releases.fetch_add(1, Ordering::Relaxed);
        }

        fn delete(&self) {}
    }

    #[test]
    fn snapshot_releases_on_drop() {
        let probe = Probe::default();
        {
            let snapshot = Snapshot::acquire(&probe).unwrap();
            assert_eq!(snapshot.elements_slice().map(<[Value]>::len), Some(1));
        }
        assert_eq!(probe.reads.load(Ordering::Relaxed), 1);
        assert_eq!(probe.releases.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn failed_read_releases_nothing() {
        let probe = Probe {
            fail_read: true,
            ..Probe::default()
        };
        assert!(Snapshot::acquire(&probe).is_err());
        assert_eq!(probe.releases.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn empty_elements_normalize_to_absent() {
        let data = VariantData {
            elements: Some(Vec::new()),
            dimensions: None,
        };
        assert_eq!(data.elements_slice(), None);
    }
}
