//! The runtime-typed array engine.
//!
//! Operates on homogeneous sequences of [`Value`] through a type's
//! operation table rather than a compile-time element type. Counts are
//! signed at the API edge because that is how lengths travel on the wire:
//! any count `<= 0` is the absent array, represented as `None` — a
//! zero-length buffer is never allocated.

use crate::core::limits::ValueLimits;
use crate::core::ops::TypeOps;
use crate::core::value::Value;
use crate::error::ValueResult;

/// Allocate `count` default-initialized elements.
///
/// `count <= 0` yields the absent array. Counts above the configured
/// ceiling are rejected before anything is allocated.
///
/// # Errors
///
/// [`crate::ValueError::LimitExceeded`] when `count` is over
/// `limits.max_array_length`.
pub fn alloc(
    count: i32,
    ops: &'static TypeOps,
    limits: &ValueLimits,
) -> ValueResult<Option<Vec<Value>>> {
    if count <= 0 {
        return Ok(None);
    }
    let count = count as usize;
    limits.check_array_length(count)?;

    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        let mut slot = Value::default();
        (ops.init)(&mut slot);
        elements.push(slot);
    }
    Ok(Some(elements))
}

/// Release every element in order, then drop the buffer. A no-op on the
/// absent array; idempotent because it leaves `None` behind.
pub fn release(elements: &mut Option<Vec<Value>>, ops: &'static TypeOps) {
    if let Some(mut buffer) = elements.take() {
        for element in &mut buffer {
            (ops.clear)(element);
        }
    }
}

/// Deep-copy a source array element by element.
///
/// The destination is allocated up front and populated left to right. If
/// element `i` fails to copy, elements `[0, i)` are released and the
/// buffer dropped before the error returns — a failed copy never leaves a
/// partially populated array observable to the caller.
///
/// # Errors
///
/// Propagates the first element-copy failure, or the ceiling rejection
/// from allocation.
pub fn copy(
    src: Option<&[Value]>,
    ops: &'static TypeOps,
    limits: &ValueLimits,
) -> ValueResult<Option<Vec<Value>>> {
    let Some(src) = src else {
        return Ok(None);
    };
    // i32::MAX elements would already be over any sane ceiling; the cast
    // saturates so the limit check still fires.
    let count = i32::try_from(src.len()).unwrap_or(i32::MAX);
    let Some(mut dst) = alloc(count, ops, limits)? else {
        return Ok(None);
    };

    for (i, element) in src.iter().enumerate() {
        if let Err(err) = (ops.copy)(element, &mut dst[i]) {
            let mut partial = Some(dst);
            release(&mut partial, ops);
            return Err(err);
        }
    }
    Ok(Some(dst))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kind::TypeId;
    use crate::core::ops::type_ops;

    #[test]
    fn non_positive_counts_are_the_absent_array() {
        let ops = type_ops(TypeId::Int32);
        let limits = ValueLimits::default();
        assert_eq!(alloc(0, ops, &limits).unwrap(), None);
        assert_eq!(alloc(-1, ops, &limits).unwrap(), None);
    }

    #[test]
    fn alloc_default_initializes_every_element() {
        let ops = type_ops(TypeId::Boolean);
        let elements = alloc(3, ops, &ValueLimits::default()).unwrap().unwrap();
        assert_eq!(elements.len(), 3);
        assert!(elements.iter().all(|e| *e == Value::Boolean(false)));
    }

    #[test]
    fn alloc_rejects_counts_over_the_ceiling() {
        let ops = type_ops(TypeId::Byte);
        let limits = ValueLimits::strict();
        assert!(alloc(10_001, ops, &limits).is_err());
    }

    #[test]
    fn copy_round_trips_scalars() {
        let ops = type_ops(TypeId::Int32);
        let src = vec![Value::Int32(1), Value::Int32(2), Value::Int32(3)];
        let dst = copy(Some(&src[..]), ops, &ValueLimits::default())
            .unwrap()
            .unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn copy_of_absent_or_empty_is_absent() {
        let ops = type_ops(TypeId::Int32);
        let limits = ValueLimits::default();
        assert_eq!(copy(None, ops, &limits).unwrap(), None);
        assert_eq!(copy(Some(&[][..]), ops, &limits).unwrap(), None);
    }

    #[test]
    fn copy_fails_fast_on_uncopyable_elements() {
        let ops = type_ops(TypeId::Invalid);
        let src = vec![Value::default(), Value::default()];
        assert!(copy(Some(&src[..]), ops, &ValueLimits::default()).is_err());
    }

    #[test]
    fn release_is_idempotent() {
        let ops = type_ops(TypeId::String);
        let mut elements = alloc(2, ops, &ValueLimits::default()).unwrap();
        release(&mut elements, ops);
        assert_eq!(elements, None);
        release(&mut elements, ops);
        assert_eq!(elements, None);
    }
}
