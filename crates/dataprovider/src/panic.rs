//! Panic payload formatting helpers.
//!
//! Test bodies fail by panicking. The execution loop catches each panic and
//! keeps its message so one failing row does not hide the others.

use std::any::Any;

/// Formats a panic payload into a readable message.
///
/// String payloads are extracted directly, integers and floats are rendered
/// with their display form, and every other type falls back to its
/// [`Debug`](core::fmt::Debug) form.
///
/// # Examples
///
/// ```
/// use dataprovider::panic_message;
/// use std::any::Any;
///
/// let payload: Box<dyn Any + Send> = Box::new("boom");
/// assert_eq!(panic_message(payload.as_ref()), "boom");
/// let payload: Box<dyn Any + Send> = Box::new(7_u8);
/// assert_eq!(panic_message(payload.as_ref()), "7");
/// ```
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .or_else(|| payload.downcast_ref::<i32>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<i64>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<u8>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<u32>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<u64>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<usize>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<f64>().map(ToString::to_string))
        .unwrap_or_else(|| format!("{payload:?}"))
}
