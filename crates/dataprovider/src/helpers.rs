//! Builders for common provider datasets.

use crate::convert::ProviderData;
use crate::types::DataProviderEnum;
use crate::value::Value;

/// One single-argument row per value.
///
/// # Examples
/// ```
/// use dataprovider::{ProviderData, Value, test_for_each};
///
/// assert_eq!(
///     test_for_each(["a", "b"]),
///     ProviderData::Table(vec![vec![Value::from("a")], vec![Value::from("b")]])
/// );
/// ```
#[must_use]
pub fn test_for_each<I, V>(values: I) -> ProviderData
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    ProviderData::Table(
        values
            .into_iter()
            .map(|value| vec![value.into()])
            .collect(),
    )
}

/// One single-argument row per variant of `E`, in declaration order.
#[must_use]
pub fn test_for_each_enum<E: DataProviderEnum>() -> ProviderData {
    test_for_each(
        E::variants()
            .iter()
            .map(|variant| Value::Enum(variant.to_enum_value())),
    )
}

/// Every row of `left` concatenated with every row of `right`, `left`
/// varying slowest.
///
/// # Examples
/// ```
/// use dataprovider::{ProviderData, Value, cross_product, row};
///
/// let data = cross_product(&[row![1], row![2]], &[row!["a", true]]);
/// assert_eq!(data, ProviderData::Table(vec![row![1, "a", true], row![2, "a", true]]));
/// ```
#[must_use]
pub fn cross_product(left: &[Vec<Value>], right: &[Vec<Value>]) -> ProviderData {
    ProviderData::Table(
        left.iter()
            .flat_map(|head| {
                right.iter().map(move |tail| {
                    let mut row = Vec::with_capacity(head.len() + tail.len());
                    row.extend_from_slice(head);
                    row.extend_from_slice(tail);
                    row
                })
            })
            .collect(),
    )
}

/// Every value of `left` paired with every value of `right`.
#[must_use]
pub fn cross_product_single_arg(left: &[Value], right: &[Value]) -> ProviderData {
    ProviderData::Table(
        left.iter()
            .flat_map(|first| right.iter().map(move |second| vec![first.clone(), second.clone()]))
            .collect(),
    )
}
