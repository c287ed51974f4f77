use core::cmp::Ordering;
use core::fmt;

use crate::element::Element;

// -----------------------------------------------------------------------------
// Optional

/// A value that is either unspecified or present.
///
/// Three observable states exist when the element type is nullable
/// (`Option<U>`):
///
/// | state | `has_value` | `has_non_null_value` |
/// |---|---|---|
/// | `Unspecified` | `false` | `false` |
/// | `Present(None)` | `true` | `false` |
/// | `Present(Some(_))` | `true` | `true` |
///
/// For non-nullable element types a present value is always non-null.
///
/// The default is `Unspecified`, so a model built with `Default` starts with
/// every optional field unspecified. Values are immutable once built; a new
/// state means a new `Optional`.
///
/// # Examples
///
/// ```
/// use tri_optional::Optional;
///
/// let unset = Optional::<Option<i32>>::default();
/// let null = Optional::<Option<i32>>::null();
/// let three = Optional::non_null(3);
///
/// assert!(!unset.has_value());
/// assert!(null.has_value() && !null.has_non_null_value());
/// assert!(three.has_non_null_value());
///
/// // Present-null is not the same as unspecified.
/// assert_ne!(unset, null);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub enum Optional<T> {
    #[default]
    Unspecified,
    Present(T),
}

impl<T> Optional<T> {
    /// Returns an unspecified value.
    #[inline(always)]
    pub const fn unspecified() -> Self {
        Self::Unspecified
    }

    /// Returns a present value.
    #[inline(always)]
    pub const fn present(value: T) -> Self {
        Self::Present(value)
    }

    /// Returns `true` for any present value, null included.
    #[inline]
    pub const fn has_value(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The stored value, `None` if unspecified.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Unspecified => None,
        }
    }

    /// Consumes `self` and returns the stored value, `None` if unspecified.
    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Unspecified => None,
        }
    }

    #[inline]
    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Present(value) => Optional::Present(value),
            Self::Unspecified => Optional::Unspecified,
        }
    }

    /// Maps a present value, keeping `Unspecified` as is.
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        match self {
            Self::Present(value) => Optional::Present(f(value)),
            Self::Unspecified => Optional::Unspecified,
        }
    }
}

impl<T: Element> Optional<T> {
    /// Returns `true` if present and the value is not null.
    ///
    /// This is the emission predicate: only fields for which it holds are
    /// written when a model is encoded.
    #[inline]
    pub fn has_non_null_value(&self) -> bool {
        matches!(self, Self::Present(value) if !value.is_null())
    }

    /// Negation of [`has_non_null_value`](Self::has_non_null_value).
    ///
    /// Fits `#[serde(skip_serializing_if = "Optional::is_unspecified_or_null")]`
    /// on plain serde structs.
    #[inline]
    pub fn is_unspecified_or_null(&self) -> bool {
        !self.has_non_null_value()
    }

    /// Weak ordering between two optionals.
    ///
    /// Only two non-null integer values are ordered, numerically, over the
    /// full range of the integer type. Every other pair, including two equal strings or an
    /// unspecified and a present value, compares as [`Ordering::Equal`].
    ///
    /// `Equal` here is a tie, not equality, which is why `Optional` does not
    /// implement [`PartialOrd`].
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use tri_optional::Optional;
    ///
    /// assert_eq!(Optional::present(3).compare(&Optional::present(5)), Ordering::Less);
    /// assert_eq!(Optional::present(5).compare(&Optional::unspecified()), Ordering::Equal);
    /// assert_eq!(
    ///     Optional::present("a".to_owned()).compare(&Optional::present("b".to_owned())),
    ///     Ordering::Equal,
    /// );
    /// ```
    pub fn compare(&self, other: &Self) -> Ordering {
        let (Self::Present(lhs), Self::Present(rhs)) = (self, other) else {
            return Ordering::Equal;
        };

        lhs.cmp_integer(rhs).unwrap_or(Ordering::Equal)
    }
}

impl<U> Optional<Option<U>> {
    /// Returns a present null.
    #[inline(always)]
    pub const fn null() -> Self {
        Self::Present(None)
    }

    /// Returns a present non-null value.
    #[inline(always)]
    pub const fn non_null(value: U) -> Self {
        Self::Present(Some(value))
    }

    /// Returns `true` only for a present null.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Present(None))
    }

    /// The stored value if present and not null.
    #[inline]
    pub const fn non_null_value(&self) -> Option<&U> {
        match self {
            Self::Present(Some(value)) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<T> for Optional<T> {
    #[inline(always)]
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

/// `unspecified`, `null`, or the value's own text.
impl<T: Element> fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => f.write_str("unspecified"),
            Self::Present(value) if value.is_null() => f.write_str("null"),
            Self::Present(value) => value.fmt_value(f),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;
    use std::collections::HashSet;

    use super::Optional;

    #[test]
    fn equality_follows_state() {
        assert_eq!(Optional::present(7), Optional::present(7));
        assert_ne!(Optional::present(7), Optional::present(8));
        assert_eq!(Optional::<i32>::unspecified(), Optional::default());
        assert_ne!(Optional::<i32>::unspecified(), Optional::present(0));

        assert_eq!(Optional::<Option<i32>>::null(), Optional::Present(None));
        assert_ne!(Optional::<Option<i32>>::null(), Optional::unspecified());
        assert_ne!(Optional::<Option<i32>>::null(), Optional::non_null(0));
    }

    #[test]
    fn hash_agrees_with_equality() {
        let set: HashSet<Optional<Option<u8>>> = [
            Optional::unspecified(),
            Optional::null(),
            Optional::non_null(1),
            Optional::non_null(1),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 3);
    }

    #[test]
    fn non_null_queries() {
        let unset = Optional::<Option<String>>::unspecified();
        let null = Optional::<Option<String>>::null();
        let text = Optional::non_null("a".to_owned());

        assert!(unset.is_unspecified_or_null());
        assert!(null.is_unspecified_or_null());
        assert!(!text.is_unspecified_or_null());

        assert!(null.is_null());
        assert!(!unset.is_null());
        assert_eq!(text.non_null_value().map(String::as_str), Some("a"));

        let plain = Optional::present(0_u32);
        assert!(plain.has_non_null_value());
        assert_eq!(plain.into_value(), Some(0));
    }

    #[test]
    fn compare_orders_integers_only() {
        assert_eq!(Optional::present(3).compare(&Optional::present(5)), Ordering::Less);
        assert_eq!(Optional::present(5).compare(&Optional::present(3)), Ordering::Greater);
        assert_eq!(Optional::present(4).compare(&Optional::present(4)), Ordering::Equal);

        assert_eq!(
            Optional::non_null(-1_i64).compare(&Optional::non_null(2)),
            Ordering::Less,
        );
        assert_eq!(
            Optional::<Option<i64>>::null().compare(&Optional::non_null(2)),
            Ordering::Equal,
        );
        assert_eq!(
            Optional::<u8>::unspecified().compare(&Optional::present(2)),
            Ordering::Equal,
        );
        assert_eq!(
            Optional::present(1.0_f64).compare(&Optional::present(2.0)),
            Ordering::Equal,
        );
    }

    #[test]
    fn compare_covers_unsigned_values_past_i128() {
        assert_eq!(
            Optional::present(u128::MAX).compare(&Optional::present(1_u128)),
            Ordering::Greater,
        );
        assert_eq!(
            Optional::non_null(1_u128).compare(&Optional::non_null(u128::MAX)),
            Ordering::Less,
        );
    }

    #[test]
    fn display_states() {
        assert_eq!(Optional::<i32>::unspecified().to_string(), "unspecified");
        assert_eq!(Optional::<Option<i32>>::null().to_string(), "null");
        assert_eq!(Optional::present(42).to_string(), "42");
        assert_eq!(Optional::non_null(true).to_string(), "true");
        assert_eq!(Optional::present("abc".to_owned()).to_string(), "abc");
    }

    #[test]
    fn map_and_from() {
        let value: Optional<u16> = 5.into();
        assert_eq!(value.map(u32::from), Optional::present(5_u32));
        assert_eq!(Optional::<u16>::unspecified().map(u32::from), Optional::unspecified());
        assert_eq!(value.as_ref().into_value(), Some(&5));
    }
}
