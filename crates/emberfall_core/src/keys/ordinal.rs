//! # Ordinal Key Trait
//!
//! A bounded key type exposes its defined values and an ordinal conversion
//! in both directions. Fieldless enums get the implementation for free via
//! [`ordinal_key!`](crate::ordinal_key).

/// A bounded, ordinal-valued key type.
///
/// The set of defined values must be closed and known statically: the
/// distribution profile derived from it is computed once per type and shared
/// by every table instance keyed by the type.
///
/// Implementations must keep the three methods consistent:
/// `from_ordinal(k.to_ordinal()) == Some(k)` for every `k` in `all_values()`,
/// and `None` for every other ordinal.
pub trait OrdinalKey: Copy + Eq + 'static {
    /// Every defined value of the key type.
    fn all_values() -> &'static [Self];

    /// The ordinal underlying this key.
    fn to_ordinal(self) -> i32;

    /// The key with the given ordinal, or `None` if no defined value has it.
    ///
    /// The default implementation scans [`OrdinalKey::all_values`]; key types
    /// with large value sets should override it with an O(1) lookup (the
    /// [`ordinal_key!`](crate::ordinal_key) macro generates one).
    fn from_ordinal(ordinal: i32) -> Option<Self> {
        Self::all_values()
            .iter()
            .copied()
            .find(|key| key.to_ordinal() == ordinal)
    }
}

/// Defines a fieldless `#[repr(i32)]` enum and implements
/// [`OrdinalKey`] for it.
///
/// Discriminants may be omitted (sequential from zero), explicit, negative,
/// or gapped - the table layer handles all distributions.
///
/// # Example
///
/// ```rust,ignore
/// emberfall_core::ordinal_key! {
///     pub enum EquipSlot {
///         Head = 0,
///         Chest = 1,
///         Ring = 5,
///     }
/// }
/// ```
#[macro_export]
macro_rules! ordinal_key {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $ordinal:expr)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $ordinal)?,
            )+
        }

        impl $crate::keys::OrdinalKey for $name {
            fn all_values() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn to_ordinal(self) -> i32 {
                self as i32
            }

            fn from_ordinal(ordinal: i32) -> Option<Self> {
                match ordinal {
                    $(o if o == $name::$variant as i32 => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}
