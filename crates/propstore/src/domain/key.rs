//! Property keys: the names and defaults an application reads from a store.
//!
//! # Closed key sets (for beginners)
//!
//! A store is a plain string-to-string map, so nothing stops a caller from
//! typing `"widht"` instead of `"width"`.  Declaring every key of an
//! application as a variant of one enum turns those typos into compile errors,
//! and a `match` over the enum is checked for exhaustiveness.
//!
//! The [`property_keys!`](crate::property_keys) macro writes such an enum for
//! you:
//!
//! ```rust
//! use propstore::{property_keys, PropertyKey};
//!
//! property_keys! {
//!     /// Settings of the viewer window.
//!     pub enum ViewerKey {
//!         /// Window width in pixels.
//!         Width = "1280",
//!         Title = "Viewer",
//!         /// Last opened file; there is no sensible default.
//!         LastFile,
//!     }
//! }
//!
//! assert_eq!(ViewerKey::Width.name(), "Width");
//! assert_eq!(ViewerKey::Width.default_value(), Some("1280"));
//! assert_eq!(ViewerKey::LastFile.default_value(), None);
//! assert_eq!(ViewerKey::ALL.len(), 3);
//! ```

/// The contract every property key fulfils.
///
/// Names are used verbatim as the storage key, so they must be non-empty,
/// unique within the key set used against one store, and stable across
/// releases if persisted files are to stay readable.  The store does not check
/// uniqueness.
pub trait PropertyKey {
    /// Returns the unique name of this key.
    fn name(&self) -> &str;

    /// Returns the value used when the store has no entry for this key.
    ///
    /// `None` means there is no fallback: string and numeric lookups of an
    /// unset key fail instead of substituting a value.
    fn default_value(&self) -> Option<&str>;
}

impl<K: PropertyKey + ?Sized> PropertyKey for &K {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn default_value(&self) -> Option<&str> {
        (**self).default_value()
    }
}

/// Declares a closed set of property keys as a fieldless enum.
///
/// Each variant is named after its storage key and may carry a string default
/// with `= "value"`.  The generated enum derives `Debug`, `Clone`, `Copy`,
/// `PartialEq`, `Eq` and `Hash`, implements [`PropertyKey`], and exposes every
/// variant in declaration order through an associated `ALL` constant.
///
/// See the [module documentation](crate::domain::key) for an example.
#[macro_export]
macro_rules! property_keys {
    (@default $default:literal) => {
        ::core::option::Option::Some($default)
    };
    (@default) => {
        ::core::option::Option::None
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $default:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Every key of this set, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::PropertyKey for $name {
            fn name(&self) -> &str {
                match self {
                    $($name::$variant => ::core::stringify!($variant),)*
                }
            }

            fn default_value(&self) -> ::core::option::Option<&str> {
                match self {
                    $($name::$variant => $crate::property_keys!(@default $($default)?),)*
                }
            }
        }
    };
}
