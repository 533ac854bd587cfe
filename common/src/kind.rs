//! Macros for defining kind enums.

/// Macro for defining a kind enum, whose variants are represented on the wire
/// (and in query strings) by the provided string literals.
///
/// # Example
///
/// ```rust
/// # use common::{define_kind, Kind as _};
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Shape {
///         #[doc = "A cube."]
///         Cube = "CUBE",
///
///         #[doc = "A sphere."]
///         Sphere = "SPHERE",
///     }
/// }
///
/// assert_eq!(Shape::Cube.as_str(), "CUBE");
/// assert_eq!("sphere".parse::<Shape>(), Ok(Shape::Sphere));
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::serde::Deserialize,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        #[strum(ascii_case_insensitive)]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                #[serde(rename = $value)]
                #[strum(serialize = $value)]
                $variant,
            )*
        }

        impl $crate::Kind for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),*];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)*
                }
            }
        }
    };
}

/// Enumeration of a closed set of string-represented values.
pub trait Kind: Copy + Eq + Ord + 'static {
    /// All the values of this [`Kind`] in their canonical order.
    const ALL: &'static [Self];

    /// Returns the wire representation of this [`Kind`] value.
    fn as_str(self) -> &'static str;
}

#[cfg(test)]
mod spec {
    use super::Kind as _;

    crate::define_kind! {
        #[doc = "Grading of a test fixture."]
        enum Grade {
            #[doc = "Excellent."]
            Excellent = "EX",

            #[doc = "Very good."]
            VeryGood = "VG",
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("EX".parse::<Grade>(), Ok(Grade::Excellent));
        assert_eq!("vg".parse::<Grade>(), Ok(Grade::VeryGood));
        assert!("VeryGood".parse::<Grade>().is_err());
    }

    #[test]
    fn displays_wire_value() {
        assert_eq!(Grade::VeryGood.to_string(), "VG");
        assert_eq!(Grade::Excellent.as_str(), "EX");
    }

    #[test]
    fn lists_all_values_in_order() {
        assert_eq!(Grade::ALL, &[Grade::Excellent, Grade::VeryGood]);
    }

    #[test]
    fn serializes_as_wire_value() {
        assert_eq!(serde_json::to_string(&Grade::VeryGood).unwrap(), "\"VG\"");
        assert_eq!(
            serde_json::from_str::<Grade>("\"EX\"").unwrap(),
            Grade::Excellent,
        );
    }
}
