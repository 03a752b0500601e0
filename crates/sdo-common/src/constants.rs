//! Closed value sets accepted by the SDO/AIA image API.
//!
//! Every enumeration carries a member table of `(symbolic name, member)`
//! pairs. Members whose symbolic name starts with [`PRIVATE_PREFIX`] are not
//! public and never show up in [`attribute_values`].

use std::fmt;
use std::str::FromStr;

use crate::choice::Choice;
use crate::error::InvalidValueError;

/// Symbolic names starting with this prefix are excluded from value lists.
pub const PRIVATE_PREFIX: char = '_';

/// A closed enumeration whose members map onto API value strings.
pub trait Enumerated: Copy + Eq + Sized + 'static {
    /// Name used in error messages, e.g. `AIA_WAVE`.
    const KIND: &'static str;

    /// Every declared member, including non-public ones.
    const MEMBERS: &'static [(&'static str, Self)];

    /// The value string sent to the API.
    fn value(&self) -> &'static str;

    /// Public members in declaration order.
    fn all() -> Vec<Self> {
        Self::MEMBERS
            .iter()
            .filter(|(name, _)| !name.starts_with(PRIVATE_PREFIX))
            .map(|(_, member)| *member)
            .collect()
    }

    /// Value strings of the public members.
    fn values() -> Vec<&'static str> {
        attribute_values::<Self>()
    }

    /// Look up a public member by its value string.
    fn parse_value(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|member| member.value() == s)
    }
}

/// Returns the value strings of all public members of `E`.
///
/// ```
/// use sdo_common::{attribute_values, AiaWave, ImageSize};
///
/// assert_eq!(
///     attribute_values::<AiaWave>(),
///     vec!["94", "131", "171", "193", "211", "304", "335", "1600", "1700"]
/// );
/// assert_eq!(attribute_values::<ImageSize>(), vec!["2k", "512", "256"]);
/// ```
pub fn attribute_values<E: Enumerated>() -> Vec<&'static str> {
    E::MEMBERS
        .iter()
        .filter(|(name, _)| !name.starts_with(PRIVATE_PREFIX))
        .map(|(_, member)| member.value())
        .collect()
}

macro_rules! enumerated {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl Enumerated for $name {
            const KIND: &'static str = $kind;
            const MEMBERS: &'static [(&'static str, Self)] =
                &[ $( (stringify!($variant), $name::$variant) ),+ ];

            fn value(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }

        impl FromStr for $name {
            type Err = InvalidValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_value(s).ok_or_else(|| InvalidValueError::new(Self::KIND, s))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.value())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }

        impl From<$name> for Choice<$name> {
            fn from(member: $name) -> Self {
                Choice::Known(member)
            }
        }
    };
}

enumerated! {
    /// AIA passband, in Angstrom.
    pub enum AiaWave: "AIA_WAVE" {
        A94 => "94",
        A131 => "131",
        A171 => "171",
        A193 => "193",
        A211 => "211",
        A304 => "304",
        A335 => "335",
        A1600 => "1600",
        A1700 => "1700",
    }
}

impl AiaWave {
    pub fn angstrom(&self) -> u32 {
        match self {
            AiaWave::A94 => 94,
            AiaWave::A131 => 131,
            AiaWave::A171 => 171,
            AiaWave::A193 => 193,
            AiaWave::A211 => 211,
            AiaWave::A304 => 304,
            AiaWave::A335 => 335,
            AiaWave::A1600 => 1600,
            AiaWave::A1700 => 1700,
        }
    }
}

enumerated! {
    /// Resolution class of the returned raster.
    pub enum ImageSize: "IMAGE_SIZE" {
        /// 2048 x 2048
        Size2k => "2k",
        Size512 => "512",
        Size256 => "256",
    }
}

impl ImageSize {
    /// Edge length of the square raster in pixels.
    pub fn pixels(&self) -> u32 {
        match self {
            ImageSize::Size2k => 2048,
            ImageSize::Size512 => 512,
            ImageSize::Size256 => 256,
        }
    }
}

enumerated! {
    /// Image parameter computed by the server on a 64x64 cell grid.
    pub enum ImageParam: "IMAGE_PARAM" {
        Entropy => "1",
        Mean => "2",
        StandardDeviation => "3",
        FractalDimension => "4",
        Skewness => "5",
        Kurtosis => "6",
        Uniformity => "7",
        RelativeSmoothness => "8",
        TamuraContrast => "9",
        TamuraDirectionality => "10",
    }
}

impl ImageParam {
    pub fn name(&self) -> &'static str {
        match self {
            ImageParam::Entropy => "entropy",
            ImageParam::Mean => "mean",
            ImageParam::StandardDeviation => "standard deviation",
            ImageParam::FractalDimension => "fractal dimension",
            ImageParam::Skewness => "skewness",
            ImageParam::Kurtosis => "kurtosis",
            ImageParam::Uniformity => "uniformity",
            ImageParam::RelativeSmoothness => "relative smoothness",
            ImageParam::TamuraContrast => "Tamura contrast",
            ImageParam::TamuraDirectionality => "Tamura directionality",
        }
    }
}

enumerated! {
    /// Shape of a fetch result.
    pub enum OutputFormat: "OUTPUT_FMT" {
        /// Decoded image handle
        Image => "image",
        /// Height x width x channel array of samples
        Array => "array",
        /// Not supported by the API
        Xml => "xml",
    }
}
