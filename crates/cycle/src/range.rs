//! Range categories: the NWM forecast product families.

use std::fmt;
use std::str::FromStr;

use crate::error::CycleError;

/// Decoration sometimes prepended to a range name (it is the member
/// directory prefix on NOMADS).
const FORCING_PREFIX: &str = "forcing_";

/// Suffix marking the Hawaii domain variant of a product.
const HAWAII_SUFFIX: &str = "_hawaii";

/// A forecast product family, independent of domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    /// Standard analysis and assimilation cycle.
    AnalysisAssim,
    /// Extended analysis and assimilation cycle.
    AnalysisAssimExtend,
    /// Long analysis and assimilation cycle.
    AnalysisAssimLong,
    /// Medium-range forecast.
    MediumRange,
    /// Short-range forecast.
    ShortRange,
}

impl Product {
    /// All products, in NOMADS listing order.
    pub const ALL: [Product; 5] = [
        Product::AnalysisAssim,
        Product::AnalysisAssimExtend,
        Product::AnalysisAssimLong,
        Product::MediumRange,
        Product::ShortRange,
    ];

    /// The product name as it appears in NWM paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Product::AnalysisAssim => "analysis_assim",
            Product::AnalysisAssimExtend => "analysis_assim_extend",
            Product::AnalysisAssimLong => "analysis_assim_long",
            Product::MediumRange => "medium_range",
            Product::ShortRange => "short_range",
        }
    }

    /// Returns `true` for the `analysis_assim*` family, whose cast values
    /// count backwards from the cycle init time.
    pub fn is_analysis(self) -> bool {
        self.as_str().starts_with("analysis_assim")
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product family plus its domain (CONUS or Hawaii).
///
/// Parsing accepts an optional `forcing_` prefix and an optional `_hawaii`
/// suffix, e.g. `forcing_short_range_hawaii`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeCategory {
    product: Product,
    hawaii: bool,
}

impl RangeCategory {
    /// Creates a range category from its parts.
    pub fn new(product: Product, hawaii: bool) -> Self {
        Self { product, hawaii }
    }

    /// The product family.
    pub fn product(self) -> Product {
        self.product
    }

    /// Returns `true` for the Hawaii domain variant.
    pub fn is_hawaii(self) -> bool {
        self.hawaii
    }

    /// Returns `true` when cast values are subtracted from the init hour.
    pub fn is_analysis(self) -> bool {
        self.product.is_analysis()
    }

    /// Sign applied to the cast value when computing valid time: `-1` for
    /// `analysis_assim*`, `+1` otherwise.
    pub fn lead_sign(self) -> i64 {
        if self.is_analysis() { -1 } else { 1 }
    }

    /// Glob selecting member directories inside a day directory.
    ///
    /// Keeps the `_hawaii` suffix: Hawaii forcing lives in its own member
    /// directory.
    pub fn member_glob(self) -> String {
        format!("{FORCING_PREFIX}{self}")
    }

    /// Glob selecting forcing files inside a member directory.
    ///
    /// Drops the `_hawaii` suffix: Hawaii files share the CONUS naming and
    /// carry the domain in a later field.
    pub fn file_glob(self) -> String {
        format!("*{}.forcing.*", self.product)
    }
}

impl fmt::Display for RangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hawaii {
            write!(f, "{}{HAWAII_SUFFIX}", self.product)
        } else {
            write!(f, "{}", self.product)
        }
    }
}

impl FromStr for RangeCategory {
    type Err = CycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed.strip_prefix(FORCING_PREFIX).unwrap_or(trimmed);
        let (base, hawaii) = match name.strip_suffix(HAWAII_SUFFIX) {
            Some(base) => (base, true),
            None => (name, false),
        };

        Product::ALL
            .iter()
            .find(|p| p.as_str() == base)
            .map(|&product| Self { product, hawaii })
            .ok_or_else(|| CycleError::UnknownRange { name: s.to_string() })
    }
}
