//! Number categories and their request ids.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::InvalidCategory;

/// One of the fixed upstream number sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Primes,
    Fibonacci,
    Even,
    Random,
}

impl Category {
    /// Number of categories; one window exists per category.
    pub const COUNT: usize = 4;

    /// Every category in window-slot order.
    pub const ALL: [Self; Self::COUNT] = [Self::Primes, Self::Fibonacci, Self::Even, Self::Random];

    /// Parse a request id: short id (`p`, `f`, `e`, `r`), full name or upstream alias.
    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, InvalidCategory> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "p" | "prime" | "primes" => Ok(Self::Primes),
            "f" | "fibo" | "fibonacci" => Ok(Self::Fibonacci),
            "e" | "even" => Ok(Self::Even),
            "r" | "rand" | "random" => Ok(Self::Random),
            _ => Err(InvalidCategory(raw.to_string())),
        }
    }

    /// Full lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primes => "primes",
            Self::Fibonacci => "fibonacci",
            Self::Even => "even",
            Self::Random => "random",
        }
    }

    /// Single-letter request id.
    #[must_use]
    pub fn short_id(self) -> &'static str {
        match self {
            Self::Primes => "p",
            Self::Fibonacci => "f",
            Self::Even => "e",
            Self::Random => "r",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Primes => 0,
            Self::Fibonacci => 1,
            Self::Even => 2,
            Self::Random => 3,
        }
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn slots_follow_all_order() {
        for (index, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.slot(), index);
        }
    }
}
