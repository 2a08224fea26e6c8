// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Category classification. Persisted and transported as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum CategoryType {
    Expense = 0,
    Income = 1,
    Investment = 2,
}

impl CategoryType {
    pub const ALL: [CategoryType; 3] = [Self::Expense, Self::Income, Self::Investment];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
            Self::Investment => "Investment",
        }
    }
}

impl TryFrom<i32> for CategoryType {
    type Error = UnknownVariant;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == value)
            .ok_or_else(|| UnknownVariant::new("category type", value))
    }
}

impl From<CategoryType> for i32 {
    fn from(kind: CategoryType) -> Self {
        kind.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in CategoryType::ALL {
            assert_eq!(CategoryType::try_from(kind.code()), Ok(kind));
        }
    }

    #[test]
    fn out_of_range_code_is_rejected() {
        assert!(CategoryType::try_from(3).is_err());
        assert!(CategoryType::try_from(-1).is_err());
        assert!(CategoryType::try_from(99).is_err());
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&CategoryType::Income).unwrap();
        assert_eq!(json, "1");
        assert!(serde_json::from_str::<CategoryType>("7").is_err());
    }
}
