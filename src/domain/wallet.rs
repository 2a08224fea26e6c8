// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet classification and the currency catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Kind of account a wallet represents. Persisted as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum WalletType {
    Bank = 0,
    Cash = 1,
    CreditCard = 2,
    DebitCard = 3,
    Savings = 4,
    Investment = 5,
    Other = 6,
}

impl WalletType {
    pub const ALL: [WalletType; 7] = [
        Self::Bank,
        Self::Cash,
        Self::CreditCard,
        Self::DebitCard,
        Self::Savings,
        Self::Investment,
        Self::Other,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bank => "Bank",
            Self::Cash => "Cash",
            Self::CreditCard => "CreditCard",
            Self::DebitCard => "DebitCard",
            Self::Savings => "Savings",
            Self::Investment => "Investment",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<i32> for WalletType {
    type Error = UnknownVariant;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == value)
            .ok_or_else(|| UnknownVariant::new("wallet type", value))
    }
}

impl From<WalletType> for i32 {
    fn from(kind: WalletType) -> Self {
        kind.code()
    }
}

/// Currency codes a wallet may be denominated in.
///
/// Codes are matched case-sensitively: `"usd"` is not a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    // Fiat
    Usd,
    Eur,
    Ars,
    Arg,
    Brl,
    Mxn,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
    Dkk,
    // Crypto
    Btc,
    Eth,
    Usdt,
    Usdc,
    Nexo,
    Bnb,
}

impl Currency {
    pub const FIAT: [Currency; 12] = [
        Self::Usd,
        Self::Eur,
        Self::Ars,
        Self::Arg,
        Self::Brl,
        Self::Mxn,
        Self::Gbp,
        Self::Jpy,
        Self::Cad,
        Self::Aud,
        Self::Chf,
        Self::Dkk,
    ];

    pub const CRYPTO: [Currency; 6] = [
        Self::Btc,
        Self::Eth,
        Self::Usdt,
        Self::Usdc,
        Self::Nexo,
        Self::Bnb,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Ars => "ARS",
            Self::Arg => "ARG",
            Self::Brl => "BRL",
            Self::Mxn => "MXN",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Chf => "CHF",
            Self::Dkk => "DKK",
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Usdt => "USDT",
            Self::Usdc => "USDC",
            Self::Nexo => "NEXO",
            Self::Bnb => "BNB",
        }
    }

    pub fn is_crypto(self) -> bool {
        Self::CRYPTO.contains(&self)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::FIAT
            .into_iter()
            .chain(Self::CRYPTO)
            .find(|currency| currency.code() == s)
            .ok_or_else(|| UnknownVariant::new("currency", s))
    }
}

impl TryFrom<String> for Currency {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_type_accepts_catalog_codes_only() {
        for kind in WalletType::ALL {
            assert_eq!(WalletType::try_from(kind.code()), Ok(kind));
        }
        assert!(WalletType::try_from(7).is_err());
        assert!(WalletType::try_from(-1).is_err());
    }

    #[test]
    fn currency_parse_is_case_sensitive() {
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::Usd));
        assert_eq!("NEXO".parse::<Currency>(), Ok(Currency::Nexo));
        assert!("usd".parse::<Currency>().is_err());
        assert!("INVALID".parse::<Currency>().is_err());
        assert!("".parse::<Currency>().is_err());
    }

    #[test]
    fn catalog_split_between_fiat_and_crypto() {
        assert_eq!(Currency::FIAT.len() + Currency::CRYPTO.len(), 18);
        assert!(Currency::Btc.is_crypto());
        assert!(!Currency::Ars.is_crypto());
    }

    #[test]
    fn currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Usdt).unwrap(), r#""USDT""#);
        assert!(serde_json::from_str::<Currency>(r#""eur""#).is_err());
    }
}
