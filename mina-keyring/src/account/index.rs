//! Account index

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::keys::HARDENED_OFFSET;
use crate::error::{Error, Result};

/// Index of an account below the network's coin-type node
///
/// Always derived as a hardened child, so valid values are `0..2^31`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AccountIndex(u32);

impl AccountIndex {
    /// The largest index that still fits below the hardened offset
    pub const MAX: Self = Self(HARDENED_OFFSET - 1);

    pub fn value(self) -> u32 {
        self.0
    }

    /// The following index, if there is one
    pub fn next(self) -> Option<Self> {
        Self::try_from(self.0.checked_add(1)?).ok()
    }
}

impl TryFrom<u32> for AccountIndex {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        if value >= HARDENED_OFFSET {
            return Err(Error::InvalidInput(format!(
                "Account index out of range: {}",
                value
            )));
        }
        Ok(Self(value))
    }
}

impl From<AccountIndex> for u32 {
    fn from(value: AccountIndex) -> Self {
        value.0
    }
}

impl FromStr for AccountIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .parse::<u32>()
            .map_err(|_| Error::InvalidInput(format!("Invalid account index: {}", s)))?;
        Self::try_from(value)
    }
}

impl fmt::Display for AccountIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
