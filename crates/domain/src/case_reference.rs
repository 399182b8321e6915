// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use std::str::FromStr;

/// A CCD case reference: 16 digits, the last a Luhn check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseReference(u64);

impl CaseReference {
    /// Parses a reference, accepting the dashed form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCaseReference` if the input is not 16
    /// digits or the check digit is wrong.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let digits: String = input
            .chars()
            .filter(|c| !matches!(c, '-' | ' '))
            .collect();

        if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) || !luhn(&digits) {
            return Err(DomainError::InvalidCaseReference(input.to_string()));
        }

        digits
            .parse()
            .map(Self)
            .map_err(|_| DomainError::InvalidCaseReference(input.to_string()))
    }

    /// Builds a reference from CCD's numeric case id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCaseReference` if the id is not a valid
    /// reference.
    pub fn from_id(id: u64) -> Result<Self, DomainError> {
        Self::parse(&format!("{id:016}"))
    }

    /// Whether `input` is a valid reference.
    #[must_use]
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// The numeric id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns the reference in four dash-separated groups.
    #[must_use]
    pub fn formatted(self) -> String {
        let digits: String = format!("{:016}", self.0);
        digits
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<String>>()
            .join("-")
    }
}

impl std::fmt::Display for CaseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016}", self.0)
    }
}

impl FromStr for CaseReference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn luhn(digits: &str) -> bool {
    let sum: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(position, digit)| {
            if position % 2 == 1 {
                let doubled: u32 = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}
