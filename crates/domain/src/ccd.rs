// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CCD platform complex types and the prefixed-key wire layout.
//!
//! CCD stores case data as one flat JSON object. Nested value objects are
//! written "unwrapped" under a prefix, so the `firstName` field of the
//! `applicant1` component travels as `applicant1FirstName`. The helpers
//! here move a serde struct in and out of that layout.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::DocumentType;

/// One element of a CCD collection field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListValue<T> {
    /// Element id assigned by CCD (or by us for new elements).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The element itself.
    pub value: T,
}

impl<T> ListValue<T> {
    /// Wraps a value with a freshly generated element id.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            value,
        }
    }
}

/// A stored document reference (CCD `Document` type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Document {
    /// Document Management URL of the document.
    pub document_url: String,
    /// Original file name.
    pub document_filename: String,
    /// URL of the binary content.
    pub document_binary_url: String,
}

impl Document {
    /// Returns the Document Management id: the last path segment of the URL.
    #[must_use]
    pub fn document_id(&self) -> Option<&str> {
        self.document_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
    }
}

/// A document attached to the case with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DivorceDocument {
    /// When the document was attached.
    pub document_date_added: Option<NaiveDate>,
    /// Free-text comment.
    pub document_comment: Option<String>,
    /// File name shown in the case file view.
    pub document_file_name: Option<String>,
    /// Classification.
    pub document_type: Option<DocumentType>,
    /// The stored document.
    pub document_link: Option<Document>,
}

/// A single fee line (CCD `Fee` type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Fee {
    /// Fee amount in pence, as a string.
    #[serde(rename = "FeeAmount")]
    pub amount: String,
    /// Fees register code, e.g. `FEE0002`.
    #[serde(rename = "FeeCode")]
    pub code: String,
    /// Description shown to the payer.
    #[serde(rename = "FeeDescription")]
    pub description: String,
    /// Fees register version.
    #[serde(rename = "FeeVersion")]
    pub version: String,
}

impl Fee {
    /// Returns the amount in pence, or zero when the stored value is not numeric.
    #[must_use]
    pub fn amount_in_pence(&self) -> i64 {
        self.amount.parse().unwrap_or(0)
    }
}

/// Fees due for an application (CCD `OrderSummary` type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrderSummary {
    /// Payment reference once paid.
    #[serde(rename = "PaymentReference", skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    /// Fee lines.
    #[serde(rename = "Fees", default)]
    pub fees: Vec<ListValue<Fee>>,
    /// Total in pence, as a string.
    #[serde(rename = "PaymentTotal")]
    pub payment_total: String,
}

impl OrderSummary {
    /// Builds a summary holding exactly one fee.
    #[must_use]
    pub fn single(fee: Fee) -> Self {
        let payment_total: String = fee.amount.clone();
        Self {
            payment_reference: None,
            fees: vec![ListValue::new(fee)],
            payment_total,
        }
    }

    /// Returns the total in pence, or zero when the stored value is not numeric.
    #[must_use]
    pub fn total_in_pence(&self) -> i64 {
        self.payment_total.parse().unwrap_or(0)
    }
}

/// A professional organisation registered with PRD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Organisation {
    /// PRD organisation identifier.
    #[serde(rename = "OrganisationID")]
    pub organisation_id: Option<String>,
    /// Organisation name.
    #[serde(rename = "OrganisationName")]
    pub organisation_name: Option<String>,
}

/// Links a case role to the organisation that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrganisationPolicy {
    /// The organisation.
    #[serde(rename = "Organisation")]
    pub organisation: Option<Organisation>,
    /// The case role the organisation's users receive, e.g. `[APPONESOLICITOR]`.
    #[serde(rename = "OrgPolicyCaseAssignedRole")]
    pub case_assigned_role: Option<String>,
    /// Optional reference.
    #[serde(rename = "OrgPolicyReference")]
    pub reference: Option<String>,
}

/// A UK postal address (CCD `AddressGlobalUK` type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AddressGlobalUk {
    /// First line.
    #[serde(rename = "AddressLine1")]
    pub address_line1: Option<String>,
    /// Second line.
    #[serde(rename = "AddressLine2")]
    pub address_line2: Option<String>,
    /// Third line.
    #[serde(rename = "AddressLine3")]
    pub address_line3: Option<String>,
    /// Post town.
    #[serde(rename = "PostTown")]
    pub post_town: Option<String>,
    /// County.
    #[serde(rename = "County")]
    pub county: Option<String>,
    /// Postcode.
    #[serde(rename = "PostCode")]
    pub post_code: Option<String>,
    /// Country.
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

impl AddressGlobalUk {
    /// An address is usable when it has a first line and a postcode.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.address_line1) && present(&self.post_code)
    }
}

/// A note added to the case by a caseworker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CaseNote {
    /// Author's full name.
    pub author: String,
    /// Date added.
    pub date: Option<NaiveDate>,
    /// Note text.
    pub note: String,
}

/// A payment attempt recorded against the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// When the payment was created.
    pub created: Option<NaiveDateTime>,
    /// When the payment last changed.
    pub updated: Option<NaiveDateTime>,
    /// Fee code paid.
    pub fee_code: Option<String>,
    /// Amount in pence.
    pub amount: Option<i64>,
    /// Outcome.
    pub status: Option<crate::types::PaymentStatus>,
    /// Channel, e.g. `online`.
    pub channel: Option<String>,
    /// Payment reference.
    pub reference: Option<String>,
    /// Provider transaction id.
    pub transaction_id: Option<String>,
}

/// Joins a prefix and a field name the way CCD unwrapped fields are named.
#[must_use]
pub fn prefixed_key(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        return field.to_string();
    }
    let mut chars = field.chars();
    chars.next().map_or_else(
        || prefix.to_string(),
        |first| format!("{prefix}{}{}", first.to_ascii_uppercase(), chars.as_str()),
    )
}

/// Strips a prefix from a wire key, returning the component field name.
///
/// The character after the prefix must be upper case so that
/// `applicant1` does not capture `applicant10Name`-style keys of another
/// component.
fn unprefixed_key(prefix: &str, key: &str) -> Option<String> {
    if prefix.is_empty() {
        return Some(key.to_string());
    }
    let rest: &str = key.strip_prefix(prefix)?;
    let mut chars = rest.chars();
    let first: char = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    Some(format!("{}{}", first.to_ascii_lowercase(), chars.as_str()))
}

/// Serializes `value` and writes its non-null fields into `out` under `prefix`.
///
/// # Errors
///
/// Returns an error if `value` does not serialize to a JSON object.
pub fn write_prefixed<T: Serialize>(
    value: &T,
    prefix: &str,
    out: &mut Map<String, Value>,
) -> Result<(), serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => {
            for (field, field_value) in fields {
                if field_value.is_null() {
                    continue;
                }
                out.insert(prefixed_key(prefix, &field), field_value);
            }
            Ok(())
        }
        other => Err(serde::ser::Error::custom(format!(
            "component under prefix '{prefix}' serialized to {other} instead of an object"
        ))),
    }
}

/// Reads the fields stored under `prefix` in `map` into a component.
///
/// Null values are dropped so that collection fields fall back to their
/// defaults. Keys the component does not declare are ignored.
///
/// # Errors
///
/// Returns an error if a recognised field holds a value of the wrong shape.
pub fn read_prefixed<T: DeserializeOwned>(
    map: &Map<String, Value>,
    prefix: &str,
) -> Result<T, serde_json::Error> {
    let fields: Map<String, Value> = map
        .iter()
        .filter(|(_, value)| !value.is_null())
        .filter_map(|(key, value)| unprefixed_key(prefix, key).map(|field| (field, value.clone())))
        .collect();
    serde_json::from_value(Value::Object(fields))
}
