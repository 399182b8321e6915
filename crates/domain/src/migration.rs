// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Versioned migrations of retired case fields.
//!
//! Cases created under an older layout still carry retired keys. Each
//! migration rewrites one batch of them on the raw map, before the map is
//! read into `CaseData`. The case records the last version applied in
//! `dataVersion`, so each migration runs at most once per case.

use serde_json::{Map, Value, json};

/// Wire key holding the data version.
pub const DATA_VERSION_KEY: &str = "dataVersion";

type Migration = fn(&mut Map<String, Value>);

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, migrate_contact_details_type),
    (2, migrate_conditional_order_renames),
    (3, migrate_prayer_checkboxes),
];

/// The data version a fully migrated case carries.
#[must_use]
pub fn latest_data_version() -> u32 {
    MIGRATIONS.iter().map(|(version, _)| *version).max().unwrap_or(0)
}

/// Reads the data version of a raw case map. Absent or unreadable means 0.
#[must_use]
pub fn data_version(map: &Map<String, Value>) -> u32 {
    match map.get(DATA_VERSION_KEY) {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Applies every migration newer than the case's data version, in order,
/// and stamps the latest version.
///
/// Returns the versions applied.
pub fn migrate(map: &mut Map<String, Value>) -> Vec<u32> {
    let current: u32 = data_version(map);
    let mut applied: Vec<u32> = Vec::new();

    for (version, migration) in MIGRATIONS {
        if *version > current {
            migration(map);
            applied.push(*version);
        }
    }

    let latest: u32 = latest_data_version().max(current);
    map.insert(DATA_VERSION_KEY.to_string(), json!(latest));
    applied
}

/// Moves `from` to `to` through `convert`. The retired key is always
/// removed; a present target is never overwritten.
fn move_field<F>(map: &mut Map<String, Value>, from: &str, to: &str, convert: F)
where
    F: Fn(Value) -> Option<Value>,
{
    let Some(old) = map.remove(from) else {
        return;
    };
    if map.get(to).is_some_and(|existing| !existing.is_null()) {
        return;
    }
    if let Some(new) = convert(old) {
        map.insert(to.to_string(), new);
    }
}

fn migrate_contact_details_type(map: &mut Map<String, Value>) {
    for applicant in ["applicant1", "applicant2"] {
        move_field(
            map,
            &format!("{applicant}ContactDetailsConfidential"),
            &format!("{applicant}ContactDetailsType"),
            |old| match old.as_str() {
                Some("keep") => Some(json!("private")),
                Some("share") => Some(json!("public")),
                _ => None,
            },
        );
    }
}

fn migrate_conditional_order_renames(map: &mut Map<String, Value>) {
    for (from, to) in [
        (
            "coIsEverythingInPetitionTrue",
            "coApplicant1IsEverythingInApplicationTrue",
        ),
        (
            "coChangeOrAddToPetition",
            "coApplicant1ChangeOrAddToApplication",
        ),
        ("dateConditionalOrderSubmitted", "coApplicant1SubmittedDate"),
    ] {
        move_field(map, from, to, Some);
    }
}

fn migrate_prayer_checkboxes(map: &mut Map<String, Value>) {
    for applicant in ["applicant1", "applicant2"] {
        move_field(
            map,
            &format!("{applicant}PrayerHasBeenGiven"),
            &format!("{applicant}PrayerHasBeenGivenCheckbox"),
            |old| match old.as_str() {
                Some("Yes") => Some(json!(["Yes"])),
                Some("No") => Some(json!([])),
                _ => None,
            },
        );
    }
}
