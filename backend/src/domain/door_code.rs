//! Numbered door-code slots.
//!
//! Every property owns exactly [`DOOR_CODE_SLOT_COUNT`] door codes, numbered
//! `0..=10`. They are created together with the property and afterwards only
//! their description and timestamps change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DoorCodeId, PropertyId};

/// Number of door-code slots provisioned per property.
pub const DOOR_CODE_SLOT_COUNT: u8 = 11;

/// Errors raised when a slot number is outside `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOutOfRange(pub i64);

impl fmt::Display for SlotOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "door code slot {} is outside 0..{}",
            self.0, DOOR_CODE_SLOT_COUNT
        )
    }
}

impl std::error::Error for SlotOutOfRange {}

/// Slot number of a door code, always within `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DoorCodeSlot(u8);

impl DoorCodeSlot {
    /// Validate a slot number.
    ///
    /// # Examples
    /// ```
    /// use propdesk::domain::DoorCodeSlot;
    ///
    /// assert_eq!(DoorCodeSlot::new(10).map(|slot| slot.get()), Ok(10));
    /// assert!(DoorCodeSlot::new(11).is_err());
    /// ```
    pub fn new(slot: i64) -> Result<Self, SlotOutOfRange> {
        u8::try_from(slot)
            .ok()
            .filter(|value| *value < DOOR_CODE_SLOT_COUNT)
            .map(Self)
            .ok_or(SlotOutOfRange(slot))
    }

    /// Every slot in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..DOOR_CODE_SLOT_COUNT).map(Self)
    }

    /// The raw slot number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<DoorCodeSlot> for i64 {
    fn from(value: DoorCodeSlot) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<i64> for DoorCodeSlot {
    type Error = SlotOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Door-code row.
///
/// Serialised with the row's column names (`code_number`, `updated_at`,
/// `last_used`), which dashboard clients sort and display by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorCode {
    pub id: DoorCodeId,
    pub property_id: PropertyId,
    #[serde(rename = "code_number")]
    pub slot: DoorCodeSlot,
    pub description: String,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "last_used", default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Draft of a door code awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoorCode {
    pub slot: DoorCodeSlot,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

/// The full block of drafts provisioned with a new property: one per slot,
/// empty descriptions, all stamped with `now`.
pub fn door_code_block(now: DateTime<Utc>) -> Vec<NewDoorCode> {
    DoorCodeSlot::all()
        .map(|slot| NewDoorCode {
            slot,
            description: String::new(),
            updated_at: now,
        })
        .collect()
}

/// Whether `codes` covers every slot exactly once.
pub fn is_complete_block<'a>(codes: impl IntoIterator<Item = &'a DoorCode>) -> bool {
    let mut seen = [false; DOOR_CODE_SLOT_COUNT as usize];
    let mut count = 0_usize;
    for code in codes {
        let index = usize::from(code.slot.get());
        match seen.get_mut(index) {
            Some(flag) if !*flag => *flag = true,
            _ => return false,
        }
        count += 1;
    }
    count == usize::from(DOOR_CODE_SLOT_COUNT)
}
