use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::models::slot::{BookingOutcome, MeetingSlot, SlotView};

pub const DAYS_AHEAD: u64 = 3;
pub const SLOTS_PER_DAY: u32 = 5;
const FIRST_SLOT_HOUR: u32 = 9;
const SLOT_SPACING_HOURS: u32 = 2;
const AVAILABILITY_RATE: f64 = 0.7;

/// Generate the session's slots: one batch per upcoming day, starting at
/// 09:00 and spaced two hours apart. Ids are `"{day}-{index}"`.
pub fn generate_slots<R: Rng>(today: NaiveDate, rng: &mut R) -> Vec<MeetingSlot> {
    let mut slots = Vec::with_capacity((DAYS_AHEAD as usize) * (SLOTS_PER_DAY as usize));

    for day in 1..=DAYS_AHEAD {
        let Some(date) = today.checked_add_days(Days::new(day)) else {
            warn!("Date overflow generating slots for day {}", day);
            continue;
        };

        for index in 0..SLOTS_PER_DAY {
            let hour = FIRST_SLOT_HOUR + index * SLOT_SPACING_HOURS;
            let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) else {
                continue;
            };

            slots.push(MeetingSlot::new(
                format!("{}-{}", day, index),
                NaiveDateTime::new(date, time),
                rng.gen_bool(AVAILABILITY_RATE),
            ));
        }
    }

    debug!("Generated {} meeting slots", slots.len());
    slots
}

/// Authoritative availability state for the running session
pub struct SlotStore {
    slots: Mutex<Vec<MeetingSlot>>,
}

impl SlotStore {
    pub fn new(slots: Vec<MeetingSlot>) -> Self {
        info!(
            "Slot store initialised with {} slots ({} available)",
            slots.len(),
            slots.iter().filter(|s| s.available).count()
        );
        Self {
            slots: Mutex::new(slots),
        }
    }

    pub fn generate(today: NaiveDate) -> Self {
        Self::new(generate_slots(today, &mut rand::thread_rng()))
    }

    // Every critical section here is short and leaves the list consistent,
    // so a poisoned lock is still safe to use
    fn lock(&self) -> MutexGuard<'_, Vec<MeetingSlot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn all(&self) -> Vec<MeetingSlot> {
        self.lock().clone()
    }

    pub fn list_available(&self) -> Vec<SlotView> {
        self.lock()
            .iter()
            .filter(|slot| slot.available)
            .map(MeetingSlot::view)
            .collect()
    }

    /// Mark a slot as taken. The lookup and the flag flip share one lock
    /// acquisition, so at most one caller can get `Confirmed` for a slot.
    pub fn book(&self, slot_id: &str) -> BookingOutcome {
        let mut slots = self.lock();

        let outcome = match slots.iter_mut().find(|slot| slot.id == slot_id) {
            Some(slot) if slot.available => {
                slot.available = false;
                BookingOutcome::Confirmed
            }
            Some(_) => BookingOutcome::Unavailable,
            None => BookingOutcome::NotFound,
        };

        info!("Booking slot {}: {:?}", slot_id, outcome);
        outcome
    }
}
