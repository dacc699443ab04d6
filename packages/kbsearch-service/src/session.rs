use std::{
	collections::HashMap,
	sync::{Mutex, MutexGuard},
	time::{Duration, Instant},
};

use crate::SessionStore;

struct Slot {
	list_url: String,
	written_at: Instant,
}

/// Per-session slots held in process memory. Entries expire after `ttl`; once `max_entries`
/// live slots exist, the oldest is evicted to admit a new session.
pub struct MemorySessionStore {
	ttl: Duration,
	max_entries: usize,
	slots: Mutex<HashMap<String, Slot>>,
}
impl MemorySessionStore {
	pub fn new(cfg: &kbsearch_config::Session) -> Self {
		Self {
			ttl: Duration::from_secs(cfg.ttl_secs),
			max_entries: cfg.max_entries.max(1),
			slots: Mutex::new(HashMap::new()),
		}
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
		// Slots hold plain data, so a poisoned lock is still consistent.
		self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	fn is_live(&self, slot: &Slot, now: Instant) -> bool {
		now.duration_since(slot.written_at) < self.ttl
	}
}
impl SessionStore for MemorySessionStore {
	fn set_list_url(&self, session_key: &str, list_url: String) {
		let now = Instant::now();
		let mut slots = self.lock();

		slots.retain(|_, slot| self.is_live(slot, now));

		if !slots.contains_key(session_key) && slots.len() >= self.max_entries {
			let oldest = slots
				.iter()
				.min_by_key(|(_, slot)| slot.written_at)
				.map(|(key, _)| key.clone());

			if let Some(key) = oldest {
				slots.remove(&key);
			}
		}

		slots.insert(session_key.to_string(), Slot { list_url, written_at: now });
	}

	fn list_url(&self, session_key: &str) -> Option<String> {
		let now = Instant::now();

		self.lock()
			.get(session_key)
			.filter(|slot| self.is_live(slot, now))
			.map(|slot| slot.list_url.clone())
	}
}
