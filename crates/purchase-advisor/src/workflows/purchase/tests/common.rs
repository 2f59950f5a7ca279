use std::io;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crate::workflows::purchase::domain::PurchaseMetrics;
use crate::workflows::purchase::medium::{KeyValueMedium, MediumError, MemoryMedium};
use crate::workflows::purchase::repository::CalculationStore;

pub(super) fn headphones() -> PurchaseMetrics {
    PurchaseMetrics {
        product_name: "Noise-cancelling headphones".to_string(),
        price: 250.0,
        monthly_income: 1000.0,
        discount_percentage: 10.0,
        utility_score: 8,
        necessity_score: 6,
        long_term_value: 7,
        use_frequency: 9,
        waiting_days: 10,
        research_depth: 8,
        impulse_resistance: 7,
        instant_happiness_score: 6,
        has_unused_similar: false,
        is_replacement: false,
        upgrade_justification: 5,
    }
}

/// Every rating at its best, with income known and nothing held against it.
pub(super) fn ideal_metrics() -> PurchaseMetrics {
    PurchaseMetrics {
        product_name: "Winter boots".to_string(),
        price: 0.0,
        monthly_income: 2000.0,
        discount_percentage: 50.0,
        utility_score: 10,
        necessity_score: 10,
        long_term_value: 10,
        use_frequency: 10,
        waiting_days: 15,
        research_depth: 10,
        impulse_resistance: 10,
        instant_happiness_score: 10,
        has_unused_similar: false,
        is_replacement: false,
        upgrade_justification: 10,
    }
}

/// Every rating at zero and income unknown.
pub(super) fn bleak_metrics() -> PurchaseMetrics {
    PurchaseMetrics {
        product_name: "Third gadget".to_string(),
        price: 400.0,
        monthly_income: 0.0,
        discount_percentage: 0.0,
        utility_score: 0,
        necessity_score: 0,
        long_term_value: 0,
        use_frequency: 0,
        waiting_days: 0,
        research_depth: 0,
        impulse_resistance: 0,
        instant_happiness_score: 0,
        has_unused_similar: false,
        is_replacement: false,
        upgrade_justification: 0,
    }
}

static TICK: AtomicI64 = AtomicI64::new(1_700_000_000_000);

pub(super) fn ticking_clock() -> i64 {
    TICK.fetch_add(1, Ordering::Relaxed)
}

pub(super) fn memory_store() -> CalculationStore<MemoryMedium> {
    CalculationStore::with_clock(MemoryMedium::new(), ticking_clock)
}

/// Medium that reads fine but refuses every write.
#[derive(Default)]
pub(super) struct ReadOnlyMedium {
    pub(super) inner: MemoryMedium,
}

impl KeyValueMedium for ReadOnlyMedium {
    fn read(&self, slot: &str) -> Result<Option<String>, MediumError> {
        self.inner.read(slot)
    }

    fn write(&self, slot: &str, _value: &str) -> Result<(), MediumError> {
        Err(io_failure(slot, io::ErrorKind::Other, "quota exceeded"))
    }
}

/// Medium whose reads always fail.
pub(super) struct BrokenReadMedium;

impl KeyValueMedium for BrokenReadMedium {
    fn read(&self, slot: &str) -> Result<Option<String>, MediumError> {
        Err(io_failure(slot, io::ErrorKind::PermissionDenied, "denied"))
    }

    fn write(&self, _slot: &str, _value: &str) -> Result<(), MediumError> {
        Ok(())
    }
}

/// Working medium whose reads can be switched off while writes keep landing.
#[derive(Default)]
pub(super) struct FlickeringMedium {
    pub(super) inner: MemoryMedium,
    reads_fail: AtomicBool,
}

impl FlickeringMedium {
    pub(super) fn fail_reads(&self, fail: bool) {
        self.reads_fail.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueMedium for FlickeringMedium {
    fn read(&self, slot: &str) -> Result<Option<String>, MediumError> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(io_failure(slot, io::ErrorKind::Other, "device read error"));
        }
        self.inner.read(slot)
    }

    fn write(&self, slot: &str, value: &str) -> Result<(), MediumError> {
        self.inner.write(slot, value)
    }
}

fn io_failure(slot: &str, kind: io::ErrorKind, message: &str) -> MediumError {
    MediumError::Io {
        slot: slot.to_string(),
        source: io::Error::new(kind, message.to_string()),
    }
}
