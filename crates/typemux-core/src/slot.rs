use std::{fmt, sync::OnceLock};

///
/// ConverterSlot
///
/// Instance-scoped lazy cell holding one group converter. The converter is
/// built on first access and the same instance is returned afterwards.
/// Concurrent first accesses run the constructor exactly once.
///

pub struct ConverterSlot<T> {
    cell: OnceLock<T>,
}

impl<T> ConverterSlot<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(init)
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for ConverterSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ConverterSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterSlot")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        ptr,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    #[test]
    fn constructs_once_and_returns_the_same_instance() {
        let built = AtomicUsize::new(0);
        let slot = ConverterSlot::new();

        assert!(!slot.is_initialized());
        let first = slot.get_or_init(|| {
            built.fetch_add(1, Ordering::Relaxed);
            String::from("mapper")
        });
        let second = slot.get_or_init(|| {
            built.fetch_add(1, Ordering::Relaxed);
            String::from("other")
        });

        assert!(ptr::eq(first, second));
        assert_eq!(second, "mapper");
        assert_eq!(built.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn slots_are_independent_per_instance() {
        let a = ConverterSlot::new();
        let b = ConverterSlot::new();

        let left = a.get_or_init(|| 1_u8);
        let right = b.get_or_init(|| 1_u8);

        assert!(!ptr::eq(left, right));
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let built = Arc::new(AtomicUsize::new(0));
        let slot = Arc::new(ConverterSlot::<usize>::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let built = Arc::clone(&built);
                let slot = Arc::clone(&slot);
                thread::spawn(move || {
                    *slot.get_or_init(|| built.fetch_add(1, Ordering::SeqCst) + 100)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("thread should not panic"), 100);
        }
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }
}
