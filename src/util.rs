#[cfg(feature = "std")]
mod lock_impl {
    use std::sync::PoisonError;

    pub type ReadGuard<'a, T> = std::sync::RwLockReadGuard<'a, T>;
    pub type WriteGuard<'a, T> = std::sync::RwLockWriteGuard<'a, T>;

    /// Reader/writer lock over std's `RwLock`.
    ///
    /// Poisoning is ignored: every critical section in this crate is a single assignment, so the guarded value is never left half-written.
    #[derive(Default)]
    pub struct RwLock<T>(std::sync::RwLock<T>);

    impl<T> RwLock<T> {
        pub const fn new(val: T) -> Self {
            Self(std::sync::RwLock::new(val))
        }

        pub fn read(&self) -> ReadGuard<'_, T> {
            self.0.read().unwrap_or_else(PoisonError::into_inner)
        }

        pub fn write(&self) -> WriteGuard<'_, T> {
            self.0.write().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

#[cfg(not(feature = "std"))]
mod lock_impl {
    pub type ReadGuard<'a, T> = spin::RwLockReadGuard<'a, T>;
    pub type WriteGuard<'a, T> = spin::RwLockWriteGuard<'a, T>;

    #[derive(Default)]
    pub struct RwLock<T>(spin::RwLock<T>);

    impl<T> RwLock<T> {
        pub const fn new(val: T) -> Self {
            Self(spin::RwLock::new(val))
        }

        pub fn read(&self) -> ReadGuard<'_, T> {
            self.0.read()
        }

        pub fn write(&self) -> WriteGuard<'_, T> {
            self.0.write()
        }
    }
}

pub use lock_impl::*;

/// Acquires write locks on two distinct locks in ascending address order.
///
/// Every two-lock operation goes through here, so two threads locking the same pair from opposite ends cannot deadlock.
/// The guards are returned in argument order.
pub fn write_both<'a, T>(
    a: &'a RwLock<T>,
    b: &'a RwLock<T>,
) -> (WriteGuard<'a, T>, WriteGuard<'a, T>) {
    debug_assert!(!core::ptr::eq(a, b));
    if (a as *const RwLock<T>) < (b as *const RwLock<T>) {
        let ga = a.write();
        let gb = b.write();
        (ga, gb)
    } else {
        let gb = b.write();
        let ga = a.write();
        (ga, gb)
    }
}
