//! Synchronization primitives
//! 
//! The locks are `parking_lot`'s: they can't be poisoned, so locking never returns a `Result`.

pub use parking_lot::{
    Mutex,
    MutexGuard,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};
