//! Process-wide configuration slot.
//!
//! Holds at most one configuration value of any type. Writes replace the whole
//! value atomically and reads never take a lock, so a reader sees either the
//! previous value or the new one.
//!
//! ## Example
//!
//! ```
//! use cfgtree::{global_config, set_global_config};
//!
//! #[derive(Debug, PartialEq)]
//! struct AppConfig {
//!     name: String,
//! }
//!
//! set_global_config(AppConfig { name: "svc".into() });
//!
//! let config = global_config::<AppConfig>().unwrap();
//! assert_eq!(config.name, "svc");
//! ```

use std::any::{type_name, Any};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::Error;

/// Type-erased value stored in the slot.
struct GlobalValue {
    value: Arc<dyn Any + Send + Sync>,
}

static GLOBAL_CONFIG: ArcSwapOption<GlobalValue> = ArcSwapOption::const_empty();

/// Stores `value` as the global configuration, replacing any previous one.
pub fn set_global_config<T: Any + Send + Sync>(value: T) {
    GLOBAL_CONFIG.store(Some(Arc::new(GlobalValue {
        value: Arc::new(value),
    })));
}

/// Returns the current global configuration, or `None` if none has been set.
pub fn get_global_config() -> Option<Arc<dyn Any + Send + Sync>> {
    GLOBAL_CONFIG
        .load_full()
        .map(|global| Arc::clone(&global.value))
}

/// Returns the global configuration if it is set and is a `T`.
pub fn global_config<T: Any + Send + Sync>() -> Option<Arc<T>> {
    get_global_config()?.downcast::<T>().ok()
}

/// Like [`global_config`], but reports why no `T` is available.
pub fn try_global_config<T: Any + Send + Sync>() -> Result<Arc<T>, Error> {
    get_global_config()
        .ok_or(Error::MissingGlobalConfig)?
        .downcast::<T>()
        .map_err(|_| Error::GlobalConfigType {
            expected: type_name::<T>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::thread;

    use crate::ConfigTree;

    #[derive(Debug, PartialEq)]
    struct Pair {
        left: u64,
        right: u64,
    }

    #[test]
    #[serial]
    fn test_set_then_get() {
        set_global_config(Pair { left: 1, right: 1 });
        let pair = global_config::<Pair>().unwrap();
        assert_eq!(*pair, Pair { left: 1, right: 1 });
    }

    #[test]
    #[serial]
    fn test_set_replaces_previous() {
        set_global_config(Pair { left: 1, right: 1 });
        set_global_config(Pair { left: 2, right: 2 });
        assert_eq!(global_config::<Pair>().unwrap().left, 2);
    }

    #[test]
    #[serial]
    fn test_wrong_type() {
        set_global_config(String::from("not a pair"));
        assert!(global_config::<Pair>().is_none());
        assert!(matches!(
            try_global_config::<Pair>(),
            Err(Error::GlobalConfigType { .. })
        ));
        assert_eq!(*try_global_config::<String>().unwrap(), "not a pair");
    }

    #[test]
    #[serial]
    fn test_config_tree_as_global() {
        let tree: ConfigTree = toml::from_str("port = 8080").unwrap();
        set_global_config(tree);
        let tree = global_config::<ConfigTree>().unwrap();
        assert_eq!(tree.get_uint32("port", 0), 8080);
    }

    #[test]
    #[serial]
    fn test_previous_value_outlives_replacement() {
        set_global_config(Pair { left: 3, right: 3 });
        let held = global_config::<Pair>().unwrap();
        set_global_config(Pair { left: 4, right: 4 });
        assert_eq!(held.left, 3);
        assert_eq!(global_config::<Pair>().unwrap().left, 4);
    }

    #[test]
    #[serial]
    fn test_concurrent_readers_never_see_torn_value() {
        set_global_config(Pair { left: 0, right: 0 });

        let writers: Vec<_> = (1..=4u64)
            .map(|id| {
                thread::spawn(move || {
                    for i in 0..500 {
                        let n = id * 1_000 + i;
                        set_global_config(Pair { left: n, right: n });
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                thread::spawn(|| {
                    for _ in 0..2_000 {
                        let pair = global_config::<Pair>().unwrap();
                        assert_eq!(pair.left, pair.right);
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
    }
}
