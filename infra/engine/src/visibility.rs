//! Visibility groups and depth limits for [`wire_model`](crate::wire_model) types.
//!
//! The engine opens a scope for every `serialize` call with [`enter`]. While it is open,
//! generated field predicates ask [`is_visible`] whether the field is written, and
//! [`nested`] tracks how deep the writer is in the object graph. The scope lives in a
//! thread local and is restored when the guard drops, so calls on different threads and
//! nested calls on the same thread do not see each other.

use mgate_domain::constants::DEFAULT_GROUP;
use mgate_negotiation::SerializationContext;
use serde::{Serialize, Serializer};
use std::cell::RefCell;

#[derive(Debug)]
struct Scope {
    groups: Vec<String>,
    max_depth_checks: bool,
    /// Depth of the object whose fields are being written. The root object is 1.
    depth: u32,
}

impl Scope {
    fn admits(&self, field_groups: &[&str]) -> bool {
        if self.groups.is_empty() {
            return true;
        }
        if field_groups.is_empty() {
            return self.groups.iter().any(|group| group == DEFAULT_GROUP);
        }
        field_groups.iter().any(|field| self.groups.iter().any(|group| group == field))
    }

    fn within_depth(&self, max_depth: Option<u32>) -> bool {
        !self.max_depth_checks || max_depth.is_none_or(|limit| self.depth <= limit)
    }
}

thread_local! {
    static SCOPE: RefCell<Option<Scope>> = const { RefCell::new(None) };
}

/// Restores the previous scope when dropped.
#[derive(Debug)]
#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct ScopeGuard {
    previous: Option<Scope>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        let _ = SCOPE.try_with(|cell| *cell.borrow_mut() = previous);
    }
}

/// Opens a visibility scope for the current thread.
pub fn enter(context: &SerializationContext) -> ScopeGuard {
    let scope = Scope {
        groups: context.groups().to_vec(),
        max_depth_checks: context.max_depth_checks_enabled(),
        depth: 1,
    };
    let previous = SCOPE.with(|cell| cell.replace(Some(scope)));
    ScopeGuard { previous }
}

/// Whether a field is written in the current scope.
///
/// `field_groups` empty means the field belongs to the `Default` group. `max_depth` only
/// applies when the scope has depth checks enabled. Without a scope every field is visible.
#[must_use]
pub fn is_visible(field_groups: &[&str], max_depth: Option<u32>) -> bool {
    SCOPE.with(|cell| {
        cell.borrow()
            .as_ref()
            .is_none_or(|scope| scope.admits(field_groups) && scope.within_depth(max_depth))
    })
}

/// Current object depth, `None` outside a scope.
#[must_use]
pub fn depth() -> Option<u32> {
    SCOPE.with(|cell| cell.borrow().as_ref().map(|scope| scope.depth))
}

/// `serialize_with` hook writing a field value one level deeper than its owner.
///
/// # Errors
/// Whatever `value`'s own `Serialize` implementation returns.
pub fn nested<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize + ?Sized,
    S: Serializer,
{
    let _level = Level::descend();
    value.serialize(serializer)
}

struct Level {
    active: bool,
}

impl Level {
    fn descend() -> Self {
        let active = SCOPE.with(|cell| match cell.borrow_mut().as_mut() {
            Some(scope) => {
                scope.depth = scope.depth.saturating_add(1);
                true
            },
            None => false,
        });
        Self { active }
    }
}

impl Drop for Level {
    fn drop(&mut self) {
        if self.active {
            let _ = SCOPE.try_with(|cell| {
                if let Some(scope) = cell.borrow_mut().as_mut() {
                    scope.depth = scope.depth.saturating_sub(1);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(groups: &[&str]) -> SerializationContext {
        SerializationContext::new().with_groups(groups.iter().copied()).enable_max_depth_checks()
    }

    #[test]
    fn everything_is_visible_outside_a_scope() {
        assert!(is_visible(&["admin"], Some(0)));
        assert!(is_visible(&[], None));
        assert_eq!(depth(), None);
    }

    #[test]
    fn empty_context_groups_admit_every_field() {
        let _scope = enter(&context(&[]));
        assert!(is_visible(&[], None));
        assert!(is_visible(&["admin"], None));
    }

    #[test]
    fn groups_must_intersect() {
        let _scope = enter(&context(&["list", "Default"]));
        assert!(is_visible(&[], None));
        assert!(is_visible(&["detail", "list"], None));
        assert!(!is_visible(&["detail"], None));
    }

    #[test]
    fn ungrouped_fields_belong_to_default() {
        let _scope = enter(&context(&["list"]));
        assert!(!is_visible(&[], None));
        assert!(is_visible(&["list"], None));
    }

    #[test]
    fn depth_limits_follow_nesting() {
        let _scope = enter(&context(&[]));
        assert_eq!(depth(), Some(1));
        assert!(is_visible(&[], Some(1)));

        let level = Level::descend();
        assert_eq!(depth(), Some(2));
        assert!(!is_visible(&[], Some(1)));
        assert!(is_visible(&[], Some(2)));
        drop(level);

        assert_eq!(depth(), Some(1));
        assert!(is_visible(&[], Some(1)));
    }

    #[test]
    fn depth_limits_need_checks_enabled() {
        let _scope = enter(&SerializationContext::new());
        let _level = Level::descend();
        assert!(is_visible(&[], Some(1)));
    }

    #[test]
    fn scopes_restore_on_drop() {
        let outer = enter(&context(&["outer"]));
        {
            let _inner = enter(&context(&["inner"]));
            assert!(is_visible(&["inner"], None));
            assert!(!is_visible(&["outer"], None));
        }
        assert!(is_visible(&["outer"], None));
        drop(outer);
        assert_eq!(depth(), None);
    }

    #[test]
    fn scopes_are_per_thread() {
        let _scope = enter(&context(&["main"]));
        let seen = std::thread::spawn(|| is_visible(&["other"], None)).join().unwrap();
        assert!(seen);
        assert!(!is_visible(&["other"], None));
    }
}
