// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Filter hooks.
//!
//! A hook passes a value through every registered listener in ascending
//! priority order. Listeners with equal priority run in registration order.
//! Plugins use hooks to rewrite values the service produces, such as the
//! avatar URL shown in the user menu.

use std::fmt;

use crate::models::User;

type Listener<V, A> = Box<dyn Fn(V, &A) -> V + Send + Sync>;

/// A chain of listeners rewriting a `V`, each also seeing an `A`.
pub struct Hook<V, A: ?Sized> {
    listeners: Vec<(i32, Listener<V, A>)>,
}

impl<V, A: ?Sized> Default for Hook<V, A> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<V, A: ?Sized> fmt::Debug for Hook<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let priorities: Vec<i32> = self.listeners.iter().map(|(p, _)| *p).collect();
        f.debug_struct("Hook").field("priorities", &priorities).finish()
    }
}

impl<V, A: ?Sized> Hook<V, A> {
    pub fn add<F>(&mut self, priority: i32, listener: F)
    where
        F: Fn(V, &A) -> V + Send + Sync + 'static,
    {
        let at = self.listeners.partition_point(|(p, _)| *p <= priority);
        self.listeners.insert(at, (priority, Box::new(listener)));
    }

    pub fn apply(&self, value: V, arg: &A) -> V {
        self.listeners
            .iter()
            .fold(value, |value, (_, listener)| listener(value, arg))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Every hook the service applies.
#[derive(Debug, Default)]
pub struct Filters {
    /// Avatar URL of the user menu; receives the menu's user.
    pub user_avatar: Hook<String, User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Permission;

    fn user() -> User {
        User {
            uid: 7,
            email: "kumiko@example.com".into(),
            nickname: "kumiko".into(),
            avatar: 0,
            permission: Permission::Normal,
        }
    }

    #[test]
    fn empty_hook_returns_input() {
        let hook: Hook<String, User> = Hook::default();
        assert!(hook.is_empty());
        assert_eq!(hook.apply("url".into(), &user()), "url");
    }

    #[test]
    fn listeners_run_by_priority() {
        let mut hook: Hook<String, User> = Hook::default();
        hook.add(20, |v, _| format!("{v}-late"));
        hook.add(5, |v, _| format!("{v}-early"));
        hook.add(20, |v, _| format!("{v}-later"));

        assert_eq!(hook.len(), 3);
        assert_eq!(hook.apply("x".into(), &user()), "x-early-late-later");
    }

    #[test]
    fn listeners_see_the_argument() {
        let mut filters = Filters::default();
        filters
            .user_avatar
            .add(10, |v, user: &User| format!("{v}#uid={}", user.uid));

        assert_eq!(filters.user_avatar.apply("a".into(), &user()), "a#uid=7");
    }
}
