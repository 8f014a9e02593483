//! Permission manager implementation
//!
//! Decides whether a state-changing tool may run without a human in the loop,
//! using "always allow" / "always deny" sets and a fallback decision.

use std::collections::HashSet;

/// Manages permissions for tool execution
#[derive(Debug, Clone, Default)]
pub struct PermissionManager {
    /// Tools that are always allowed
    always_allow: HashSet<String>,
    /// Tools that are always denied
    always_deny: HashSet<String>,
    /// Decision for permission-requiring tools with no explicit entry
    allow_by_default: bool,
}

impl PermissionManager {
    /// Create a manager that denies permission-requiring tools unless allowed
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager that allows every tool not explicitly denied
    pub fn allow_all() -> Self {
        Self {
            allow_by_default: true,
            ..Self::default()
        }
    }

    /// Set a tool to always be allowed
    pub fn always_allow_tool(&mut self, tool_name: impl Into<String>) {
        let name = tool_name.into();
        tracing::info!("Setting tool to always allow: {}", name);
        self.always_deny.remove(&name);
        self.always_allow.insert(name);
    }

    /// Set a tool to always be denied
    pub fn always_deny_tool(&mut self, tool_name: impl Into<String>) {
        let name = tool_name.into();
        tracing::info!("Setting tool to always deny: {}", name);
        self.always_allow.remove(&name);
        self.always_deny.insert(name);
    }

    /// Explicit decision for a tool, if one was recorded
    ///
    /// Returns:
    /// - Some(true) if the tool is always allowed
    /// - Some(false) if the tool is always denied
    /// - None if there is no explicit entry
    pub fn check_auto_decision(&self, tool_name: &str) -> Option<bool> {
        if self.always_allow.contains(tool_name) {
            return Some(true);
        }
        if self.always_deny.contains(tool_name) {
            return Some(false);
        }
        None
    }

    /// Whether a tool may run now
    ///
    /// An explicit "always deny" blocks any tool. Tools that don't require
    /// permission otherwise always run.
    pub fn is_allowed(&self, tool_name: &str, requires_permission: bool) -> bool {
        match self.check_auto_decision(tool_name) {
            Some(decision) => decision,
            None if !requires_permission => true,
            None => self.allow_by_default,
        }
    }
}
