//! Permission system for tool execution
//!
//! Gates state-changing tools (those whose `requires_permission()` is true)
//! before they run on behalf of an agent.

mod manager;

pub use manager::PermissionManager;
