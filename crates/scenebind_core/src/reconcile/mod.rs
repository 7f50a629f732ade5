//! Instance/property reconciliation
//!
//! Control flow со стороны tree-driver'а:
//! 1. prepare: дескриптор на новый объект
//! 2. attach: вклеить в слот parent'а
//! 3. diff_props + apply_props (или update): на каждый prop update
//! 4. detach + dispose: при удалении

pub mod apply;
pub mod attach;
pub mod diff;
pub mod instance;
pub mod resolve;

#[cfg(test)]
mod instance_tests;

pub use apply::{apply_props, update};
pub use attach::{attach, attach_directive, detach, AttachDirective};
pub use diff::diff_props;
pub use instance::{get_instance_props, get_instance_props_with, prepare, update_handlers, Instance, InstanceRef};
pub use resolve::{index_of, is_index, resolve, resolve_or_create, resolve_with, Container, Resolved, PIERCE_DELIMITER};
