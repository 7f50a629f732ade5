//! scenebind core: instance/property reconciliation
//!
//! Синхронизирует декларативное дерево element descriptors (type + props)
//! с императивным графом live-объектов.
//!
//! Архитектура:
//! - model: dynamic value model (Value, ObjectRef, Class, Props)
//! - reconcile: prepare / resolve / attach / detach / diff_props / apply_props / update
//! - scene: update_camera, dispose, build_graph
//! - root: RootState (config, factory, color management, invalidation)
//!
//! Когда рендерить и *какие* descriptors существуют, решает внешний tree-driver;
//! ядро отвечает только за то, *как* descriptor превращается в live-объект и
//! как props на нём поддерживаются в актуальном состоянии.
//!
//! Всё однопоточное и синхронное (Rc/RefCell), single-writer.

pub mod config;
pub mod error;
pub mod factory;
pub mod is;
pub mod logger;
pub mod model;
pub mod reconcile;
pub mod root;
pub mod scene;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ReconcilerConfig;
pub use error::ReconcileError;
pub use factory::{pascal_case, InstanceFactory};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use model::{ArrayRef, Callable, Class, ClassBuilder, ObjectRef, PropEntry, Props, Value};
pub use reconcile::{
    apply_props, attach, detach, diff_props, get_instance_props, prepare, resolve, update, update_handlers,
    AttachDirective, Instance, InstanceRef, Resolved,
};
pub use root::{find_initial_root, get_root_state, RootRef, RootState, Size};
pub use scene::{
    build_graph, calculate_dpr, dispose, is_orthographic_camera, is_perspective_camera, update_camera, Dpr, Graph,
};
