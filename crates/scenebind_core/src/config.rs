//! Reconciler config: закрытые наборы ключей, о которых ядро и tree-driver
//! должны договориться байт-в-байт.

use std::rc::Rc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;

static DEFAULT_CONFIG: Lazy<ReconcilerConfig> = Lazy::new(ReconcilerConfig::default);

thread_local! {
    // Rc-копия default'а, одна на поток
    static SHARED_RC: Rc<ReconcilerConfig> = Rc::new(DEFAULT_CONFIG.clone());
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Lifecycle/attach/ref директивы. Differ и applier их не читают вообще.
    pub reserved_props: Vec<String>,

    /// Префиксы event-handler'ов (`onPointerDown`, `onClick`, ...).
    pub event_prefixes: Vec<String>,

    /// Aggregate-контейнеры, которые `dispose` не трогает (Scene).
    pub non_disposable_types: Vec<String>,

    /// Owned sub-resources, которые `dispose` освобождает на один уровень вглубь.
    pub disposable_fields: Vec<String>,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            reserved_props: ["children", "key", "ref", "args", "dispose", "attach", "object", "onUpdate"]
                .into_iter()
                .map(String::from)
                .collect(),
            event_prefixes: ["onPointer", "onClick", "onDoubleClick", "onContextMenu", "onWheel"]
                .into_iter()
                .map(String::from)
                .collect(),
            non_disposable_types: vec!["Scene".to_string()],
            disposable_fields: vec!["geometry".to_string(), "material".to_string()],
        }
    }
}

impl ReconcilerConfig {
    /// Process-wide default (для объектов без root'а)
    pub fn shared_default() -> &'static ReconcilerConfig {
        &DEFAULT_CONFIG
    }

    /// Тот же default, но как `Rc` (ApplyContext, dispose для объектов без root'а)
    pub fn shared_rc() -> Rc<ReconcilerConfig> {
        SHARED_RC.with(Rc::clone)
    }

    pub fn from_json(json: &str) -> Result<Self, ReconcileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_props.iter().any(|reserved| reserved == key)
    }

    pub fn is_event_handler(&self, key: &str) -> bool {
        self.event_prefixes.iter().any(|prefix| key.starts_with(prefix.as_str()))
    }

    pub fn is_non_disposable(&self, type_name: &str) -> bool {
        self.non_disposable_types.iter().any(|t| t == type_name)
    }
}
