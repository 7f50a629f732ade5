//! Render-root context, на который ссылается каждый Instance Descriptor.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::ReconcilerConfig;
use crate::factory::InstanceFactory;
use crate::logger;
use crate::model::ObjectRef;
use crate::reconcile::instance::Instance;
use crate::scene::camera::Dpr;

pub type RootRef = Rc<RefCell<RootState>>;

/// Viewport size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 0.0,
            top: 0.0,
        }
    }
}

pub struct RootState {
    pub config: Rc<ReconcilerConfig>,
    /// Back-reference на root, из которого смонтировали поддерево (portals)
    pub previous_root: Option<RootRef>,
    pub factory: Option<Rc<dyn InstanceFactory>>,
    /// `false`: color management включён (sRGB → linear при записи цветов)
    pub linear: bool,
    pub size: Size,
    pub dpr: Dpr,
    pending_frames: u32,
}

impl Default for RootState {
    fn default() -> Self {
        Self::new()
    }
}

impl RootState {
    pub fn new() -> Self {
        logger::init_logger();
        Self {
            config: ReconcilerConfig::shared_rc(),
            previous_root: None,
            factory: None,
            linear: false,
            size: Size::default(),
            dpr: Dpr::default(),
            pending_frames: 0,
        }
    }

    pub fn with_factory(mut self, factory: Rc<dyn InstanceFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn with_config(mut self, config: ReconcilerConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    pub fn with_previous_root(mut self, previous: &RootRef) -> Self {
        self.previous_root = Some(previous.clone());
        self
    }

    pub fn with_linear(mut self, linear: bool) -> Self {
        self.linear = linear;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn into_ref(self) -> RootRef {
        Rc::new(RefCell::new(self))
    }

    /// Запросить ещё один кадр (что-то в графе поменялось)
    pub fn invalidate(&mut self) {
        self.pending_frames = self.pending_frames.saturating_add(1);
    }

    pub fn pending_frames(&self) -> u32 {
        self.pending_frames
    }

    /// Render loop забирает один кадр. `false`: рисовать нечего.
    pub fn consume_frame(&mut self) -> bool {
        if self.pending_frames == 0 {
            return false;
        }
        self.pending_frames -= 1;
        true
    }
}

/// Root без дальнейшего `previous_root` (цепочка конечна: циклы не проверяются)
pub fn find_initial_root(instance: &Instance) -> RootRef {
    let mut root = instance.root.clone();
    loop {
        let previous = root.borrow().previous_root.clone();
        match previous {
            Some(previous) => root = previous,
            None => return root,
        }
    }
}

/// Root дескриптора, висящего на объекте
pub fn get_root_state(object: &ObjectRef) -> Option<RootRef> {
    object.instance().map(|instance| instance.borrow().root.clone())
}
