//! Camera/viewport helpers: projection refresh под размер viewport'а, DPR.
//!
//! Тип камеры определяется по полям (duck typing), не по классу:
//! caller может передать свой camera-like объект.

use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;
use crate::is;
use crate::model::{ObjectRef, Value};
use crate::root::Size;

/// Device pixel ratio: фиксированный или диапазон `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dpr {
    Fixed(f64),
    Range(f64, f64),
}

impl Default for Dpr {
    fn default() -> Self {
        Dpr::Fixed(1.0)
    }
}

/// Неизвестный device ratio считается 1.0
pub fn calculate_dpr(dpr: Dpr, device_ratio: Option<f64>) -> f64 {
    match dpr {
        Dpr::Fixed(value) => value,
        Dpr::Range(min, max) => device_ratio.unwrap_or(1.0).max(min).min(max),
    }
}

const ORTHOGRAPHIC_FIELDS: [&str; 4] = ["left", "right", "top", "bottom"];

pub fn is_orthographic_camera(camera: &ObjectRef) -> bool {
    ORTHOGRAPHIC_FIELDS
        .iter()
        .all(|field| camera.number(field).is_some())
}

pub fn is_perspective_camera(camera: &ObjectRef) -> bool {
    camera.number("aspect").is_some()
}

/// Пересчитать projection параметры под viewport.
/// `manual` камеры не трогаем: projection matrix принадлежит caller'у.
pub fn update_camera(camera: &ObjectRef, size: &Size) -> Result<(), ReconcileError> {
    if is::truthy(&camera.get("manual")) {
        return Ok(());
    }

    if is_orthographic_camera(camera) {
        camera.set("left", Value::from(size.width / -2.0));
        camera.set("right", Value::from(size.width / 2.0));
        camera.set("top", Value::from(size.height / 2.0));
        camera.set("bottom", Value::from(size.height / -2.0));
    } else if is_perspective_camera(camera) {
        // Нулевая высота (свёрнутое окно): aspect оставляем прежним
        if size.height > 0.0 {
            camera.set("aspect", Value::from(size.width / size.height));
        }
    } else {
        return Ok(());
    }

    camera.call("updateProjectionMatrix", &[])?;
    camera.call("updateMatrixWorld", &[])?;
    Ok(())
}
