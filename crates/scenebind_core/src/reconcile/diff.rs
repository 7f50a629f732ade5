//! Property Differ: минимальный набор изменённых/удалённых props
//!
//! Правила:
//! - reserved ключи пропускаются без чтения (ни с одной стороны)
//! - pierced ключ (`map-needsUpdate`) включается безусловно, если его root
//!   сегмент (`map`) сменил ссылку: вложенный объект новый, всё надо переприменить
//! - остальное: reference inequality (`is::same`)
//! - удалённые ключи → default значение свежего инстанса того же типа;
//!   нет default'а: ключ не попадает в результат

use crate::is;
use crate::logger;
use crate::model::{ObjectRef, Props};
use crate::reconcile::instance::Instance;
use crate::reconcile::resolve::{resolve, PIERCE_DELIMITER};

pub fn diff_props(instance: &Instance, new_props: &Props) -> Props {
    let config = instance.config();
    let previous = &instance.props;
    let mut changes = Props::new();

    for key in new_props.keys() {
        if config.is_reserved(key) {
            continue;
        }

        if let Some((root_segment, _)) = key.split_once(PIERCE_DELIMITER) {
            if !config.is_reserved(root_segment) && root_changed(previous, new_props, root_segment) {
                changes.insert(key, new_props.get(key));
                continue;
            }
        }

        let value = new_props.get(key);
        if !previous.contains_key(key) || !is::same(&previous.get(key), &value) {
            changes.insert(key, value);
        }
    }

    // Hot reload: удалённые ключи откатываются к default'у типа
    let mut defaults: Option<Option<ObjectRef>> = None;
    for key in previous.keys() {
        if config.is_reserved(key) || new_props.contains_key(key) {
            continue;
        }
        let Some(default_object) = defaults.get_or_insert_with(|| instance.construct_default()) else {
            logger::log(&format!(
                "diff: no default for <{}>, removed '{}' left as is",
                instance.type_name, key
            ));
            continue;
        };
        let default_value = resolve(default_object, key).target;
        if default_value.is_undefined() {
            continue;
        }
        changes.insert(key, default_value);
    }

    changes
}

fn root_changed(previous: &Props, next: &Props, root_segment: &str) -> bool {
    let present = previous.contains_key(root_segment) || next.contains_key(root_segment);
    present && !is::same(&previous.get(root_segment), &next.get(root_segment))
}
