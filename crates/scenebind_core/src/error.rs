//! Ошибки reconciler'а
//!
//! Ядро не бросает ошибок на "обычный" misuse (нет свойства, неизвестный путь,
//! несовпадение типов): такие случаи деградируют в no-op или прямое присваивание.
//! `ReconcileError`: только то, что пришло из пользовательского кода
//! (attach-функции, native методы объектов, onUpdate) и пробрасывается как есть.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Attach/unmount функция вернула ошибку.
    #[error("attach directive failed: {0}")]
    Directive(String),

    /// Native метод live-объекта (`set`, `copy`, `dispose`, ...) вернул ошибку.
    #[error("method `{method}` failed on {class}: {message}")]
    Method {
        class: String,
        method: String,
        message: String,
    },

    /// Пользовательская функция (Value::Function) вернула ошибку.
    #[error("callback failed: {0}")]
    Callback(String),

    /// Конфиг не распарсился.
    #[error("invalid reconciler config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ReconcileError {
    pub fn method(class: impl Into<String>, method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Method {
            class: class.into(),
            method: method.into(),
            message: message.into(),
        }
    }
}
