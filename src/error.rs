//! Ошибки генерации карты.

use thiserror::Error;

/// Результат с [`TerrainError`].
pub type Result<T> = std::result::Result<T, TerrainError>;

/// Все ошибки генератора. Любая ошибка прерывает вызов целиком:
/// частично заполненный набор тайлов наружу не отдаётся.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// Ширина или высота карты равна нулю.
    #[error("Invalid map dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Запрошенная ширина.
        width: u32,
        /// Запрошенная высота.
        height: u32,
    },

    /// Масштаб шума не конечен или не положителен.
    #[error("Invalid noise scale: {0}")]
    InvalidScale(f64),

    /// Промежуточное значение шума стало NaN или бесконечностью.
    #[error("Non-finite {field} sample at ({x}, {y})")]
    NumericDomain {
        /// Координата X.
        x: f64,
        /// Координата Y.
        y: f64,
        /// Какое поле считалось (elevation / moisture).
        field: &'static str,
    },

    /// Не удалось прочитать или разобрать конфигурацию.
    #[error("Failed to load config '{path}': {message}")]
    Config {
        /// Путь к файлу или источник данных.
        path: String,
        /// Сообщение об ошибке.
        message: String,
    },

    /// Не удалось сериализовать ответ.
    #[error("Failed to serialize response: {0}")]
    Serialize(String),

    /// Не удалось собрать или сохранить изображение.
    #[error("Failed to render map: {0}")]
    Render(String),
}
