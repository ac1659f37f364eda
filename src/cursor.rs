//! Линейный конгруэнтный генератор для выбора сида по умолчанию.
//!
//! Курсор не участвует в расчёте тайлов: значения шума зависят только от
//! координат. Он нужен лишь тогда, когда вызывающая сторона не передала сид.

use tracing::debug;

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Верхняя граница (не включительно) для сида, выбранного курсором.
pub const DEFAULT_SEED_RANGE: f64 = 1_000_000.0;

/// Состояние LCG. Хранится в `u64`: любой `u32` × 9301 помещается без переполнения,
/// а после первого шага состояние всегда меньше 233280.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCursor {
    seed: u64,
}

impl SeedCursor {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            seed: u64::from(seed),
        }
    }

    /// Текущее состояние курсора.
    #[must_use]
    pub fn state(&self) -> u64 {
        self.seed
    }

    #[allow(clippy::should_implement_trait)]
    /// Делает шаг `seed = (seed * 9301 + 49297) mod 233280` и возвращает
    /// `seed / 233280` в диапазоне `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.seed = (self.seed * MULTIPLIER + INCREMENT) % MODULUS;
        self.seed as f64 / MODULUS as f64
    }
}

/// Возвращает запрошенный сид, а если его нет, выводит сид из `entropy`
/// одним шагом курсора: `floor(next() * 1_000_000)`.
///
/// `entropy` передаёт вызывающая сторона (CLI берёт его из `rand`),
/// сама библиотека глобальную случайность не трогает.
///
/// # Примеры
/// ```
/// use terrain_gen::cursor::resolve_seed;
/// assert_eq!(resolve_seed(Some(7), 123), 7);
/// assert_eq!(resolve_seed(None, 42), 885_883);
/// ```
#[must_use]
pub fn resolve_seed(requested: Option<u32>, entropy: u32) -> u32 {
    if let Some(seed) = requested {
        return seed;
    }
    let mut cursor = SeedCursor::new(entropy);
    let seed = (cursor.next() * DEFAULT_SEED_RANGE).floor() as u32;
    debug!(entropy, seed, "Seed not supplied, derived from cursor");
    seed
}
