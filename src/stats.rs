use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::terrain::{TerrainType, Tile};

/// Гистограмма типов местности. Все пять типов присутствуют всегда,
/// отсутствующие имеют счётчик 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<TerrainType, usize>", into = "BTreeMap<TerrainType, usize>")]
pub struct TerrainStats {
    counts: BTreeMap<TerrainType, usize>,
}

impl Default for TerrainStats {
    fn default() -> Self {
        Self {
            counts: TerrainType::ALL.iter().map(|&t| (t, 0)).collect(),
        }
    }
}

impl From<BTreeMap<TerrainType, usize>> for TerrainStats {
    fn from(parsed: BTreeMap<TerrainType, usize>) -> Self {
        let mut stats = Self::default();
        stats.counts.extend(parsed);
        stats
    }
}

impl From<TerrainStats> for BTreeMap<TerrainType, usize> {
    fn from(stats: TerrainStats) -> Self {
        stats.counts
    }
}

impl TerrainStats {
    #[must_use]
    pub fn get(&self, terrain: TerrainType) -> usize {
        self.counts.get(&terrain).copied().unwrap_or(0)
    }

    /// Сумма всех счётчиков, равна длине исходного набора тайлов.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Доля типа в процентах от общего числа тайлов.
    #[must_use]
    pub fn share(&self, terrain: TerrainType) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(terrain) as f64 * 100.0 / total as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerrainType, usize)> + '_ {
        self.counts.iter().map(|(&t, &n)| (t, n))
    }

    fn record(&mut self, terrain: TerrainType) {
        *self.counts.entry(terrain).or_insert(0) += 1;
    }
}

/// Считает тайлы каждого типа. Набор может быть любым:
/// вся карта, её часть или видимая область.
#[must_use]
pub fn summarize<'a, I>(tiles: I) -> TerrainStats
where
    I: IntoIterator<Item = &'a Tile>,
{
    let mut stats = TerrainStats::default();
    for tile in tiles {
        stats.record(tile.terrain_type);
    }
    stats
}
