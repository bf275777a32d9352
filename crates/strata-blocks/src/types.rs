use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of ground bands, ordered low to high elevation.
pub const GROUND_BANDS: usize = 5;

/// Number of renderable buckets: every ground band plus water.
pub const BUCKET_COUNT: usize = GROUND_BANDS + 1;

/// One voxel cell. The discriminant is the stored byte code.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    DarkSand = 0,
    Sand = 1,
    LowGround = 2,
    MidGround = 3,
    HighGround = 4,
    Water = 5,
    #[default]
    Air = 6,
}

impl TerrainType {
    pub const ALL: [TerrainType; 7] = [
        TerrainType::DarkSand,
        TerrainType::Sand,
        TerrainType::LowGround,
        TerrainType::MidGround,
        TerrainType::HighGround,
        TerrainType::Water,
        TerrainType::Air,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a stored byte; unknown codes yield `None`.
    #[inline]
    pub const fn from_code(code: u8) -> Option<TerrainType> {
        match code {
            0 => Some(TerrainType::DarkSand),
            1 => Some(TerrainType::Sand),
            2 => Some(TerrainType::LowGround),
            3 => Some(TerrainType::MidGround),
            4 => Some(TerrainType::HighGround),
            5 => Some(TerrainType::Water),
            6 => Some(TerrainType::Air),
            _ => None,
        }
    }

    /// Ground band by index `0..GROUND_BANDS`. Indices past the top band clamp to it.
    #[inline]
    pub const fn ground_band(index: usize) -> TerrainType {
        match index {
            0 => TerrainType::DarkSand,
            1 => TerrainType::Sand,
            2 => TerrainType::LowGround,
            3 => TerrainType::MidGround,
            _ => TerrainType::HighGround,
        }
    }

    #[inline]
    pub const fn is_ground(self) -> bool {
        matches!(
            self,
            TerrainType::DarkSand
                | TerrainType::Sand
                | TerrainType::LowGround
                | TerrainType::MidGround
                | TerrainType::HighGround
        )
    }

    #[inline]
    pub const fn is_water(self) -> bool {
        matches!(self, TerrainType::Water)
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        matches!(self, TerrainType::Air)
    }

    /// Mesh bucket for this cell; air has none.
    #[inline]
    pub const fn bucket(self) -> Option<usize> {
        match self {
            TerrainType::Air => None,
            other => Some(other as usize),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TerrainType::DarkSand => "dark_sand",
            TerrainType::Sand => "sand",
            TerrainType::LowGround => "low_ground",
            TerrainType::MidGround => "mid_ground",
            TerrainType::HighGround => "high_ground",
            TerrainType::Water => "water",
            TerrainType::Air => "air",
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_covers_exactly_the_five_bands() {
        let ground: Vec<_> = TerrainType::ALL.iter().filter(|t| t.is_ground()).collect();
        assert_eq!(ground.len(), GROUND_BANDS);
        assert!(!TerrainType::Water.is_ground());
        assert!(!TerrainType::Air.is_ground());
    }

    #[test]
    fn codes_round_trip_and_reject_unknown() {
        for t in TerrainType::ALL {
            assert_eq!(TerrainType::from_code(t.code()), Some(t));
        }
        assert_eq!(TerrainType::from_code(7), None);
        assert_eq!(TerrainType::from_code(255), None);
    }

    #[test]
    fn buckets_cover_ground_and_water_only() {
        assert_eq!(TerrainType::Air.bucket(), None);
        assert_eq!(TerrainType::Water.bucket(), Some(BUCKET_COUNT - 1));
        for i in 0..GROUND_BANDS {
            assert_eq!(TerrainType::ground_band(i).bucket(), Some(i));
        }
        assert_eq!(TerrainType::ground_band(9), TerrainType::HighGround);
    }
}
