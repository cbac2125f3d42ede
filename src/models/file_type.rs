use crate::utils::constants::*;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Closed set of supported ICES extract types. Bottle and CTD share a
/// schema but stay distinct tags for future divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum FileType {
    #[value(name = "bot")]
    Bottle,
    #[value(name = "ctd")]
    Ctd,
    #[value(name = "xbt")]
    Xbt,
}

/// Column sets describing one extract schema: which source columns form the
/// cast grouping key and which carry per-row measurements.
#[derive(Debug, Clone, Copy)]
pub struct FileSchema {
    pub group_columns: &'static [&'static str],
    pub measurement_columns: &'static [&'static str],
    pub has_bottom_depth: bool,
    pub has_pressure_salinity: bool,
}

const BOTTLE_CTD_SCHEMA: FileSchema = FileSchema {
    group_columns: &[
        COL_CRUISE,
        COL_STATION,
        COL_YEAR,
        COL_MONTH,
        COL_DAY,
        COL_HOUR,
        COL_MINUTE,
        COL_LONGITUDE,
        COL_LATITUDE,
        COL_BOTTOM_DEPTH,
    ],
    measurement_columns: &[COL_DEPTH, COL_PRESSURE, COL_TEMPERATURE, COL_SALINITY],
    has_bottom_depth: true,
    has_pressure_salinity: true,
};

const XBT_SCHEMA: FileSchema = FileSchema {
    group_columns: &[
        COL_CRUISE,
        COL_STATION,
        COL_YEAR,
        COL_MONTH,
        COL_DAY,
        COL_HOUR,
        COL_MINUTE,
        COL_LONGITUDE,
        COL_LATITUDE,
    ],
    measurement_columns: &[COL_DEPTH, COL_TEMPERATURE],
    has_bottom_depth: false,
    has_pressure_salinity: false,
};

impl FileType {
    pub fn schema(&self) -> &'static FileSchema {
        match self {
            FileType::Bottle | FileType::Ctd => &BOTTLE_CTD_SCHEMA,
            FileType::Xbt => &XBT_SCHEMA,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            FileType::Bottle => "bot",
            FileType::Ctd => "ctd",
            FileType::Xbt => "xbt",
        }
    }
}

impl FileSchema {
    /// All columns the input header must carry for this schema.
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.group_columns
            .iter()
            .chain(self.measurement_columns.iter())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottle_and_ctd_share_schema() {
        let bot = FileType::Bottle.schema();
        let ctd = FileType::Ctd.schema();
        assert_eq!(bot.group_columns, ctd.group_columns);
        assert_eq!(bot.measurement_columns, ctd.measurement_columns);
        assert!(bot.has_bottom_depth);
        assert!(bot.has_pressure_salinity);
    }

    #[test]
    fn test_xbt_schema_excludes_bottom_depth_and_pressure() {
        let schema = FileType::Xbt.schema();
        assert!(!schema.has_bottom_depth);
        assert!(!schema.has_pressure_salinity);
        assert!(!schema.group_columns.contains(&COL_BOTTOM_DEPTH));
        assert_eq!(schema.measurement_columns, &[COL_DEPTH, COL_TEMPERATURE]);
    }

    #[test]
    fn test_required_columns_counts() {
        assert_eq!(FileType::Bottle.schema().required_columns().count(), 14);
        assert_eq!(FileType::Xbt.schema().required_columns().count(), 11);
    }

    #[test]
    fn test_tags() {
        assert_eq!(FileType::Bottle.tag(), "bot");
        assert_eq!(FileType::Ctd.tag(), "ctd");
        assert_eq!(FileType::Xbt.tag(), "xbt");
    }
}
