/// ICES source column names (verbatim header spellings)
pub const COL_CRUISE: &str = "Cruise";
pub const COL_STATION: &str = "Station";
pub const COL_YEAR: &str = "Year";
pub const COL_MONTH: &str = "Month";
pub const COL_DAY: &str = "Day";
pub const COL_HOUR: &str = "Hour";
pub const COL_MINUTE: &str = "Minute";
pub const COL_LONGITUDE: &str = "Longitude [degrees_east]";
pub const COL_LATITUDE: &str = "Latitude [degrees_north]";
pub const COL_BOTTOM_DEPTH: &str = "Bot. Depth [m]";
pub const COL_DEPTH: &str = "Depth [m]";
pub const COL_TEMPERATURE: &str = "Temperature [degC]";
pub const COL_PRESSURE: &str = "Pressure [dbar]";
pub const COL_SALINITY: &str = "Practical Salinity [dmnless]";

/// Output variable names
pub const VAR_TIMESTAMP: &str = "timestamp";
pub const VAR_LAT: &str = "lat";
pub const VAR_LON: &str = "lon";
pub const VAR_CRUISE_ID: &str = "orig_cruise_id";
pub const VAR_STATION_NO: &str = "station_no";
pub const VAR_DATESTR: &str = "datestr";
pub const VAR_BOTTOM_DEPTH: &str = "bottom_depth";
pub const VAR_SHALLOWEST_DEPTH: &str = "shallowest_depth";
pub const VAR_DEEPEST_DEPTH: &str = "deepest_depth";
pub const VAR_DEPTH: &str = "depth";
pub const VAR_PRESSURE: &str = "press";
pub const VAR_TEMPERATURE: &str = "temp";
pub const VAR_SALINITY: &str = "psal";
pub const VAR_PARENT_INDEX: &str = "parent_index";

/// Output dimension names
pub const DIM_PROFILE: &str = "profile";
pub const DIM_OBS: &str = "obs";
pub const DIM_STRING: &str = "string_len";

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 1_000_000;

/// Output file naming
pub const OUTPUT_SUFFIX: &str = "_raw";
pub const OUTPUT_EXTENSION: &str = "nc";

/// Timestamp formats
pub const DATESTR_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
