//! Dataset schema: column names, categorical enumerations and the outcome label
//!
//! The raw frame follows the published shooting-incident extract. Everything
//! downstream (cleaner, charts, model) refers to columns through these
//! constants so a schema change is a one-file edit.

use serde::Serialize;

// Raw columns required for the pipeline to run. A load with any of these
// absent is a fatal schema error.
pub const OCCUR_DATE: &str = "OCCUR_DATE";
pub const OCCUR_TIME: &str = "OCCUR_TIME";
pub const BORO: &str = "BORO";
pub const PRECINCT: &str = "PRECINCT";
pub const JURISDICTION_CODE: &str = "JURISDICTION_CODE";
pub const STATISTICAL_MURDER_FLAG: &str = "STATISTICAL_MURDER_FLAG";
pub const PERP_AGE_GROUP: &str = "PERP_AGE_GROUP";
pub const PERP_SEX: &str = "PERP_SEX";
pub const PERP_RACE: &str = "PERP_RACE";
pub const VIC_AGE_GROUP: &str = "VIC_AGE_GROUP";
pub const VIC_SEX: &str = "VIC_SEX";
pub const VIC_RACE: &str = "VIC_RACE";

// Derived columns added by the cleaner.
pub const OUTCOME: &str = "OUTCOME";
pub const YEAR: &str = "YEAR";
pub const MONTH: &str = "MONTH";
pub const WEEKDAY: &str = "WEEKDAY";

pub const REQUIRED_COLUMNS: [&str; 12] = [
    OCCUR_DATE,
    OCCUR_TIME,
    BORO,
    PRECINCT,
    JURISDICTION_CODE,
    STATISTICAL_MURDER_FLAG,
    PERP_AGE_GROUP,
    PERP_SEX,
    PERP_RACE,
    VIC_AGE_GROUP,
    VIC_SEX,
    VIC_RACE,
];

/// Columns dropped before cleaning: identifiers, free-text location fields and
/// coordinates that nothing downstream consumes.
pub const PRUNED_COLUMNS: [&str; 9] = [
    "INCIDENT_KEY",
    "LOC_OF_OCCUR_DESC",
    "LOC_CLASSFCTN_DESC",
    "LOCATION_DESC",
    "X_COORD_CD",
    "Y_COORD_CD",
    "Latitude",
    "Longitude",
    "Lon_Lat",
];

/// Raw string columns carried into the cleaned frame unchanged (after
/// trimming). Date, time and the murder flag are handled separately.
pub const PASSTHROUGH_COLUMNS: [&str; 9] = [
    BORO,
    PRECINCT,
    JURISDICTION_CODE,
    PERP_AGE_GROUP,
    PERP_SEX,
    PERP_RACE,
    VIC_AGE_GROUP,
    VIC_SEX,
    VIC_RACE,
];

/// The fixed age-group buckets used by the dataset. Any other literal in an
/// age-group column is a sentinel and drops the row.
pub const AGE_BUCKETS: [&str; 6] = ["<18", "18-24", "25-44", "45-64", "65+", "UNKNOWN"];

/// Calendar month names, Jan through Dec. Chart ordering follows this array,
/// not the alphabet.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday names, Monday through Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The six predictor features the model is fit against. The cleaned frame
/// carries more columns than these (perpetrator demographics stay available
/// for the charts), but the regression never sees them.
pub const FEATURE_COLUMNS: [&str; 6] = [
    BORO,
    OCCUR_DATE,
    OCCUR_TIME,
    VIC_AGE_GROUP,
    VIC_SEX,
    VIC_RACE,
];

/// Binary incident outcome derived from the statistical murder flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Fatal,
    NonFatal,
}

impl Outcome {
    /// Pure 1:1 mapping from the murder flag.
    pub fn from_murder_flag(flag: bool) -> Self {
        if flag {
            Outcome::Fatal
        } else {
            Outcome::NonFatal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Fatal => "Fatal",
            Outcome::NonFatal => "NonFatal",
        }
    }

    /// Numeric label used by the classifier (Fatal = 1).
    pub fn label(&self) -> i32 {
        match self {
            Outcome::Fatal => 1,
            Outcome::NonFatal => 0,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fatal" => Ok(Outcome::Fatal),
            "NonFatal" => Ok(Outcome::NonFatal),
            _ => Err(format!("Unknown outcome: '{}'. Use 'Fatal' or 'NonFatal'.", s)),
        }
    }
}
