//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a raw incident frame exercising every cleaning path:
/// - rows 0-3: fully valid
/// - row 4: missing victim race (blank)
/// - row 5: `(null)` placeholder in perpetrator sex
/// - row 6: unparsable occurrence date
/// - row 7: sentinel perpetrator age group ("1020")
/// - row 8: unrecognized murder flag literal
pub fn raw_incident_frame() -> DataFrame {
    df! {
        "INCIDENT_KEY" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9],
        "OCCUR_DATE" => [
            "08/27/2019", "01/01/2020", "12/2021", "2022-06-15",
            "03/05/2018", "07/04/2017", "someday", "05/20/2016", "09/09/2015",
        ],
        "OCCUR_TIME" => [
            "21:30:00", "00:15:00", "13:45", "02:00:00",
            "23:59:00", "11:11:11", "10:00:00", "18:30:00", "20:00:00",
        ],
        "BORO" => [
            "BRONX", "QUEENS", "BROOKLYN", "MANHATTAN",
            "BRONX", "QUEENS", "BRONX", "BROOKLYN", "QUEENS",
        ],
        "PRECINCT" => [40i64, 105, 75, 14, 44, 103, 41, 73, 113],
        "JURISDICTION_CODE" => [0i64, 0, 2, 0, 0, 0, 0, 2, 0],
        "LOCATION_DESC" => [
            "MULTI DWELL - APT BUILD", "", "GROCERY/BODEGA", "",
            "", "BAR/NIGHT CLUB", "", "", "",
        ],
        "STATISTICAL_MURDER_FLAG" => [
            "true", "false", "false", "true",
            "false", "true", "false", "false", "perhaps",
        ],
        "PERP_AGE_GROUP" => [
            "18-24", "25-44", "UNKNOWN", "45-64",
            "18-24", "(null)", "25-44", "1020", "25-44",
        ],
        "PERP_SEX" => ["M", "M", "U", "M", "M", "(null)", "M", "M", "M"],
        "PERP_RACE" => [
            "BLACK", "WHITE HISPANIC", "UNKNOWN", "BLACK",
            "BLACK", "BLACK", "WHITE", "BLACK", "BLACK",
        ],
        "VIC_AGE_GROUP" => [
            "25-44", "<18", "18-24", "65+",
            "25-44", "18-24", "25-44", "18-24", "45-64",
        ],
        "VIC_SEX" => ["M", "F", "M", "M", "F", "M", "M", "M", "F"],
        "VIC_RACE" => [
            "BLACK", "BLACK", "WHITE HISPANIC", "ASIAN / PACIFIC ISLANDER",
            "", "BLACK", "BLACK", "BLACK", "WHITE",
        ],
        "Latitude" => [40.8f64, 40.7, 40.6, 40.75, 40.82, 40.71, 40.81, 40.66, 40.69],
        "Longitude" => [-73.9f64, -73.8, -73.95, -73.99, -73.91, -73.79, -73.9, -73.92, -73.78],
    }
    .unwrap()
}

/// Expected outcome of cleaning [`raw_incident_frame`]: rows 0-3 survive.
pub const RAW_FRAME_KEPT_ROWS: usize = 4;

/// Borough / murder-flag distribution of the fixed 20-row CSV written by
/// [`write_incident_csv`]: (borough, fatal, non-fatal).
pub const CSV_BOROUGH_COUNTS: [(&str, u64, u64); 3] = [
    ("BRONX", 3, 5),
    ("BROOKLYN", 2, 4),
    ("QUEENS", 1, 5),
];

/// Write a fixed, fully-valid 20-row incident CSV and return its path along
/// with the guard that keeps the directory alive.
pub fn write_incident_csv() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("incidents.csv");

    let mut rows: Vec<String> = Vec::new();
    let mut key = 0;
    for (boro, fatal, non_fatal) in CSV_BOROUGH_COUNTS {
        for i in 0..(fatal + non_fatal) {
            key += 1;
            let flag = i < fatal;
            let age = ["<18", "18-24", "25-44", "45-64", "65+"][(key % 5) as usize];
            let sex = if key % 3 == 0 { "F" } else { "M" };
            rows.push(format!(
                "{key},{month:02}/{day:02}/2021,{hour:02}:15:00,{boro},40,0,{flag},25-44,M,BLACK,{age},{sex},BLACK",
                month = (key % 12) + 1,
                day = (key % 27) + 1,
                hour = key % 24,
            ));
        }
    }

    let mut file = std::fs::File::create(&path).expect("create csv");
    writeln!(
        file,
        "INCIDENT_KEY,OCCUR_DATE,OCCUR_TIME,BORO,PRECINCT,JURISDICTION_CODE,\
         STATISTICAL_MURDER_FLAG,PERP_AGE_GROUP,PERP_SEX,PERP_RACE,\
         VIC_AGE_GROUP,VIC_SEX,VIC_RACE"
    )
    .expect("write header");
    for row in rows {
        writeln!(file, "{}", row).expect("write row");
    }

    (dir, path)
}

/// Build a cleaned-shape frame directly, for split/model tests that don't
/// need the cleaner. Outcome is "Fatal" for the first `fatal` rows.
pub fn cleaned_frame(fatal: usize, non_fatal: usize) -> DataFrame {
    let total = fatal + non_fatal;
    let mut date = Vec::with_capacity(total);
    let mut time = Vec::with_capacity(total);
    let mut boro = Vec::with_capacity(total);
    let mut precinct = Vec::with_capacity(total);
    let mut jurisdiction = Vec::with_capacity(total);
    let mut perp_age = Vec::with_capacity(total);
    let mut perp_sex = Vec::with_capacity(total);
    let mut perp_race = Vec::with_capacity(total);
    let mut vic_age = Vec::with_capacity(total);
    let mut vic_sex = Vec::with_capacity(total);
    let mut vic_race = Vec::with_capacity(total);
    let mut outcome = Vec::with_capacity(total);
    let mut year = Vec::with_capacity(total);
    let mut month = Vec::with_capacity(total);
    let mut weekday = Vec::with_capacity(total);

    for i in 0..total {
        date.push(format!("2021-{:02}-{:02}", (i % 12) + 1, (i % 27) + 1));
        time.push(format!("{:02}:30:00", i % 24));
        boro.push(["BRONX", "QUEENS", "BROOKLYN"][i % 3].to_string());
        precinct.push(format!("{}", 40 + (i % 5)));
        jurisdiction.push("0".to_string());
        perp_age.push("25-44".to_string());
        perp_sex.push("M".to_string());
        perp_race.push("BLACK".to_string());
        vic_age.push(["<18", "18-24", "25-44", "45-64", "65+"][i % 5].to_string());
        vic_sex.push(if i % 2 == 0 { "M" } else { "F" }.to_string());
        vic_race.push(["BLACK", "WHITE", "ASIAN / PACIFIC ISLANDER"][i % 3].to_string());
        outcome.push(if i < fatal { "Fatal" } else { "NonFatal" }.to_string());
        year.push(2021i32);
        month.push("January".to_string());
        weekday.push("Monday".to_string());
    }

    df! {
        "OCCUR_DATE" => date,
        "OCCUR_TIME" => time,
        "BORO" => boro,
        "PRECINCT" => precinct,
        "JURISDICTION_CODE" => jurisdiction,
        "PERP_AGE_GROUP" => perp_age,
        "PERP_SEX" => perp_sex,
        "PERP_RACE" => perp_race,
        "VIC_AGE_GROUP" => vic_age,
        "VIC_SEX" => vic_sex,
        "VIC_RACE" => vic_race,
        "OUTCOME" => outcome,
        "YEAR" => year,
        "MONTH" => month,
        "WEEKDAY" => weekday,
    }
    .unwrap()
}
