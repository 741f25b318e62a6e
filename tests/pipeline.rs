//! End-to-end pipeline test: a registration CSV on disk, through loading,
//! filtering, and summarization, via the public API only.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use ev_dashboard_data::data::summary::{self, DashboardMetrics};
use ev_dashboard_data::{FilterSelection, Session, Severity};

const HEADER: [&str; 17] = [
    "VIN (1-10)",
    "County",
    "City",
    "State",
    "Postal Code",
    "Model Year",
    "Make",
    "Model",
    "Electric Vehicle Type",
    "Clean Alternative Fuel Vehicle (CAFV) Eligibility",
    "Electric Range",
    "Base MSRP",
    "Legislative District",
    "DOL Vehicle ID",
    "Vehicle Location",
    "Electric Utility",
    "2020 Census Tract",
];

/// Build a semicolon-delimited registration file so the delimiter sniffer
/// has to earn its keep.
fn registrations_csv() -> String {
    let rows: Vec<[&str; 17]> = vec![
        [
            "5YJ3E1EB0K", "King", "Seattle", "WA", "98112", "2019", "TESLA", "MODEL 3",
            "Battery Electric Vehicle (BEV)", "Clean Alternative Fuel Vehicle Eligible",
            "220", "0", "43", "101250425", "POINT (-122.30 47.63)",
            "CITY OF SEATTLE - (WA)", "53033006300",
        ],
        [
            "1C4JJXP68M", "Kitsap", "Bremerton", "WA", "98312", "2021", "JEEP", "WRANGLER",
            "Plug-in Hybrid Electric Vehicle (PHEV)", "Not eligible due to low battery range",
            "21", "0", "35", "154690532", "POINT (-122.69 47.57)",
            "PUGET SOUND ENERGY INC", "53035080400",
        ],
        [
            "WBY8P6C05L", "King", "Bellevue", "WA", "98007", "2020", "BMW", "I3",
            "Battery Electric Vehicle (BEV)", "Clean Alternative Fuel Vehicle Eligible",
            "153", "0", "48", "113120984", "POINT (-122.14 47.61)",
            "PUGET SOUND ENERGY INC", "53033023401",
        ],
        // Malformed and out-of-range rows the pipeline must drop:
        ["", "", "", "", "", "", "", "", "", "", "", "", "", "", "", "", ""],
        [
            "JTDKARFP0H", "King", "Seattle", "WA", "98101", "1989", "TOYOTA", "PRIUS PRIME",
            "Plug-in Hybrid Electric Vehicle (PHEV)", "Not eligible due to low battery range",
            "25", "0", "37", "149874623", "POINT (-122.33 47.61)",
            "CITY OF SEATTLE - (WA)", "53033008100",
        ],
    ];

    let mut text = String::new();
    text.push_str(&HEADER.join(";"));
    text.push('\n');
    for row in rows {
        text.push_str(&row.join(";"));
        text.push('\n');
    }
    // And one structurally short row.
    text.push_str("too;short;to;keep\n");
    text
}

fn temp_csv(name: &str, contents: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("ev-dashboard-pipeline-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn csv_on_disk_to_filtered_summaries() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let path = temp_csv("Electric_Vehicle_Population_Data.csv", &registrations_csv())?;
    let mut session = Session::load(&path);
    fs::remove_file(&path).ok();

    // The blank row, the 1989 registration, and the short row are gone.
    assert!(session.load_notice().is_none());
    assert_eq!(session.dataset().len(), 3);

    // Filter options come from the canonical dataset, ordered per field.
    let options = session.options();
    assert_eq!(options.makes, vec!["BMW", "JEEP", "TESLA"]);
    assert_eq!(options.model_years, vec![2021, 2020, 2019]);
    assert_eq!(options.counties, vec!["King", "Kitsap"]);

    // Narrow to King county; options must not shrink.
    session.apply_filters(FilterSelection::from_raw("", "", "", "King"));
    assert_eq!(session.filtered().count(), 2);
    assert_eq!(session.options().makes, vec!["BMW", "JEEP", "TESLA"]);

    let metrics = DashboardMetrics::compute(session.filtered());
    assert_eq!(metrics.total_vehicles, 2);
    // (220 + 153) / 2 = 186.5, rounded up.
    assert_eq!(metrics.avg_electric_range, 187);
    assert_eq!(metrics.bev_share_percent, 100);

    let rows = summary::table_rows(session.filtered(), 15);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].model, "MODEL 3");
    assert_eq!(rows[1].model, "I3");

    // Reset restores the full dataset, including the lone PHEV.
    session.reset_filters();
    let split = summary::drivetrain_split(session.filtered());
    assert_eq!((split.bev, split.phev), (2, 1));

    Ok(())
}

#[test]
fn unavailable_source_degrades_to_sample_data() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut session = Session::load(std::path::Path::new(
        "no-such-dir/Electric_Vehicle_Population_Data.csv",
    ));

    let notice = session.load_notice().expect("a single load warning");
    assert_eq!(notice.severity, Severity::Warning);
    assert!(notice
        .message
        .contains("Electric_Vehicle_Population_Data.csv"));

    // Downstream sees a normal, if small, dataset.
    assert_eq!(session.dataset().len(), 3);
    session.apply_filters(FilterSelection::from_raw("TESLA", "", "", ""));
    let visible: Vec<_> = session.filtered().collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].electric_range, 326);

    Ok(())
}

#[test]
fn public_types_serialize_for_the_renderer() -> Result<()> {
    let session = Session::load(std::path::Path::new("missing.csv"));

    let json = serde_json::to_value(session.dataset())?;
    assert_eq!(json["vehicles"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["options"]["makes"][0], "CHEVROLET");

    let metrics = DashboardMetrics::compute(session.filtered());
    let json = serde_json::to_value(&metrics)?;
    assert_eq!(json["total_vehicles"], 3);
    assert_eq!(json["top_make"], "TESLA");

    Ok(())
}
