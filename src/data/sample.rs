//! Embedded fallback records.
//!
//! When the source CSV cannot be fetched or parsed, these three
//! registrations stand in so the rest of the dashboard still has a normal,
//! if small, dataset to work with. They satisfy the same acceptance rules
//! as real data.

use super::model::Vehicle;

pub fn sample_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            vin: "5YJYGAEE4M".to_string(),
            county: "Clark".to_string(),
            city: "Vancouver".to_string(),
            state: "WA".to_string(),
            postal_code: "98665".to_string(),
            model_year: 2021,
            make: "TESLA".to_string(),
            model: "MODEL Y".to_string(),
            vehicle_type: "Battery Electric Vehicle (BEV)".to_string(),
            cafv_eligibility: "Eligibility unknown as battery range has not been researched"
                .to_string(),
            electric_range: 326,
            base_msrp: 0,
            legislative_district: 49,
            dol_vehicle_id: "156850249".to_string(),
            vehicle_location: "POINT (-122.66592 45.678565)".to_string(),
            electric_utility: "BONNEVILLE POWER ADMINISTRATION||PUD NO 1 OF CLARK COUNTY - (WA)"
                .to_string(),
            census_tract: "53011041010".to_string(),
        },
        Vehicle {
            vin: "1N4AZ0CP0F".to_string(),
            county: "King".to_string(),
            city: "Seattle".to_string(),
            state: "WA".to_string(),
            postal_code: "98122".to_string(),
            model_year: 2020,
            make: "NISSAN".to_string(),
            model: "LEAF".to_string(),
            vehicle_type: "Battery Electric Vehicle (BEV)".to_string(),
            cafv_eligibility: "Clean Alternative Fuel Vehicle Eligible".to_string(),
            electric_range: 149,
            base_msrp: 0,
            legislative_district: 37,
            dol_vehicle_id: "125701579".to_string(),
            vehicle_location: "POINT (-122.30839 47.610365)".to_string(),
            electric_utility: "CITY OF SEATTLE - (WA)".to_string(),
            census_tract: "53033007800".to_string(),
        },
        Vehicle {
            vin: "1G1FW6S06H".to_string(),
            county: "King".to_string(),
            city: "Bellevue".to_string(),
            state: "WA".to_string(),
            postal_code: "98004".to_string(),
            model_year: 2019,
            make: "CHEVROLET".to_string(),
            model: "BOLT EV".to_string(),
            vehicle_type: "Battery Electric Vehicle (BEV)".to_string(),
            cafv_eligibility: "Clean Alternative Fuel Vehicle Eligible".to_string(),
            electric_range: 259,
            base_msrp: 0,
            legislative_district: 41,
            dol_vehicle_id: "123456789".to_string(),
            vehicle_location: "POINT (-122.20068 47.610378)".to_string(),
            electric_utility: "PUGET SOUND ENERGY INC".to_string(),
            census_tract: "53033022604".to_string(),
        },
    ]
}
