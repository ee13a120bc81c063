use crate::models::Hospital;

// Hospital directory. There is no backend endpoint for hospitals yet.
pub fn hospital_directory() -> Vec<Hospital> {
    let departments = |names: &[&str]| names.iter().map(|d| d.to_string()).collect::<Vec<_>>();

    vec![
        Hospital {
            id: 1,
            name: "Apollo Hospital".to_string(),
            city: "Hyderabad".to_string(),
            state: "Telangana".to_string(),
            lat: 17.385,
            lng: 78.4867,
            departments: departments(&["Cardiology", "Neurology", "Orthopedics"]),
        },
        Hospital {
            id: 2,
            name: "AIIMS Delhi".to_string(),
            city: "New Delhi".to_string(),
            state: "Delhi".to_string(),
            lat: 28.5672,
            lng: 77.2100,
            departments: departments(&["General Surgery", "Pediatrics", "Oncology"]),
        },
        Hospital {
            id: 3,
            name: "CMC Vellore".to_string(),
            city: "Vellore".to_string(),
            state: "Tamil Nadu".to_string(),
            lat: 12.9165,
            lng: 79.1325,
            departments: departments(&["Dermatology", "ENT", "Nephrology"]),
        },
    ]
}
