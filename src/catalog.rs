//! Static label taxonomy for truck damage inspection.
//!
//! These tables are seeded into the database at startup (insert-or-ignore),
//! so the taxonomy endpoints always read stable ids from storage.

/// Truck sections with the vehicle parts that belong to each.
pub const TRUCK_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Front of Truck",
        &[
            "Top Hood Panel",
            "Center Bumper",
            "LT Bumper End",
            "RT Bumper End",
            "Grille",
            "LT Headlamp",
            "RT Headlamp",
        ],
    ),
    ("Cab/Driver Area", &["Windshield", "Cab Back Panel"]),
    (
        "Driver Side",
        &[
            "LT Fender",
            "LT Fender Extension",
            "LT Cowl Panel",
            "LT Step/Running Board",
            "LT Fairing",
            "LT Mid Fairing",
            "LT End Fairing",
            "LT Door",
            "LT Sleeper Panel",
            "LT Cab Extender",
            "LT Cab Ext Upper",
            "LT Side Marker/Reflector",
        ],
    ),
    (
        "Passenger Side",
        &[
            "RT Fender",
            "RT Fender Extension",
            "RT Cowl Panel",
            "RT Step/Running Board",
            "RT Fairing",
            "RT Mid Fairing",
            "RT End Fairing",
            "RT Door",
            "RT Sleeper Panel",
            "RT Cab Extender",
            "RT Cab Ext Upper",
            "RT Side Marker/Reflector",
        ],
    ),
    (
        "Rear of Truck",
        &[
            "Sleeper Back Panel",
            "Rear Bumper/ICC Bumper",
            "LT Tail Lamp",
            "RT Tail Lamp",
            "License Plate Bracket",
            "Rear Step",
            "LT Mud Flap Hanger",
            "RT Mud Flap Hanger",
        ],
    ),
    (
        "Top/Roof",
        &[
            "Roof Panel",
            "Sleeper Roof Panel",
            "Sun Visor",
            "Roof Air Deflector",
            "Clearance Lights",
            "Marker Lights",
        ],
    ),
    (
        "Underside/Bottom",
        &[
            "LT Step Bracket",
            "RT Step Bracket",
            "LT Splash Shield",
            "RT Splash Shield",
            "Underbody Fairing Panel",
        ],
    ),
];

pub const DAMAGE_TYPES: &[&str] = &[
    "Dent",
    "Scratch",
    "Scrape",
    "Gouge",
    "Crack",
    "Hole/Puncture",
    "Rust",
    "Corrosion",
    "Paint Damage",
    "Paint Fade",
    "Paint Chips",
    "Clear Coat Damage",
    "Chrome Damage",
    "Collision Damage",
    "Impact Damage",
    "Hail Damage",
    "Weather Damage",
    "Road Debris Damage",
    "Stone Chips",
    "Broken",
    "Missing",
    "Bent",
    "Twisted",
    "Warped",
    "Wear",
    "Other",
];

/// Severity levels ordered from least to most severe; the index is persisted
/// as the level's rank.
pub const SEVERITY_LEVELS: &[&str] = &["Minor", "Moderate", "Severe", "Critical"];

/// Weight a severity level contributes to the simulated repair estimate.
/// Unknown or unlabeled severities count as moderate.
pub fn severity_weight(name: &str) -> f64 {
    match name {
        "Minor" => 0.5,
        "Moderate" => 1.0,
        "Severe" => 2.0,
        "Critical" => 3.5,
        _ => 1.0,
    }
}
