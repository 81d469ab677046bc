//! Built-in defaults used when a config file leaves a key unset.

/// Extension scanned when neither the config nor the command line names one.
pub const DEFAULT_EXTENSION: &str = "jsx";

/// Config files looked up in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["relabel.json", "relabel.toml"];

/// Suffix appended to a file's name for its pre-write copy.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Suffix of the sibling file used for atomic writes.
pub const TEMP_SUFFIX: &str = ".relabel.tmp";

/// Terminology table applied when the config carries no `replacements`.
///
/// Order matters. Longer phrases sit ahead of the shorter terms they contain
/// ("Personnel Registry" before "Personnel", "Corporate Fleet (All)" before
/// "Corporate Fleet"), and no replacement text contains any pattern, so a
/// second run is a no-op.
pub const BUILTIN_REPLACEMENTS: &[(&str, &str)] = &[
    ("Transit Matrix", "Trips"),
    ("Trip Dispatch Console", "Trip Management"),
    ("Initiate Deployment", "Add New Trip"),
    ("Select Personnel Registry...", "Select Driver..."),
    ("Global Lookup:", "Search:"),
    ("Global Search...", "Search..."),
    ("Global search...", "Search..."),
    ("Asset Identity", "Vehicle No"),
    ("Personnel Registry", "Driver Directory"),
    ("Asset Designation", "Vehicle"),
    ("Target Hub", "Destination"),
    ("Origin City", "Source"),
    ("Route Budget", "Budget"),
    ("Master Pilot", "Driver"),
    ("Heavy Comm.", "Commercial"),
    ("Treasury Ops", "Finance"),
    ("Structured Finance", "Vehicle Finance"),
    ("Capital Servicing", "EMI Status"),
    ("Capital Deployed", "Total Paid"),
    ("Outstanding Liability", "Total Due"),
    ("Arrears Pending", "Overdue"),
    ("Corporate Fleet (All)", "All Vehicles"),
    ("Corporate Fleet", "Fleet"),
    ("Financial Institution", "Financier"),
    ("Lending Partner", "Financier"),
    ("Line Type", "Finance Type"),
    ("Principal Disbursed", "Loan Amount"),
    ("Mandate Value", "EMI Amount"),
    ("Term Horizon", "Duration"),
    ("Displaying Entity", "Showing"),
    ("Parameter Query Engine", "Search & Filter"),
    ("Configure Ledger View Criteria", "Filter options"),
    ("Contract Registry Database", "Finance Database"),
    ("Unassigned Personnel", "Unassigned"),
    ("Asset Class", "Vehicle"),
    ("Live Fleet Logistics", "Active Trips"),
    ("Awaiting Logistics Deployment", "No trips currently running"),
    ("Active deployments in transit", "Active trips running"),
    ("Origin Node", "Source"),
    ("Destination Node", "Destination"),
    ("Confirm Deployment", "Confirm Trip"),
    ("Deployment Date", "Trip Date"),
    ("fleet management system v2.0", "Fleet Management"),
    ("System Configuration", "Settings"),
    ("Security Configuration", "Security Settings"),
    ("User Access Control", "Roles & Permissions"),
    ("Operations Oversight", "Tracking"),
    ("Live Synchronization active", "Live Sync"),
    ("Global Logistics Nexus", "Tracking"),
    ("Logistics Nexus", "Tracking"),
    ("Refresh Registry", "Refresh"),
    ("Intelligence Center", "Analytics"),
    ("Active Driver", "Driver"),
    ("Assigned Vehicle", "Vehicle"),
    ("Active Trip Ledger", "Active Trips List"),
    ("Live Delivery Feed", "Current Trips"),
    ("Vehicle Status Overview", "Vehicle Status"),
    ("Operations Overview", "Operations Summary"),
    ("Extracted", "Entries"),
    ("Personnel", "Driver"),
    ("Designation RC Number", "RC Number"),
    ("Operational Class", "Vehicle Type"),
    ("Tire Configuration", "Tires"),
    ("Battery Capacity", "Batteries"),
    ("Trip Identity", "Trip ID"),
    ("Transit Route", "Route"),
    ("Fleet Assets", "Driver / Vehicle"),
    ("Freight Value", "Value"),
    ("Protocol", "Action"),
    ("Modify", "Edit"),
];
