//! Deployment regions

/// Region codes that support static website hosting, in display order
pub const REGIONS: [&str; 19] = [
    "eastus",
    "eastus2",
    "centralus",
    "northcentralus",
    "southcentralus",
    "westus",
    "westus2",
    "westus3",
    "westeurope",
    "northeurope",
    "uksouth",
    "canadacentral",
    "australiaeast",
    "southeastasia",
    "japaneast",
    "koreacentral",
    "centralindia",
    "brazilsouth",
    "francecentral",
];

/// Region selected when the form is first shown
pub const DEFAULT_REGION: &str = "eastus";

pub fn is_known_region(code: &str) -> bool {
    REGIONS.contains(&code)
}
