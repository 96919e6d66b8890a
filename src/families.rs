//! Static reference list of Azure service families.

/// Documentation page the family list is taken from.
pub const FAMILIES_REFERENCE: &str = "https://learn.microsoft.com/en-us/rest/api/cost-management/retail-prices/azure-retail-prices#supported-servicefamily-values";

const OFFICIAL_FAMILIES: &[&str] = &[
    "Analytics",
    "Azure Arc",
    "Azure Communication Services",
    "Azure Security",
    "Azure Stack",
    "Compute",
    "Containers",
    "Data",
    "Databases",
    "Developer Tools",
    "Dynamics",
    "Gaming",
    "Integration",
    "Internet of Things",
    "Management and Governance",
    "Microsoft Syntex",
    "Mixed Reality",
    "Networking",
    "Other",
    "Power Platform",
    "Quantum Computing",
    "Security",
    "Storage",
    "Telecommunications",
    "Web",
    "Windows Virtual Desktop",
];

/// Known service family names, read-only after construction.
///
/// Built once at startup and shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFamilyCatalog {
    families: Vec<String>,
}

impl ServiceFamilyCatalog {
    pub fn new(families: Vec<String>) -> Self {
        Self { families }
    }

    /// The supported `serviceFamily` values of the Retail Prices API.
    pub fn official() -> Self {
        Self::new(OFFICIAL_FAMILIES.iter().map(|f| f.to_string()).collect())
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    pub fn contains(&self, family: &str) -> bool {
        self.families.iter().any(|f| f == family)
    }
}
