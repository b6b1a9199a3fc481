//! Utility functions for value normalization

/// Normalize an Azure location (e.g., "East US 2" -> "eastus2")
pub fn normalize_location(s: &str) -> String {
    s.replace(' ', "").to_lowercase()
}
