//! Predefined sector names
//!
//! Inserted once at start-up when the sector table is empty. After that the
//! table is the only source of truth.

pub const PREDEFINED_SECTORS: [&str; 36] = [
    "Administrative",
    "Legal",
    "HR",
    "Commercial",
    "Business Development",
    "Product, Commercial & HR",
    "Information Security",
    "System Engineering",
    "Customer Experience - Back Office",
    "Customer Experience - Special Projects",
    "Tech Development",
    "Data Engineering",
    "Infrastructure & Architecture",
    "IT Operations",
    "Affiliates",
    "AML",
    "Business Support",
    "Content",
    "Customer Experience",
    "Customer Experience - Phone Support",
    "Digital Marketing",
    "Executive",
    "Finance",
    "Legal & Compliance",
    "KTO Studio - Design",
    "Marketing",
    "Marketing Operations",
    "Marketing Research",
    "N/A",
    "Operations",
    "Payments",
    "Responsible Gambling",
    "SEO",
    "Tech",
    "Tech QA",
    "TESTING Department",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let unique: HashSet<_> = PREDEFINED_SECTORS.iter().collect();
        assert_eq!(unique.len(), PREDEFINED_SECTORS.len());
    }
}
