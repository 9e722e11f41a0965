//! Department definitions.

use serde::Serialize;

/// A hospital department with a fixed bed pool.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DepartmentDef {
    /// Department name, also used as the diagnosis option label
    pub name: &'static str,
    /// Beds available in every hospital
    pub beds: u32,
    /// Display color (hex)
    pub color: &'static str,
    /// Display icon
    pub icon: &'static str,
}

/// Departments every hospital is built with, in display order.
pub const DEPARTMENTS: &[DepartmentDef] = &[
    DepartmentDef { name: "Emergency", beds: 4, color: "#FF6B6B", icon: "🚨" },
    DepartmentDef { name: "Surgery", beds: 3, color: "#4ECDC4", icon: "🔪" },
    DepartmentDef { name: "Pediatrics", beds: 3, color: "#FFD166", icon: "👶" },
    DepartmentDef { name: "Cardiology", beds: 2, color: "#EF476F", icon: "❤️" },
    DepartmentDef { name: "ICU", beds: 2, color: "#073B4C", icon: "💀" },
    DepartmentDef { name: "Orthopedics", beds: 2, color: "#118AB2", icon: "🦴" },
];

/// Look up a department definition by name.
pub fn department_def(name: &str) -> Option<&'static DepartmentDef> {
    DEPARTMENTS.iter().find(|d| d.name == name)
}

/// Total beds a freshly built hospital has.
pub fn total_bed_capacity() -> u32 {
    DEPARTMENTS.iter().map(|d| d.beds).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_lookup() {
        let icu = department_def("ICU").unwrap();
        assert_eq!(icu.beds, 2);
        assert!(department_def("icu").is_none());
    }

    #[test]
    fn test_total_capacity() {
        assert_eq!(total_bed_capacity(), 16);
    }
}
