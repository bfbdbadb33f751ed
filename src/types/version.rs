//! DXF file format revisions

use std::fmt;

/// DXF wire dialect selected by the `$ACADVER` header variable.
///
/// Variants are ordered chronologically, so version gates read as
/// `version >= DxfVersion::R13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DxfVersion {
    /// Release 10 (AC1006)
    R10,
    /// Release 11 (AC1009, shared with R12)
    R11,
    /// Release 12 (AC1009)
    #[default]
    R12,
    /// Release 13 (AC1012)
    R13,
    /// Release 14 (AC1014)
    R14,
    /// AutoCAD 2000 / 2002 (AC1015)
    R2000,
    /// AutoCAD 2004 (AC1018)
    R2004,
    /// AutoCAD 2007 / 2008 (AC1021)
    R2007,
    /// AutoCAD 2010 and later (AC1024)
    R2010,
}

impl DxfVersion {
    /// Every supported revision, oldest first.
    pub const ALL: [DxfVersion; 9] = [
        DxfVersion::R10,
        DxfVersion::R11,
        DxfVersion::R12,
        DxfVersion::R13,
        DxfVersion::R14,
        DxfVersion::R2000,
        DxfVersion::R2004,
        DxfVersion::R2007,
        DxfVersion::R2010,
    ];

    /// Parse an `$ACADVER` value (`AC1009`) or a release name (`R12`).
    ///
    /// `AC1009` is shared by R11 and R12 and maps to R12. Codes newer than
    /// AC1024 map to R2010.
    pub fn from_version_string(s: &str) -> Option<Self> {
        let s = s.trim();
        let upper = s.to_ascii_uppercase();
        let version = match upper.as_str() {
            "AC1006" | "R10" => DxfVersion::R10,
            "R11" => DxfVersion::R11,
            "AC1009" | "R12" => DxfVersion::R12,
            "AC1012" | "R13" => DxfVersion::R13,
            "AC1014" | "R14" => DxfVersion::R14,
            "AC1015" | "R2000" | "R2002" => DxfVersion::R2000,
            "AC1018" | "R2004" => DxfVersion::R2004,
            "AC1021" | "R2007" | "R2008" => DxfVersion::R2007,
            "AC1024" | "R2010" => DxfVersion::R2010,
            _ => {
                let number = upper.strip_prefix("AC")?.parse::<u32>().ok()?;
                if number > 1024 {
                    DxfVersion::R2010
                } else {
                    return None;
                }
            }
        };
        Some(version)
    }

    /// The `$ACADVER` string written for this revision.
    pub fn acad_ver(&self) -> &'static str {
        match self {
            DxfVersion::R10 => "AC1006",
            DxfVersion::R11 | DxfVersion::R12 => "AC1009",
            DxfVersion::R13 => "AC1012",
            DxfVersion::R14 => "AC1014",
            DxfVersion::R2000 => "AC1015",
            DxfVersion::R2004 => "AC1018",
            DxfVersion::R2007 => "AC1021",
            DxfVersion::R2010 => "AC1024",
        }
    }

    /// Release name, e.g. `R14`.
    pub fn release_name(&self) -> &'static str {
        match self {
            DxfVersion::R10 => "R10",
            DxfVersion::R11 => "R11",
            DxfVersion::R12 => "R12",
            DxfVersion::R13 => "R13",
            DxfVersion::R14 => "R14",
            DxfVersion::R2000 => "R2000",
            DxfVersion::R2004 => "R2004",
            DxfVersion::R2007 => "R2007",
            DxfVersion::R2010 => "R2010",
        }
    }

    /// Whether records carry `100` subclass markers.
    #[inline]
    pub fn has_subclass_markers(&self) -> bool {
        *self >= DxfVersion::R13
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.release_name(), self.acad_ver())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_acadver() {
        assert_eq!(DxfVersion::from_version_string("AC1006"), Some(DxfVersion::R10));
        assert_eq!(DxfVersion::from_version_string("AC1009"), Some(DxfVersion::R12));
        assert_eq!(DxfVersion::from_version_string("AC1014"), Some(DxfVersion::R14));
        assert_eq!(DxfVersion::from_version_string(" AC1024 "), Some(DxfVersion::R2010));
        assert_eq!(DxfVersion::from_version_string("AC1032"), Some(DxfVersion::R2010));
        assert_eq!(DxfVersion::from_version_string("AC1001"), None);
        assert_eq!(DxfVersion::from_version_string("garbage"), None);
    }

    #[test]
    fn test_release_aliases() {
        assert_eq!(DxfVersion::from_version_string("R11"), Some(DxfVersion::R11));
        assert_eq!(DxfVersion::from_version_string("r2002"), Some(DxfVersion::R2000));
        assert_eq!(DxfVersion::from_version_string("R2008"), Some(DxfVersion::R2007));
    }

    #[test]
    fn test_ordering() {
        assert!(DxfVersion::R11 < DxfVersion::R12);
        assert!(DxfVersion::R14 >= DxfVersion::R13);
        assert!(!DxfVersion::R12.has_subclass_markers());
        assert!(DxfVersion::R13.has_subclass_markers());
    }

    #[test]
    fn test_acad_ver_roundtrip() {
        for v in DxfVersion::ALL {
            let parsed = DxfVersion::from_version_string(v.acad_ver()).unwrap();
            if v == DxfVersion::R11 {
                assert_eq!(parsed, DxfVersion::R12);
            } else {
                assert_eq!(parsed, v);
            }
        }
    }
}
