//! Layer schema inspection.
//!
//! Field kinds are resolved from the provider's loosely-typed `typeName`
//! strings into the fixed [`FieldKind`] enum, once per layer change. The
//! descriptors are plain data; nothing here holds a live layer reference.

use std::path::Path;

use crate::host::VectorLayer;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// A field as reported by the layer handle, before kind resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    pub type_name: String,
}

impl RawField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Coarse field kind used for clause dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Numeric,
    Other,
}

const STRING_TYPE_NAMES: &[&str] = &["string", "text", "varchar", "char", "nchar", "nvarchar"];

const NUMERIC_TYPE_NAMES: &[&str] = &[
    "integer", "integer64", "int", "int2", "int4", "int8", "smallint", "bigint", "real", "double",
    "float", "float8", "numeric", "decimal",
];

impl FieldKind {
    /// Resolves a provider type name into a kind. Unknown names are
    /// [`FieldKind::Other`], never an error.
    pub fn from_type_name(type_name: &str) -> Self {
        let lowered = type_name.trim().to_lowercase();
        if STRING_TYPE_NAMES.contains(&lowered.as_str()) {
            Self::String
        } else if NUMERIC_TYPE_NAMES.contains(&lowered.as_str()) {
            Self::Numeric
        } else {
            Self::Other
        }
    }
}

/// A schema field with its resolved kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn from_raw(raw: &RawField) -> Self {
        Self {
            name: raw.name.clone(),
            kind: FieldKind::from_type_name(&raw.type_name),
        }
    }
}

/// Resolves the full field list of a layer handle.
pub fn describe_fields(layer: &dyn VectorLayer) -> Vec<FieldDescriptor> {
    layer.fields().iter().map(FieldDescriptor::from_raw).collect()
}

// ---------------------------------------------------------------------------
// Layer summary
// ---------------------------------------------------------------------------

/// Metadata shown in the dialog's layer-info line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSummary {
    pub name: String,
    /// Geometry display string; `None` means the handle is not a vector
    /// layer.
    pub geometry: Option<String>,
    pub provider: String,
    /// Lowercased source extension, when the source looks like a file path.
    pub source_extension: Option<String>,
    /// Provider encoding; `None` means the data source does not expose one.
    pub encoding: Option<String>,
}

impl LayerSummary {
    /// Reads a summary from a layer handle. Re-read on every layer change;
    /// never cached.
    pub fn from_layer(layer: &dyn VectorLayer) -> Self {
        Self {
            name: layer.name(),
            geometry: layer.geometry(),
            provider: layer.provider_type(),
            source_extension: source_extension(&layer.source()),
            encoding: layer.encoding(),
        }
    }

    /// One-line user-facing description, e.g.
    /// `layer: parcels / type: vector (Polygon) / provider: ogr /
    /// extension: .shp / encoding: UTF-8`.
    pub fn display_line(&self) -> String {
        let kind = match &self.geometry {
            Some(geometry) => format!("vector ({geometry})"),
            None => "not a vector layer".to_string(),
        };
        let mut line = format!(
            "layer: {} / type: {} / provider: {}",
            self.name, kind, self.provider
        );
        if let Some(ext) = &self.source_extension {
            line.push_str(&format!(" / extension: .{ext}"));
        }
        match &self.encoding {
            Some(encoding) => line.push_str(&format!(" / encoding: {encoding}")),
            None => line.push_str(" / encoding: unavailable for this source"),
        }
        line
    }
}

/// Extracts a lowercased extension from a layer source string, when it has
/// one. Sources are not always file paths (database URIs, web services), so
/// absence is common.
pub fn source_extension(source: &str) -> Option<String> {
    Path::new(source)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_type_names_resolve() {
        for name in ["String", "text", "VARCHAR", " nchar "] {
            assert_eq!(FieldKind::from_type_name(name), FieldKind::String);
        }
    }

    #[test]
    fn numeric_type_names_resolve() {
        for name in ["Integer", "integer64", "double", "Real"] {
            assert_eq!(FieldKind::from_type_name(name), FieldKind::Numeric);
        }
    }

    #[test]
    fn unknown_type_names_are_other() {
        for name in ["date", "geometry", "blob", ""] {
            assert_eq!(FieldKind::from_type_name(name), FieldKind::Other);
        }
    }

    #[test]
    fn source_extension_lowercases() {
        assert_eq!(source_extension("/data/roads.SHP"), Some("shp".to_string()));
        assert_eq!(source_extension("/data/roads.gpkg"), Some("gpkg".to_string()));
    }

    #[test]
    fn non_file_sources_have_no_extension() {
        assert_eq!(source_extension("service='pg' table=roads"), None);
        assert_eq!(source_extension(""), None);
    }

    #[test]
    fn display_line_notes_missing_encoding() {
        let summary = LayerSummary {
            name: "parcels".to_string(),
            geometry: Some("Polygon".to_string()),
            provider: "ogr".to_string(),
            source_extension: Some("shp".to_string()),
            encoding: None,
        };
        let line = summary.display_line();
        assert!(line.contains("vector (Polygon)"));
        assert!(line.contains("extension: .shp"));
        assert!(line.contains("encoding: unavailable"));
    }
}
