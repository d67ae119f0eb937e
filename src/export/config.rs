use serde::Deserialize;

use crate::core::{DEFAULT_COUNTRY, MoveType};

/// Which side of the ledger to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Both,
    /// Customer documents only.
    Outgoing,
    /// Vendor documents only.
    Incoming,
}

/// Which document kinds to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFilter {
    #[default]
    All,
    Invoice,
    Refund,
}

/// Extension of exported UBL files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UblExtension {
    #[default]
    Xml,
    Ubl,
}

impl UblExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Ubl => "ubl",
        }
    }
}

/// Batch export settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub direction: Direction,
    pub document_type: DocumentFilter,
    /// Embed the rendered PDF into each document.
    pub embed_pdf: bool,
    pub ubl_file_extension: UblExtension,
    /// Jurisdiction assumed when the company address has no recognisable
    /// country; drives the country and currency fallbacks.
    pub home_country: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Both,
            document_type: DocumentFilter::All,
            embed_pdf: true,
            ubl_file_extension: UblExtension::Xml,
            home_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ExportConfig {
    /// Loads configuration from `UBL_EXPORT_*` environment variables,
    /// e.g. `UBL_EXPORT_DIRECTION=outgoing`, `UBL_EXPORT_EMBED_PDF=false`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix("UBL_EXPORT"))
    }

    fn load(env: config::Environment) -> Result<Self, config::ConfigError> {
        let mut cfg: Self = config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        cfg.home_country = cfg.home_country.trim().to_ascii_uppercase();
        Ok(cfg)
    }

    /// Move types selected by direction × document type.
    pub fn move_types(&self) -> Vec<MoveType> {
        MoveType::ALL
            .into_iter()
            .filter(|mt| self.accepts(*mt))
            .collect()
    }

    pub fn accepts(&self, move_type: MoveType) -> bool {
        let direction = match self.direction {
            Direction::Both => true,
            Direction::Outgoing => !move_type.is_vendor_bill(),
            Direction::Incoming => move_type.is_vendor_bill(),
        };
        let kind = match self.document_type {
            DocumentFilter::All => true,
            DocumentFilter::Invoice => matches!(move_type, MoveType::OutInvoice | MoveType::InInvoice),
            DocumentFilter::Refund => matches!(move_type, MoveType::OutRefund | MoveType::InRefund),
        };
        direction && kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> config::Environment {
        config::Environment::with_prefix("UBL_EXPORT").source(Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn defaults() {
        let cfg = ExportConfig::load(env(&[])).unwrap();
        assert_eq!(cfg, ExportConfig::default());
        assert_eq!(cfg.move_types(), MoveType::ALL.to_vec());
        assert!(cfg.embed_pdf);
        assert_eq!(cfg.ubl_file_extension.as_str(), "xml");
    }

    #[test]
    fn reads_prefixed_variables() {
        let cfg = ExportConfig::load(env(&[
            ("UBL_EXPORT_DIRECTION", "outgoing"),
            ("UBL_EXPORT_DOCUMENT_TYPE", "refund"),
            ("UBL_EXPORT_EMBED_PDF", "false"),
            ("UBL_EXPORT_UBL_FILE_EXTENSION", "ubl"),
            ("UBL_EXPORT_HOME_COUNTRY", "nl"),
        ]))
        .unwrap();
        assert_eq!(cfg.direction, Direction::Outgoing);
        assert_eq!(cfg.document_type, DocumentFilter::Refund);
        assert!(!cfg.embed_pdf);
        assert_eq!(cfg.ubl_file_extension, UblExtension::Ubl);
        assert_eq!(cfg.home_country, "NL");
        assert_eq!(cfg.move_types(), vec![MoveType::OutRefund]);
    }

    #[test]
    fn rejects_unknown_direction() {
        assert!(ExportConfig::load(env(&[("UBL_EXPORT_DIRECTION", "sideways")])).is_err());
    }

    #[test]
    fn direction_and_type_matrix() {
        let cfg = ExportConfig {
            direction: Direction::Incoming,
            document_type: DocumentFilter::Invoice,
            ..Default::default()
        };
        assert_eq!(cfg.move_types(), vec![MoveType::InInvoice]);

        let cfg = ExportConfig {
            direction: Direction::Both,
            document_type: DocumentFilter::Refund,
            ..Default::default()
        };
        assert_eq!(cfg.move_types(), vec![MoveType::OutRefund, MoveType::InRefund]);

        let cfg = ExportConfig {
            direction: Direction::Outgoing,
            ..Default::default()
        };
        assert!(cfg.accepts(MoveType::OutInvoice));
        assert!(!cfg.accepts(MoveType::InRefund));
    }
}
