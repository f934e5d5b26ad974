//! Google Analytics 4 loader script.
//!
//! Independent of the search engine: the script only installs the global
//! `gtag` function and loads the tag library.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised for analytics settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// The id is not of the form `G-XXXXXXXXXX`.
    #[error("invalid GA4 measurement id: {0:?}")]
    InvalidId(String),
}

/// A validated GA4 measurement id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementId(String);

impl FromStr for MeasurementId {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.strip_prefix("G-").is_some_and(|rest| {
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric())
        });
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(AnalyticsError::InvalidId(s.to_string()))
        }
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the GA4 loader script for `id`.
pub fn ga4_script(id: &MeasurementId) -> String {
    format!(
        r#"// GA4 tracking: {id}
(function () {{
  var tag = document.createElement('script');
  tag.async = true;
  tag.src = 'https://www.googletagmanager.com/gtag/js?id={id}';
  document.head.appendChild(tag);

  window.dataLayer = window.dataLayer || [];
  function gtag() {{ dataLayer.push(arguments); }}
  gtag('js', new Date());
  gtag('config', '{id}');

  window.gtag = gtag;
}})();
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_measurement_ids() {
        let id: MeasurementId = "G-J8ND35KCZW".parse().unwrap();
        assert_eq!(id.to_string(), "G-J8ND35KCZW");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["", "G-", "UA-1234-1", "G-abc'); alert(1", "g-ABC"] {
            assert!(bad.parse::<MeasurementId>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn script_loads_tag_and_configures() {
        let id: MeasurementId = "G-TEST123".parse().unwrap();
        let js = ga4_script(&id);
        assert!(js.contains("https://www.googletagmanager.com/gtag/js?id=G-TEST123"));
        assert!(js.contains("gtag('config', 'G-TEST123');"));
        assert!(js.contains("window.gtag = gtag;"));
    }
}
