//! Acquisition settings stored in the metadata lines of a streak image.
//!
//! The acquisition software writes four lines after the header:
//!
//! ```text
//! HiPic,1.0,100,1.0,0,0,4,8,...,StopCondition:PhotonCounting, Frame=10000, ...
//! Streak:Time=10 ns, Mode=Operate, Shutter=0, MCPGain=12, MCPSwitch=1,
//! Spectrograph:Wavelength=490.000[nm], Grating=2 : 150g/mm, SlitWidthIn=100[um], Mode=Spectrograph
//! Date:2022/06/03,14:09:55
//! ```
//!
//! The first line identifies the application; the others are
//! `Section:key=value, key=value` lists, except `Date` which holds the
//! acquisition timestamp.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format of the `Date` line
pub const DATE_FORMAT: &str = "%Y/%m/%d,%H:%M:%S";

/// Parsed acquisition settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionInfo {
    /// Acquisition application (e.g. `HiPic`)
    pub application: Option<String>,
    /// Application version
    pub version: Option<String>,
    /// Key/value settings per section (`Streak`, `Spectrograph`, ...)
    pub sections: BTreeMap<String, BTreeMap<String, String>>,
    /// Acquisition timestamp
    pub date: Option<NaiveDateTime>,
}

impl AcquisitionInfo {
    /// Parse the metadata lines of a record
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut info = AcquisitionInfo::default();

        for line in lines {
            let line = line.as_ref().trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix("Date:") {
                info.date = NaiveDateTime::parse_from_str(rest.trim(), DATE_FORMAT).ok();
                continue;
            }

            match line.split_once(':') {
                Some((section, rest)) if is_section_name(section) => {
                    info.sections
                        .insert(section.to_string(), parse_settings(rest));
                }
                _ => {
                    let mut fields = line.split(',');
                    info.application = fields.next().map(|s| s.trim().to_string());
                    info.version = fields.next().map(|s| s.trim().to_string());
                }
            }
        }

        info
    }

    /// Look up a single setting
    pub fn setting(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|settings| settings.get(key))
            .map(String::as_str)
    }
}

fn is_section_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_settings(rest: &str) -> BTreeMap<String, String> {
    rest.split(", ")
        .filter_map(|item| item.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
