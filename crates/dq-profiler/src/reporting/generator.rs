use crate::error::{ProfilingError, Result, ResultExt};
use crate::types::ProfileResult;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render a profile as JSON.
    pub fn to_json(result: &ProfileResult, pretty: bool) -> Result<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(result)
        } else {
            serde_json::to_string(result)
        };
        rendered.map_err(|e| ProfilingError::ReportFailed(e.to_string()))
    }

    /// Write a profile to a JSON file.
    ///
    /// The report is written to the output directory with the specified base name.
    /// For example, if `report_base_name` is "orders", the file will be "orders_profile.json".
    /// The output directory is created if it does not exist yet.
    pub fn write_report_to_file(
        &self,
        result: &ProfileResult,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ProfilingError::Io(e).with_context(format!(
                "Could not create output directory '{}'",
                self.output_dir.display()
            ))
        })?;

        let report_path = self
            .output_dir
            .join(format!("{}_profile.json", report_base_name));
        let json = Self::to_json(result, true)?;

        File::create(&report_path)
            .and_then(|mut file| file.write_all(json.as_bytes()))
            .map_err(ProfilingError::Io)
            .context(format!("Could not write '{}'", report_path.display()))?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
