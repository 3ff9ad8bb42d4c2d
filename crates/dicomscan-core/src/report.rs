//! XML report serialization
//!
//! Writes the frozen aggregate as an indented UTF-8 document (no BOM):
//! one `<File path="...">` element per result, one `<Tag name="...">` child
//! per schema entry in schema order. Escaping of paths and values is handled
//! by quick-xml for both attribute and text contexts.
//!
//! This module is pure output formatting: everything in the aggregate is
//! written, nothing is filtered or reordered here beyond tag order, which
//! the results already carry.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::result::ScanReport;

/// Root element of the report document
const ROOT_ELEMENT: &str = "DicomReport";

/// Serialize a report to any writer as indented XML
///
/// # Errors
///
/// Returns `ScanError::Xml` if serialization fails; the in-memory report is
/// unaffected either way.
pub fn write_report<W: Write>(report: &ScanReport, out: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(ROOT_ELEMENT);
    let total = report.total_files.to_string();
    let succeeded = report.succeeded().to_string();
    root.push_attribute(("totalFiles", total.as_str()));
    root.push_attribute(("succeeded", succeeded.as_str()));
    writer.write_event(Event::Start(root))?;

    for result in &report.results {
        let path = result.file_path.display().to_string();
        let mut file_el = BytesStart::new("File");
        file_el.push_attribute(("path", path.as_str()));
        writer.write_event(Event::Start(file_el))?;

        for tag in &result.tags {
            let mut tag_el = BytesStart::new("Tag");
            tag_el.push_attribute(("name", tag.name));
            writer.write_event(Event::Start(tag_el))?;
            writer.write_event(Event::Text(BytesText::new(&tag.value)))?;
            writer.write_event(Event::End(BytesEnd::new("Tag")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("File")))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    Ok(())
}

/// Serialize a report to a string
///
/// # Errors
///
/// Returns `ScanError::Xml` if serialization fails.
pub fn report_to_string(report: &ScanReport) -> Result<String> {
    let mut buf = Vec::new();
    write_report(report, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| crate::error::ScanError::Report(format!("report is not valid UTF-8: {e}")))
}

/// Write a report file named `DicomReport_YYYYMMDD_HHMMSS.xml` into
/// `output_dir`, creating the directory if absent
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns `ScanError::Io` if the directory or file cannot be created, or
/// `ScanError::Xml` if serialization fails.
pub fn write_report_file(report: &ScanReport, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = output_dir.join(format!("DicomReport_{stamp}.xml"));

    let file = File::create(&path)?;
    let mut out = BufWriter::new(file);
    write_report(report, &mut out)?;
    out.flush()?;

    Ok(path)
}
