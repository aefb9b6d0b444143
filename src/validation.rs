use crate::errors::UploadError;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const XLS_MIME: &str = "application/vnd.ms-excel";

/// Lower-cased text after the last dot, empty when the name has no dot.
pub fn extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

pub fn is_allowed(file_name: &str) -> bool {
    let ext = extension(file_name);
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}

/// Checks the selected file before anything is sent upstream.
pub fn check_file_name(file_name: Option<&str>) -> Result<&str, UploadError> {
    let name = file_name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(UploadError::NoFile);
    }
    if !is_allowed(name) {
        return Err(UploadError::InvalidExtension {
            file_name: name.to_string(),
        });
    }
    Ok(name)
}

pub fn mime_for(file_name: &str) -> &'static str {
    if extension(file_name) == "xls" {
        XLS_MIME
    } else {
        XLSX_MIME
    }
}

/// Reduces a client-supplied name to a safe base name for forwarding.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            _ => None,
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() || !cleaned.contains('.') {
        format!("upload.{}", extension(file_name))
    } else {
        cleaned.to_string()
    }
}
